use dioxus::prelude::*;
use quiz_core::SessionAction;

#[component]
pub fn LoginView(on_action: EventHandler<SessionAction>) -> Element {
    let mut full_name = use_signal(String::new);
    let mut credential = use_signal(String::new);

    let submit = move || {
        on_action.call(SessionAction::Login {
            full_name: full_name(),
            credential: credential(),
        });
    };

    rsx! {
        div { class: "card login-card",
            h2 { "Student Login" }
            div { class: "field",
                label { r#for: "login-name", "Full Name" }
                input {
                    id: "login-name",
                    r#type: "text",
                    placeholder: "Enter your full name",
                    value: "{full_name}",
                    oninput: move |evt| full_name.set(evt.value()),
                }
            }
            div { class: "field",
                label { r#for: "login-credential", "Authentication ID" }
                input {
                    id: "login-credential",
                    r#type: "password",
                    placeholder: "Enter your authentication ID",
                    value: "{credential}",
                    oninput: move |evt| credential.set(evt.value()),
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.key() == Key::Enter {
                            submit();
                        }
                    },
                }
            }
            button {
                class: "btn btn-primary",
                id: "login-submit",
                onclick: move |_| submit(),
                "Login"
            }
        }
    }
}
