use dioxus::prelude::*;
use quiz_core::{SessionAction, TIME_LIMIT_SECS};

#[component]
pub fn WelcomeDialog(name: String, on_action: EventHandler<SessionAction>) -> Element {
    rsx! {
        div { class: "dialog-backdrop",
            div { class: "dialog", role: "dialog",
                h2 { "Welcome to CyberWave Assessment Portal" }
                p { "Hello {name}, pick a subject to begin your assessment." }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| on_action.call(SessionAction::DismissWelcome),
                    "Get Started"
                }
            }
        }
    }
}

#[component]
pub fn InstructionsDialog(
    question_count: usize,
    on_action: EventHandler<SessionAction>,
) -> Element {
    let minutes = TIME_LIMIT_SECS / 60;
    let items = [
        format!("You will have {minutes} minutes to complete the test."),
        format!("There are {question_count} multiple-choice questions."),
        "Each question has only one correct answer.".to_owned(),
        "You cannot go back to previous questions.".to_owned(),
        "Ensure your camera is enabled for proctoring.".to_owned(),
        "Do not leave the test window or use other applications.".to_owned(),
        "Your results will be available immediately after completion.".to_owned(),
        "You can download your certificate after finishing the test.".to_owned(),
    ];

    rsx! {
        div { class: "dialog-backdrop",
            div { class: "dialog", role: "dialog",
                h2 { "Test Instructions" }
                ol { class: "instructions",
                    for item in items {
                        li { "{item}" }
                    }
                }
                p { class: "muted", "Good luck!" }
                div { class: "dialog__actions",
                    button {
                        class: "btn btn-secondary",
                        onclick: move |_| on_action.call(SessionAction::DismissInstructions),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        id: "start-test",
                        onclick: move |_| on_action.call(SessionAction::StartTest),
                        "Start Test"
                    }
                }
            }
        }
    }
}
