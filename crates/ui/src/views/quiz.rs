use dioxus::document::eval;
use dioxus::prelude::*;
use quiz_core::{SessionAction, SessionState};
use services::Countdown;

use crate::context::AppContext;
use crate::platform::{PREVIEW_ELEMENT_ID, attach_preview_script};
use crate::vm::map_question;

/// The running test. Ticks stop when this screen unmounts.
#[component]
pub fn QuizView(state: SessionState, on_action: EventHandler<SessionAction>) -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let camera_active = ctx.quiz_loop().camera().active().is_some();

    use_future(move || async move {
        let mut countdown = Countdown::new();
        loop {
            countdown.tick().await;
            on_action.call(SessionAction::Tick);
        }
    });

    let Some(vm) = map_question(&state, &catalog) else {
        return rsx! {
            p { class: "muted", "No question to show." }
        };
    };
    let submit_choice = vm.selected.clone();
    let can_submit = vm.can_submit();

    rsx! {
        div { class: "card quiz-card",
            CameraPreview { active: camera_active }
            header { class: "quiz-header",
                h2 { "{vm.title}" }
                span { class: "quiz-timer", id: "quiz-timer", "{vm.timer_label}" }
            }
            h3 { class: "quiz-position", "{vm.position_label}" }
            p { class: "quiz-prompt", "{vm.prompt}" }
            div { class: "quiz-options", role: "radiogroup",
                for (index, option) in vm.options.iter().enumerate() {
                    OptionRow {
                        key: "{index}",
                        index,
                        option: option.clone(),
                        checked: vm.selected.as_deref() == Some(option.as_str()),
                        on_action,
                    }
                }
            }
            footer { class: "quiz-footer",
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| on_action.call(SessionAction::Abandon),
                    "Leave Test"
                }
                button {
                    class: "btn btn-primary",
                    id: "quiz-submit",
                    disabled: !can_submit,
                    onclick: move |_| {
                        if let Some(choice) = submit_choice.clone() {
                            on_action.call(SessionAction::SubmitAnswer(choice));
                        }
                    },
                    "{vm.submit_label}"
                }
            }
        }
    }
}

#[component]
fn OptionRow(
    index: usize,
    option: String,
    checked: bool,
    on_action: EventHandler<SessionAction>,
) -> Element {
    let input_id = format!("option-{index}");
    let choice = option.clone();
    rsx! {
        div { class: if checked { "quiz-option quiz-option--selected" } else { "quiz-option" },
            input {
                r#type: "radio",
                name: "answer",
                id: "{input_id}",
                value: "{option}",
                checked,
                onchange: move |_| on_action.call(SessionAction::SelectAnswer(choice.clone())),
            }
            label { r#for: "{input_id}", "{option}" }
        }
    }
}

/// Live proctoring preview. The stream itself is owned by the camera lease.
///
/// `active` is re-read on every tick, so the note catches up within a second
/// of the stream opening.
#[component]
fn CameraPreview(active: bool) -> Element {
    use_effect(|| {
        let _ = eval(&attach_preview_script());
    });

    rsx! {
        div { class: "proctor-preview",
            video { id: "{PREVIEW_ELEMENT_ID}", autoplay: true, muted: true }
            if active {
                p { class: "proctor-preview__note", "Camera proctoring active" }
            } else {
                p { class: "proctor-preview__note muted", "Camera preview unavailable" }
            }
        }
    }
}
