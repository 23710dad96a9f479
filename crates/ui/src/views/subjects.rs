use dioxus::prelude::*;
use quiz_core::SessionAction;

use crate::context::AppContext;
use crate::vm::{SubjectCardVm, map_subjects};

#[component]
pub fn SubjectsView(on_action: EventHandler<SessionAction>) -> Element {
    let ctx = use_context::<AppContext>();
    let subjects = map_subjects(&ctx.catalog());

    rsx! {
        div { class: "card subjects-card",
            h2 { "Select a Subject" }
            if subjects.is_empty() {
                p { class: "muted", "No subjects are available." }
            }
            div { class: "subject-grid",
                for subject in subjects {
                    SubjectButton { key: "{subject.id}", subject: subject.clone(), on_action }
                }
            }
        }
    }
}

#[component]
fn SubjectButton(subject: SubjectCardVm, on_action: EventHandler<SessionAction>) -> Element {
    let id = subject.id.clone();
    rsx! {
        button {
            class: "subject-button",
            id: "subject-{subject.id}",
            onclick: move |_| on_action.call(SessionAction::SelectSubject(id.clone())),
            span { class: "subject-button__label", "{subject.label}" }
            span { class: "subject-button__count", "{subject.question_count} questions" }
        }
    }
}
