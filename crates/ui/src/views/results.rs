use std::path::PathBuf;
use std::time::Duration;

use dioxus::prelude::*;
use quiz_core::{SessionAction, SessionState};
use services::CertificateService;
use tracing::warn;

use crate::context::AppContext;
use crate::views::state::ViewError;
use crate::vm::map_results;

const CELEBRATION: Duration = Duration::from_secs(5);

/// Save the certificate for `state`, mapping failures to a screen message.
pub(crate) fn export_certificate(
    certificates: &CertificateService,
    state: &SessionState,
) -> Result<PathBuf, ViewError> {
    certificates.export(state).map_err(|err| {
        warn!(error = %err, "certificate export failed");
        ViewError::ExportFailed
    })
}

#[component]
pub fn ResultsView(state: SessionState, on_action: EventHandler<SessionAction>) -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let certificates = ctx.certificates();
    let opener = ctx.file_opener();
    let mut export_status = use_signal(|| None::<Result<PathBuf, ViewError>>);

    let celebrating = state.celebrating();
    use_future(move || async move {
        if celebrating {
            tokio::time::sleep(CELEBRATION).await;
            on_action.call(SessionAction::EndCelebration);
        }
    });

    let Some(vm) = map_results(&state, &catalog) else {
        return rsx! {
            p { class: "muted", "No results yet." }
        };
    };

    let export_state = state.clone();
    let on_export = move |_: MouseEvent| {
        export_status.set(Some(export_certificate(&certificates, &export_state)));
    };

    let export_view = match export_status() {
        Some(Ok(path)) => {
            let shown = path.display().to_string();
            rsx! {
                div { class: "results-export",
                    p { "Certificate saved to {shown}" }
                    button {
                        class: "btn btn-secondary",
                        onclick: move |_| opener.open_path(&path),
                        "Open Certificate"
                    }
                }
            }
        }
        Some(Err(err)) => rsx! {
            p { class: "error", role: "alert", "{err.message()}" }
        },
        None => rsx! {},
    };

    rsx! {
        div { class: "card results-card",
            if state.celebrating() {
                div { class: "celebration", role: "status",
                    "Congratulations! You completed the {vm.subject_label} quiz."
                }
            }
            h2 { "Quiz Results" }
            if vm.time_expired {
                p { class: "results-expired", "Time is up. Unanswered questions were not scored." }
            }
            h3 { class: "results-score", "{vm.score_line}" }
            p { "{vm.percentile_line}" }
            p { class: "muted", "Percentile is estimated from your score alone." }
            if let Some(at) = vm.completed_at_str.as_ref() {
                p { class: "muted", "Completed {at}" }
            }
            if let Some(taken) = vm.time_taken.as_ref() {
                p { class: "muted", "{taken}" }
            }
            div { class: "results-actions",
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| on_action.call(SessionAction::ToggleCorrectAnswers),
                    "{vm.toggle_label()}"
                }
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| on_action.call(SessionAction::Retake),
                    "Take Another Quiz"
                }
                button {
                    class: "btn btn-primary",
                    id: "download-certificate",
                    onclick: on_export,
                    "Download Certificate"
                }
            }
            {export_view}
            if vm.show_correct_answers {
                div { class: "correct-answers",
                    h4 { "Correct Answers:" }
                    for line in vm.correct_answers.iter() {
                        p { "{line}" }
                    }
                }
            }
        }
    }
}
