use quiz_core::model::SubjectCatalog;
use quiz_core::{CompletionReason, SessionState, TIME_LIMIT_SECS, format_countdown};

use crate::vm::time_fmt::format_datetime;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub subject_label: String,
    pub score_line: String,
    pub percentile_line: String,
    pub time_expired: bool,
    pub completed_at_str: Option<String>,
    pub time_taken: Option<String>,
    pub show_correct_answers: bool,
    pub correct_answers: Vec<String>,
}

impl ResultsVm {
    #[must_use]
    pub fn toggle_label(&self) -> &'static str {
        if self.show_correct_answers {
            "Hide Correct Answers"
        } else {
            "Show Correct Answers"
        }
    }
}

/// Results of a completed session, or `None` while it is still running.
#[must_use]
pub fn map_results(state: &SessionState, catalog: &SubjectCatalog) -> Option<ResultsVm> {
    if !state.is_completed() {
        return None;
    }
    let subject = state.selected_subject()?;
    let report = state.score_report();
    let correct_answers = catalog
        .questions(subject)
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(index, question)| format!("Q{}: {}", index + 1, question.correct_answer()))
        .collect();

    Some(ResultsVm {
        subject_label: subject.label(),
        score_line: format!(
            "You scored {} out of {} ({})",
            report.score(),
            report.total(),
            report.percentage_label()
        ),
        percentile_line: format!("Your percentile ranking: {}%", report.percentile()),
        time_expired: state.completion_reason() == Some(CompletionReason::TimeExpired),
        completed_at_str: state.completed_at().map(format_datetime),
        time_taken: time_taken(state),
        show_correct_answers: state.show_correct_answers(),
        correct_answers,
    })
}

/// Wall time between start and completion, capped at the time limit.
fn time_taken(state: &SessionState) -> Option<String> {
    let elapsed = state.completed_at()? - state.started_at()?;
    let seconds = u32::try_from(elapsed.num_seconds().max(0))
        .unwrap_or(TIME_LIMIT_SECS)
        .min(TIME_LIMIT_SECS);
    Some(format!("Time taken: {}", format_countdown(seconds)))
}
