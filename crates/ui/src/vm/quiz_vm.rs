use quiz_core::SessionState;
use quiz_core::model::SubjectCatalog;
use services::QuizProgress;

use crate::vm::time_fmt::format_time_left;

/// Everything the quiz screen shows for the current question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub title: String,
    pub timer_label: String,
    pub position_label: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub selected: Option<String>,
    pub submit_label: &'static str,
}

impl QuestionVm {
    /// Submission stays disabled until an option is picked.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.selected.is_some()
    }
}

#[must_use]
pub fn map_question(state: &SessionState, catalog: &SubjectCatalog) -> Option<QuestionVm> {
    let progress = QuizProgress::of(state)?;
    let subject = state.selected_subject()?;
    let question = state.current_question(catalog)?;

    Some(QuestionVm {
        title: format!("{} Quiz", subject.label()),
        timer_label: format_time_left(progress.remaining_seconds),
        position_label: format!("Question {} of {}", progress.position, progress.total),
        prompt: question.prompt().to_owned(),
        options: question.options().to_vec(),
        selected: state.selected_answer().map(str::to_owned),
        submit_label: if progress.is_last {
            "Finish Quiz"
        } else {
            "Next Question"
        },
    })
}
