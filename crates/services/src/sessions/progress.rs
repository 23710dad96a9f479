use quiz_core::{SessionPhase, SessionState};

/// Position of a running test, for headers and footers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// 1-based number of the question on screen.
    pub position: usize,
    pub total: usize,
    pub remaining_seconds: u32,
    pub is_last: bool,
}

impl QuizProgress {
    /// Progress of `state`, or `None` when no test is running.
    #[must_use]
    pub fn of(state: &SessionState) -> Option<Self> {
        if state.phase() != SessionPhase::InProgress {
            return None;
        }
        Some(Self {
            position: state.current_index() + 1,
            total: state.total_questions(),
            remaining_seconds: state.remaining_seconds(),
            is_last: state.on_last_question(),
        })
    }
}
