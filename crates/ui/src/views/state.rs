use quiz_core::SessionError;

/// What a screen can tell the student when an action does not go through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    InvalidCredentials,
    ActionRejected,
    ExportFailed,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidCredentials => {
                "Please enter your full name and the correct Authentication ID (INFO.TEST)."
            }
            Self::ActionRejected => "That action is not available right now.",
            Self::ExportFailed => "Could not save the certificate. Please try again.",
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl From<&SessionError> for ViewError {
    fn from(err: &SessionError) -> Self {
        match err {
            SessionError::InvalidCredentials(_) => Self::InvalidCredentials,
            SessionError::UnknownSubject(_)
            | SessionError::InvalidPhase { .. }
            | SessionError::InvalidChoice { .. }
            | SessionError::NoQuestion { .. } => Self::ActionRejected,
            _ => Self::Unknown,
        }
    }
}
