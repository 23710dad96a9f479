#![forbid(unsafe_code)]

pub mod certificate;
pub mod error;
pub mod model;
pub mod scoring;
pub mod session;
pub mod time;

pub use certificate::{CERTIFICATE_FILE_NAME, Certificate};
pub use error::Error;
pub use scoring::ScoreReport;
pub use session::{
    CompletionReason, SessionAction, SessionEffect, SessionError, SessionPhase, SessionState,
    Transition,
};
pub use time::{Clock, TIME_LIMIT_SECS, format_countdown};
