mod quiz_vm;
mod results_vm;
mod subjects_vm;
mod time_fmt;

pub use quiz_vm::{QuestionVm, map_question};
pub use results_vm::{ResultsVm, map_results};
pub use subjects_vm::{SubjectCardVm, map_subjects};
pub use time_fmt::{format_datetime, format_time_left};
