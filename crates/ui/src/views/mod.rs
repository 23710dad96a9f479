mod assessment;
mod dialogs;
mod login;
mod quiz;
mod results;
mod state;
mod subjects;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use assessment::AssessmentView;
pub use dialogs::{InstructionsDialog, WelcomeDialog};
pub use login::LoginView;
pub use quiz::QuizView;
pub use results::ResultsView;
pub use state::ViewError;
pub use subjects::SubjectsView;
