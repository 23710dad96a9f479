mod progress;
mod workflow;

// Public API of the session subsystem.
pub use progress::QuizProgress;
pub use workflow::QuizLoopService;
