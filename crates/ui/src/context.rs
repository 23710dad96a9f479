use std::sync::Arc;

use quiz_core::model::SubjectCatalog;
use services::{CertificateService, QuizLoopService};

use crate::platform::FileOpenerRef;

pub trait UiApp: Send + Sync {
    fn quiz_loop(&self) -> Arc<QuizLoopService>;
    fn certificates(&self) -> Arc<CertificateService>;
    fn file_opener(&self) -> FileOpenerRef;
}

#[derive(Clone)]
pub struct AppContext {
    quiz_loop: Arc<QuizLoopService>,
    certificates: Arc<CertificateService>,
    file_opener: FileOpenerRef,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            quiz_loop: app.quiz_loop(),
            certificates: app.certificates(),
            file_opener: app.file_opener(),
        }
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<SubjectCatalog> {
        self.quiz_loop.catalog()
    }

    #[must_use]
    pub fn certificates(&self) -> Arc<CertificateService> {
        Arc::clone(&self.certificates)
    }

    #[must_use]
    pub fn file_opener(&self) -> FileOpenerRef {
        Arc::clone(&self.file_opener)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
