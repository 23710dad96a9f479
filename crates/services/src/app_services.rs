use std::path::PathBuf;
use std::sync::Arc;

use quiz_core::model::{CatalogError, SubjectCatalog};

use crate::Clock;
use crate::camera::{CameraDevice, ProctorCamera};
use crate::certificate_service::CertificateService;
use crate::sessions::QuizLoopService;

/// Inputs needed to assemble the app-facing services.
pub struct ServicesConfig {
    pub clock: Clock,
    pub export_dir: PathBuf,
    pub camera: Arc<dyn CameraDevice>,
}

/// Assembles app-facing services around the builtin question bank.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<SubjectCatalog>,
    quiz_loop: Arc<QuizLoopService>,
    certificates: Arc<CertificateService>,
}

impl AppServices {
    /// Build services over the builtin catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if a builtin question fails validation.
    pub fn new(config: ServicesConfig) -> Result<Self, CatalogError> {
        Ok(Self::with_catalog(config, SubjectCatalog::builtin()?))
    }

    /// Build services over an explicit catalog.
    #[must_use]
    pub fn with_catalog(config: ServicesConfig, catalog: SubjectCatalog) -> Self {
        let catalog = Arc::new(catalog);
        let camera = Arc::new(ProctorCamera::new(config.camera));
        let quiz_loop = Arc::new(QuizLoopService::new(
            config.clock,
            Arc::clone(&catalog),
            camera,
        ));
        let certificates = Arc::new(CertificateService::new(config.export_dir));

        Self {
            catalog,
            quiz_loop,
            certificates,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<SubjectCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn certificates(&self) -> Arc<CertificateService> {
        Arc::clone(&self.certificates)
    }
}
