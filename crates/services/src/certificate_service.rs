use std::path::PathBuf;

use quiz_core::{CERTIFICATE_FILE_NAME, Certificate, SessionState};
use tracing::info;

use crate::error::CertificateError;

/// Writes completion certificates into a fixed export directory.
#[derive(Debug, Clone)]
pub struct CertificateService {
    export_dir: PathBuf,
}

impl CertificateService {
    #[must_use]
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }

    /// Build the certificate for a finished session without writing it.
    ///
    /// # Errors
    ///
    /// Returns `CertificateError::NotCompleted` before the session is completed.
    pub fn prepare(&self, state: &SessionState) -> Result<Certificate, CertificateError> {
        Certificate::from_session(state).ok_or(CertificateError::NotCompleted)
    }

    /// Render and save the certificate, returning the written path.
    ///
    /// An existing certificate in the export directory is overwritten.
    ///
    /// # Errors
    ///
    /// Returns `CertificateError::NotCompleted` before completion and
    /// `CertificateError::Io` if the directory or file cannot be written.
    pub fn export(&self, state: &SessionState) -> Result<PathBuf, CertificateError> {
        let certificate = self.prepare(state)?;
        let path = self.export_dir.join(CERTIFICATE_FILE_NAME);

        std::fs::create_dir_all(&self.export_dir).map_err(|source| CertificateError::Io {
            path: self.export_dir.clone(),
            source,
        })?;
        std::fs::write(&path, certificate.to_svg()).map_err(|source| CertificateError::Io {
            path: path.clone(),
            source,
        })?;

        info!(
            path = %path.display(),
            subject = certificate.subject_label(),
            "certificate exported"
        );
        Ok(path)
    }
}
