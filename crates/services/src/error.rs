//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted by camera devices.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CameraError {
    #[error("no camera is available")]
    Unavailable,
    #[error("camera permission was denied")]
    PermissionDenied,
    #[error("camera device error: {0}")]
    Device(String),
}

/// Errors emitted by `CertificateService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CertificateError {
    #[error("the assessment is not completed yet")]
    NotCompleted,
    #[error("failed to write certificate to {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
