#![forbid(unsafe_code)]

pub mod app_services;
pub mod camera;
pub mod certificate_service;
pub mod countdown;
pub mod error;
pub mod sessions;

pub use quiz_core::Clock;

pub use app_services::{AppServices, ServicesConfig};
pub use camera::{CameraDevice, DisabledCamera, ProctorCamera, StreamHandle};
pub use certificate_service::CertificateService;
pub use countdown::Countdown;
pub use error::{CameraError, CertificateError};
pub use sessions::{QuizLoopService, QuizProgress};
