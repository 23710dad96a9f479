use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::CameraError;

/// Opaque id of an open video stream, issued by a `CameraDevice`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StreamHandle(u64);

impl StreamHandle {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Capability to open and close the proctoring video stream.
///
/// `acquire` only opens a stream. A stream is shown through `attach`, which is
/// called for the handle the lease keeps and never for one it discards.
///
/// Futures are not `Send`: the desktop adapter talks to the webview from the
/// UI thread.
#[async_trait(?Send)]
pub trait CameraDevice: Send + Sync {
    async fn acquire(&self) -> Result<StreamHandle, CameraError>;

    async fn attach(&self, _handle: StreamHandle) {}

    async fn release(&self, handle: StreamHandle);
}

/// Device used when the camera is switched off in configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledCamera;

#[async_trait(?Send)]
impl CameraDevice for DisabledCamera {
    async fn acquire(&self) -> Result<StreamHandle, CameraError> {
        Err(CameraError::Unavailable)
    }

    async fn release(&self, _handle: StreamHandle) {}
}

#[derive(Debug, Default)]
struct Lease {
    epoch: u64,
    wanted: bool,
    active: Option<StreamHandle>,
}

/// Owns at most one open stream for the proctoring preview.
///
/// Every `acquire` starts a new lease epoch. A stream that arrives after its
/// epoch was ended by `release` is closed immediately, so a slow permission
/// prompt can never leave the device open after the test is over.
pub struct ProctorCamera {
    device: Arc<dyn CameraDevice>,
    lease: Mutex<Lease>,
}

impl ProctorCamera {
    #[must_use]
    pub fn new(device: Arc<dyn CameraDevice>) -> Self {
        Self {
            device,
            lease: Mutex::new(Lease::default()),
        }
    }

    /// Open the preview stream.
    ///
    /// Returns `Ok(None)` when the stream arrived after the lease was released.
    ///
    /// # Errors
    ///
    /// Returns the device's `CameraError`; callers treat it as non-fatal.
    pub async fn acquire(&self) -> Result<Option<StreamHandle>, CameraError> {
        let (epoch, previous) = {
            let mut lease = self.lease.lock().unwrap_or_else(PoisonError::into_inner);
            lease.epoch += 1;
            lease.wanted = true;
            (lease.epoch, lease.active.take())
        };
        if let Some(previous) = previous {
            self.device.release(previous).await;
        }

        let handle = match self.device.acquire().await {
            Ok(handle) => handle,
            Err(err) => {
                warn!(error = %err, "camera unavailable; continuing without preview");
                return Err(err);
            }
        };

        let keep = {
            let mut lease = self.lease.lock().unwrap_or_else(PoisonError::into_inner);
            if lease.wanted && lease.epoch == epoch {
                lease.active = Some(handle);
                true
            } else {
                false
            }
        };

        if keep {
            self.device.attach(handle).await;
            info!(stream = handle.value(), "proctoring camera started");
            Ok(Some(handle))
        } else {
            debug!(stream = handle.value(), "late camera stream closed");
            self.device.release(handle).await;
            Ok(None)
        }
    }

    /// Close the preview stream if one is open. Safe to call repeatedly.
    pub async fn release(&self) {
        let handle = {
            let mut lease = self.lease.lock().unwrap_or_else(PoisonError::into_inner);
            lease.wanted = false;
            lease.epoch += 1;
            lease.active.take()
        };
        if let Some(handle) = handle {
            self.device.release(handle).await;
            info!(stream = handle.value(), "proctoring camera stopped");
        }
    }

    /// The stream currently shown, if any.
    #[must_use]
    pub fn active(&self) -> Option<StreamHandle> {
        self.lease
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .active
    }
}
