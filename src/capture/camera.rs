use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CameraError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("no camera device available")]
    NotFound,
    #[error("camera is busy")]
    Busy,
    #[error("camera stream is not active")]
    NotActive,
}

/// Handle to the device camera. Implementations hold at most one live
/// stream; the stream must be fully released (all tracks stopped)
/// before re-acquisition and before leaving the capture screen, or the
/// hardware indicator stays lit.
pub trait CameraDevice: Send + Sync {
    /// Open the camera stream. Fails with `Busy` if a stream is already
    /// held. On mobile this must follow an explicit user gesture.
    fn acquire(&self) -> Result<(), CameraError>;

    /// Stop all tracks and drop the stream handle. Idempotent.
    fn release(&self);

    fn is_active(&self) -> bool;

    /// Synchronously snapshot the current frame as encoded image bytes.
    fn capture_still(&self) -> Result<Vec<u8>, CameraError>;
}

/// Camera that serves a single fixed frame. Stands in for real device
/// capture in tests and local runs.
pub struct StaticFrameCamera {
    frame: Vec<u8>,
    active: AtomicBool,
}

impl StaticFrameCamera {
    pub fn new(frame: Vec<u8>) -> Self {
        Self {
            frame,
            active: AtomicBool::new(false),
        }
    }
}

impl CameraDevice for StaticFrameCamera {
    fn acquire(&self) -> Result<(), CameraError> {
        if self
            .active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(CameraError::Busy);
        }
        Ok(())
    }

    fn release(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn capture_still(&self) -> Result<Vec<u8>, CameraError> {
        if !self.is_active() {
            return Err(CameraError::NotActive);
        }
        Ok(self.frame.clone())
    }
}
