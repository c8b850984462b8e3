// Orchestrates one capture cycle: still-frame snapshot, a single
// in-flight classification request, and a best-effort point award on a
// recognized result.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use super::camera::{CameraDevice, CameraError};
use super::classifier::Classifier;
use super::frame::{self, FrameError, StillFrame};
use crate::profile::{AuthProvider, ProfileStore};

/// Fixed credit added to the profile after each successful, recognized
/// classification.
pub const CAPTURE_AWARD_POINTS: u32 = 5;

/// Opaque "push named route with params" capability, e.g. the app's
/// router.
pub trait Navigator: Send + Sync {
    fn push(&self, route: &str, params: &[(&str, &str)]);
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum CapturePhase {
    #[default]
    Idle,
    Capturing,
    Classifying,
    Success(crate::catalog::ClassificationResult),
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CaptureError {
    #[error(transparent)]
    Camera(#[from] CameraError),
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error("a classification is already in progress")]
    ClassificationInFlight,
    #[error("no failed classification to retry")]
    NothingToRetry,
}

#[derive(Debug, Default)]
struct FlowState {
    phase: CapturePhase,
    still: Option<StillFrame>,
}

/// A capture cycle is in flight from the moment the snapshot starts
/// until the classification response lands.
fn in_flight(phase: &CapturePhase) -> bool {
    matches!(
        phase,
        CapturePhase::Capturing | CapturePhase::Classifying
    )
}

/// State machine for the capture screen:
/// `Idle → Capturing → Classifying → {Success, Failed} → Idle`.
///
/// Exactly one capture cycle is in flight at a time; a second capture
/// (or a retake) between snapshot and classification response is
/// rejected, and retry is accepted only from `Failed`, which rules out
/// double awards from a rapid double-tap.
pub struct CaptureFlow {
    camera: Arc<dyn CameraDevice>,
    classifier: Arc<dyn Classifier>,
    auth: Arc<dyn AuthProvider>,
    profiles: Arc<dyn ProfileStore>,
    state: RwLock<FlowState>,
}

impl CaptureFlow {
    pub fn new(
        camera: Arc<dyn CameraDevice>,
        classifier: Arc<dyn Classifier>,
        auth: Arc<dyn AuthProvider>,
        profiles: Arc<dyn ProfileStore>,
    ) -> Self {
        Self {
            camera,
            classifier,
            auth,
            profiles,
            state: RwLock::new(FlowState::default()),
        }
    }

    /// Open the camera stream ahead of a capture. On mobile this must
    /// follow an explicit user gesture; larger screens may call it on
    /// screen entry.
    pub async fn start_preview(&self) -> Result<(), CaptureError> {
        {
            let state = self.state.read().await;
            if in_flight(&state.phase) {
                return Err(CaptureError::ClassificationInFlight);
            }
        }
        self.camera.acquire()?;
        Ok(())
    }

    /// Snapshot the current frame, tear the stream down, and submit the
    /// bounded still for classification.
    #[instrument(skip(self))]
    pub async fn capture_and_classify(&self) -> Result<CapturePhase, CaptureError> {
        {
            let mut state = self.state.write().await;
            if in_flight(&state.phase) {
                return Err(CaptureError::ClassificationInFlight);
            }
            state.phase = CapturePhase::Capturing;
        }

        let still = match self
            .camera
            .capture_still()
            .map_err(CaptureError::from)
            .and_then(|raw| frame::bound_still_frame(&raw).map_err(CaptureError::from))
        {
            Ok(still) => still,
            Err(error) => {
                let mut state = self.state.write().await;
                state.phase = CapturePhase::Idle;
                return Err(error);
            }
        };

        // The stream is fully torn down once the still is in hand;
        // retake re-acquires from the device rather than resuming.
        self.camera.release();

        {
            let mut state = self.state.write().await;
            state.still = Some(still.clone());
            state.phase = CapturePhase::Classifying;
        }

        Ok(self.run_classification(still).await)
    }

    /// Re-submit the preserved still after a failed classification,
    /// without recapturing. Only valid from `Failed`; a successful
    /// result is left by retake, never re-run (a re-run would award a
    /// second time).
    pub async fn retry_classification(&self) -> Result<CapturePhase, CaptureError> {
        let still = {
            let mut state = self.state.write().await;
            match state.phase {
                CapturePhase::Capturing | CapturePhase::Classifying => {
                    return Err(CaptureError::ClassificationInFlight)
                }
                CapturePhase::Failed { .. } => {}
                CapturePhase::Idle | CapturePhase::Success(_) => {
                    return Err(CaptureError::NothingToRetry)
                }
            }
            let still = state.still.clone().ok_or(CaptureError::NothingToRetry)?;
            state.phase = CapturePhase::Classifying;
            still
        };
        Ok(self.run_classification(still).await)
    }

    async fn run_classification(&self, still: StillFrame) -> CapturePhase {
        match self.classifier.classify(&still.jpeg_base64).await {
            Ok(result) => {
                info!(
                    label = %result.label,
                    recognized = result.class.is_some(),
                    "Classification succeeded"
                );
                {
                    let mut state = self.state.write().await;
                    state.phase = CapturePhase::Success(result.clone());
                }
                // Award only once the result is known to map to a
                // recognized disposal class, never speculatively.
                if result.class.is_some() {
                    self.award_points().await;
                }
            }
            Err(error) => {
                warn!(%error, "Classification failed");
                let mut state = self.state.write().await;
                // The still is kept so the user can retry without
                // recapturing.
                state.phase = CapturePhase::Failed {
                    message: "Image classification failed. Please try again.".to_string(),
                };
            }
        }
        self.state.read().await.phase.clone()
    }

    /// Best-effort +5 credit. Guests are skipped silently; store
    /// failures are logged and never surfaced to the user.
    async fn award_points(&self) {
        let Some(uid) = self.auth.current_user() else {
            return;
        };
        match self
            .profiles
            .increment_points(&uid, CAPTURE_AWARD_POINTS)
            .await
        {
            Ok(total) => info!(uid = %uid, total, "Awarded capture points"),
            Err(error) => warn!(uid = %uid, %error, "Point award failed"),
        }
    }

    /// Discard the still and any cached result, then restart the
    /// camera stream from the device.
    pub async fn retake(&self) -> Result<(), CaptureError> {
        {
            let mut state = self.state.write().await;
            if in_flight(&state.phase) {
                return Err(CaptureError::ClassificationInFlight);
            }
            state.still = None;
            state.phase = CapturePhase::Idle;
        }
        self.camera.release();
        self.camera.acquire()?;
        Ok(())
    }

    pub async fn phase(&self) -> CapturePhase {
        self.state.read().await.phase.clone()
    }

    /// The preserved still image, available from `Classifying` onward
    /// until retake.
    pub async fn still(&self) -> Option<StillFrame> {
        self.state.read().await.still.clone()
    }

    /// Learn-more deep link for the current result: `None` unless the
    /// flow is in `Success` with a recognized disposal class.
    pub async fn learn_more_route(&self) -> Option<&'static str> {
        match &self.state.read().await.phase {
            CapturePhase::Success(result) => result.class.map(|class| class.guide_route()),
            _ => None,
        }
    }

    /// Open the disposal guide for the current result. Returns false
    /// when no guidance is available (unrecognized label, or no
    /// successful result yet).
    pub async fn open_learn_more(&self, navigator: &dyn Navigator) -> bool {
        let state = self.state.read().await;
        if let CapturePhase::Success(result) = &state.phase {
            if let Some(class) = result.class {
                navigator.push(class.guide_route(), &[("label", &result.label)]);
                return true;
            }
        }
        false
    }
}
