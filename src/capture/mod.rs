pub mod camera;
pub mod classifier;
pub mod flow;
pub mod frame;

pub use camera::{CameraDevice, CameraError, StaticFrameCamera};
pub use classifier::{Classifier, ClassifyError, HttpClassifier};
pub use flow::{CaptureError, CaptureFlow, CapturePhase, Navigator, CAPTURE_AWARD_POINTS};
pub use frame::{bound_still_frame, FrameError, StillFrame, MAX_STILL_EDGE};
