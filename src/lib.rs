// Library crate for the RecyclAI backend service
// This file exposes the public API for integration tests

pub mod capture;
pub mod catalog;
pub mod classify;
pub mod game;
pub mod profile;
pub mod shared;
pub mod stats;

// Re-export commonly used types for easier access in tests
pub use capture::{CaptureFlow, CapturePhase, Classifier, HttpClassifier, StaticFrameCamera};
pub use catalog::{ClassificationResult, DisposalClass, WasteCategory};
pub use classify::{HttpInferenceBackend, InferenceBackend};
pub use game::{GameMode, GameService, GameSession};
pub use profile::{AuthProvider, InMemoryProfileStore, ProfileStore, WatchAuthProvider};
pub use shared::{AppError, AppState};
pub use stats::ImpactStats;
