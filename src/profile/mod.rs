pub mod auth;
pub mod handlers;
pub mod models;
pub mod store;

pub use auth::{AuthProvider, WatchAuthProvider};
pub use models::UserProfile;
pub use store::{InMemoryProfileStore, ProfileError, ProfileStore};
