use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::models::UserProfile;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProfileError {
    #[error("profile store unavailable: {0}")]
    Unavailable(String),
}

/// Document store holding user profiles. Point totals are mutated only
/// through `increment_points`; callers never read-modify-write, so
/// concurrent sessions cannot lose updates.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>, ProfileError>;

    async fn upsert_profile(&self, profile: &UserProfile) -> Result<(), ProfileError>;

    /// Current point total; unknown users read as zero.
    async fn get_points(&self, uid: &str) -> Result<u32, ProfileError>;

    /// Atomically add `delta` to the user's points, creating a default
    /// profile on first award. Saturates at `u32::MAX`. Returns the new
    /// total.
    async fn increment_points(&self, uid: &str, delta: u32) -> Result<u32, ProfileError>;
}

/// In-memory implementation backing tests and local runs. The hosted
/// deployment talks to the managed document store instead.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: Arc<RwLock<HashMap<String, UserProfile>>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self {
            profiles: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>, ProfileError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(uid).cloned())
    }

    async fn upsert_profile(&self, profile: &UserProfile) -> Result<(), ProfileError> {
        let mut profiles = self.profiles.write().await;
        profiles.insert(profile.uid.clone(), profile.clone());
        info!(uid = %profile.uid, "Stored user profile");
        Ok(())
    }

    async fn get_points(&self, uid: &str) -> Result<u32, ProfileError> {
        let profiles = self.profiles.read().await;
        let points = profiles.get(uid).map(|p| p.points).unwrap_or(0);
        debug!(uid = %uid, points, "Read user points");
        Ok(points)
    }

    async fn increment_points(&self, uid: &str, delta: u32) -> Result<u32, ProfileError> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .entry(uid.to_string())
            .or_insert_with(|| UserProfile::new(uid, uid));
        profile.points = profile.points.saturating_add(delta);
        info!(uid = %uid, delta, total = profile.points, "Incremented user points");
        Ok(profile.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_users_read_as_zero_points() {
        let store = InMemoryProfileStore::new();
        assert_eq!(store.get_points("nobody").await.unwrap(), 0);
        assert!(store.get_profile("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn increment_creates_the_profile_on_first_award() {
        let store = InMemoryProfileStore::new();
        assert_eq!(store.increment_points("user-1", 5).await.unwrap(), 5);
        assert_eq!(store.increment_points("user-1", 5).await.unwrap(), 10);

        let profile = store.get_profile("user-1").await.unwrap().unwrap();
        assert_eq!(profile.points, 10);
    }

    #[tokio::test]
    async fn concurrent_increments_lose_no_updates() {
        let store = Arc::new(InMemoryProfileStore::new());

        let mut handles = Vec::new();
        for _ in 0..20 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.increment_points("user-1", 5).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.get_points("user-1").await.unwrap(), 100);
    }

    #[tokio::test]
    async fn increment_saturates_at_the_ceiling() {
        let store = InMemoryProfileStore::new();
        store.increment_points("user-1", u32::MAX - 3).await.unwrap();
        assert_eq!(
            store.increment_points("user-1", 10).await.unwrap(),
            u32::MAX
        );
    }

    #[tokio::test]
    async fn upsert_then_increment_builds_on_the_stored_total() {
        let store = InMemoryProfileStore::new();
        let mut profile = UserProfile::new("user-1", "Guru");
        profile.points = 10;
        store.upsert_profile(&profile).await.unwrap();

        assert_eq!(store.increment_points("user-1", 5).await.unwrap(), 15);
        let stored = store.get_profile("user-1").await.unwrap().unwrap();
        assert_eq!(stored.display_name, "Guru");
    }
}
