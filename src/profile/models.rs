use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's persisted profile in the document store. The point total is
/// only ever mutated through the store's atomic increment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: String,
    pub display_name: String,
    pub points: u32,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(uid: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            display_name: display_name.into(),
            points: 0,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_profiles_start_with_zero_points() {
        let profile = UserProfile::new("user-1", "Guru");
        assert_eq!(profile.points, 0);
        assert_eq!(profile.uid, "user-1");
    }

    #[test]
    fn profile_round_trips_through_serde() {
        let profile = UserProfile::new("user-1", "Guru");
        let json = serde_json::to_string(&profile).unwrap();
        let parsed: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, profile);
    }
}
