use tokio::sync::watch;
use tracing::info;

/// Read side of the external authentication provider: the currently
/// signed-in user id, if any, plus a subscription for auth-state
/// changes.
pub trait AuthProvider: Send + Sync {
    fn current_user(&self) -> Option<String>;

    /// Watch channel that yields the new user id (or `None`) whenever
    /// the auth state changes.
    fn subscribe(&self) -> watch::Receiver<Option<String>>;
}

/// In-process auth provider backed by a watch channel. Stands in for
/// the hosted identity provider in tests and local runs.
pub struct WatchAuthProvider {
    current: watch::Sender<Option<String>>,
}

impl WatchAuthProvider {
    pub fn signed_out() -> Self {
        let (current, _) = watch::channel(None);
        Self { current }
    }

    pub fn signed_in(uid: impl Into<String>) -> Self {
        let (current, _) = watch::channel(Some(uid.into()));
        Self { current }
    }

    pub fn sign_in(&self, uid: impl Into<String>) {
        let uid = uid.into();
        info!(uid = %uid, "User signed in");
        self.current.send_replace(Some(uid));
    }

    pub fn sign_out(&self) {
        info!("User signed out");
        self.current.send_replace(None);
    }
}

impl AuthProvider for WatchAuthProvider {
    fn current_user(&self) -> Option<String> {
        self.current.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.current.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn current_user_tracks_sign_in_and_out() {
        let auth = WatchAuthProvider::signed_out();
        assert_eq!(auth.current_user(), None);

        auth.sign_in("user-1");
        assert_eq!(auth.current_user(), Some("user-1".to_string()));

        auth.sign_out();
        assert_eq!(auth.current_user(), None);
    }

    #[tokio::test]
    async fn subscribers_observe_auth_state_changes() {
        let auth = WatchAuthProvider::signed_out();
        let mut changes = auth.subscribe();

        auth.sign_in("user-1");
        changes.changed().await.unwrap();
        assert_eq!(*changes.borrow(), Some("user-1".to_string()));

        auth.sign_out();
        changes.changed().await.unwrap();
        assert_eq!(*changes.borrow(), None);
    }
}
