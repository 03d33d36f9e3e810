//! In-process identity holder.
//!
//! [`AuthSession`] is the [`IdentityProvider`] the app hands to the service. The auth
//! layer (server functions, tests) calls [`AuthSession::sign_in`] /
//! [`AuthSession::sign_out`], and anything interested in transitions holds a
//! [`watch::Receiver`] from [`AuthSession::subscribe`].

use std::sync::Arc;

use tokio::sync::watch;

use crate::backend::IdentityProvider;
use crate::models::CurrentUser;

/// Shared, cloneable sign-in state.
#[derive(Clone, Debug)]
pub struct AuthSession {
    tx: Arc<watch::Sender<Option<CurrentUser>>>,
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::signed_out()
    }
}

impl AuthSession {
    pub fn signed_out() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    pub fn signed_in(user: CurrentUser) -> Self {
        let session = Self::signed_out();
        session.sign_in(user);
        session
    }

    pub fn sign_in(&self, user: CurrentUser) {
        tracing::info!("Signed in as {}", user.uid);
        self.tx.send_replace(Some(user));
    }

    pub fn sign_out(&self) {
        if self.tx.send_replace(None).is_some() {
            tracing::info!("Signed out");
        }
    }

    /// Receive every sign-in/sign-out transition.
    pub fn subscribe(&self) -> watch::Receiver<Option<CurrentUser>> {
        self.tx.subscribe()
    }
}

impl IdentityProvider for AuthSession {
    fn current_user(&self) -> Option<CurrentUser> {
        self.tx.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_transitions_are_published() {
        let session = AuthSession::signed_out();
        let mut rx = session.subscribe();
        assert!(session.current_user().is_none());

        session.sign_in(CurrentUser::new("u1", Some("Alice".into())));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().as_ref().map(|u| u.uid.as_str()), Some("u1"));

        let clone = session.clone();
        clone.sign_out();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_none());
        assert!(session.current_user().is_none());
    }
}
