use tokio::sync::watch;

use crate::models::SessionPayload;

/// The signed-in user as seen by the rest of the application.
///
/// Readers subscribe and see updates as soon as they are published. Only
/// the login flow (and sign-out) writes to it.
#[derive(Debug)]
pub struct SessionContext {
    tx: watch::Sender<Option<SessionPayload>>,
}

impl SessionContext {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Publish a new identity to every subscriber
    pub fn update(&self, session: SessionPayload) {
        self.tx.send_replace(Some(session));
    }

    pub fn clear(&self) {
        self.tx.send_replace(None);
    }

    /// Snapshot of the current user
    pub fn current(&self) -> Option<SessionPayload> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<SessionPayload>> {
        self.tx.subscribe()
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn session(token: &str) -> SessionPayload {
        SessionPayload {
            token: token.to_string(),
            role: Role::Tester,
            profile: Default::default(),
        }
    }

    #[test]
    fn test_update_and_clear() {
        let context = SessionContext::new();
        assert!(context.current().is_none());

        context.update(session("t1"));
        assert_eq!(context.current().map(|s| s.token).as_deref(), Some("t1"));

        context.clear();
        assert!(context.current().is_none());
    }

    #[tokio::test]
    async fn test_subscribers_observe_update() {
        let context = SessionContext::new();
        let mut rx = context.subscribe();

        context.update(session("t2"));

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_ref().map(|s| s.role.clone()), Some(Role::Tester));
    }
}
