use tracing::{debug, warn};

use super::{HintStore, SessionContext, SessionStore};
use crate::storage::StorageError;

/// Path of the login page.
pub const LOGIN_PATH: &str = "/login";

/// Result of checking a navigation against the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// Send the user to the login page first.
    RedirectToLogin,
}

/// Intercepts access to protected pages.
///
/// Unauthenticated requests leave a redirect hint behind so the login flow
/// can return the user to the page they asked for.
#[derive(Clone)]
pub struct AccessGuard {
    session: SessionStore,
    hints: HintStore,
}

impl AccessGuard {
    pub fn new(session: SessionStore, hints: HintStore) -> Self {
        Self { session, hints }
    }

    /// Check whether `path` may be shown
    pub fn check(&self, path: &str) -> Result<Access, StorageError> {
        if self.session.is_authenticated()? {
            return Ok(Access::Granted);
        }
        if path != LOGIN_PATH {
            self.hints.remember(path)?;
            debug!(path = %path, "Saved redirect for after login");
        }
        Ok(Access::RedirectToLogin)
    }

    /// The server rejected the stored token: end the session and remember
    /// where the user was
    pub fn session_expired(&self, context: &SessionContext, path: &str) -> Result<(), StorageError> {
        warn!("Session expired");
        self.session.mark_expired()?;
        context.clear();
        if path != LOGIN_PATH {
            self.hints.remember(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::{Role, SessionPayload};
    use crate::storage::MemoryStore;

    fn guard() -> (SessionStore, HintStore, AccessGuard) {
        let session = SessionStore::new(Arc::new(MemoryStore::new()));
        let hints = HintStore::new(Arc::new(MemoryStore::new()));
        let guard = AccessGuard::new(session.clone(), hints.clone());
        (session, hints, guard)
    }

    #[test]
    fn test_unauthenticated_access_saves_hint() {
        let (_, hints, guard) = guard();
        assert_eq!(guard.check("/reports").unwrap(), Access::RedirectToLogin);
        assert_eq!(hints.peek().unwrap().as_deref(), Some("/reports"));
    }

    #[test]
    fn test_login_page_is_not_saved() {
        let (_, hints, guard) = guard();
        assert_eq!(guard.check(LOGIN_PATH).unwrap(), Access::RedirectToLogin);
        assert_eq!(hints.peek().unwrap(), None);
    }

    #[test]
    fn test_authenticated_access_granted() {
        let (session, hints, guard) = guard();
        session.set_token("abc").unwrap();
        assert_eq!(guard.check("/reports").unwrap(), Access::Granted);
        assert_eq!(hints.peek().unwrap(), None);
    }

    #[test]
    fn test_session_expired() {
        let (session, hints, guard) = guard();
        let context = SessionContext::new();
        session.set_token("abc").unwrap();
        context.update(SessionPayload {
            token: "abc".to_string(),
            role: Role::Admin,
            profile: Default::default(),
        });

        guard.session_expired(&context, "/admin/users").unwrap();

        assert!(session.is_expired().unwrap());
        assert!(!session.is_authenticated().unwrap());
        assert!(context.current().is_none());
        assert_eq!(hints.peek().unwrap().as_deref(), Some("/admin/users"));
    }
}
