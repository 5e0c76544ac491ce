use std::sync::Arc;

use tracing::debug;

use crate::models::Role;
use crate::storage::{KeyValueStore, StorageError};

/// Ephemeral key for the path to return to after login.
pub const REDIRECT_HINT_KEY: &str = "redirectAfterLogin";

pub const ADMIN_DASHBOARD: &str = "/admin/dashboard";
pub const USER_DASHBOARD: &str = "/user/dashboard";

/// One-shot redirect hint kept in ephemeral storage.
#[derive(Clone)]
pub struct HintStore {
    store: Arc<dyn KeyValueStore>,
}

impl HintStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Save the path an unauthenticated user tried to reach
    pub fn remember(&self, path: &str) -> Result<(), StorageError> {
        self.store.set(REDIRECT_HINT_KEY, path)
    }

    /// Read the hint without consuming it
    pub fn peek(&self) -> Result<Option<String>, StorageError> {
        self.store.get(REDIRECT_HINT_KEY)
    }

    /// Read and delete the hint. A second call returns `None`.
    pub fn consume(&self) -> Result<Option<String>, StorageError> {
        self.store.remove(REDIRECT_HINT_KEY)
    }
}

/// Default landing page for a role, if it has one.
pub fn role_destination(role: &Role) -> Option<&'static str> {
    match role {
        Role::Admin => Some(ADMIN_DASHBOARD),
        Role::Developer | Role::Tester => Some(USER_DASHBOARD),
        Role::Other(_) => None,
    }
}

/// Picks where to go after a successful login.
#[derive(Clone)]
pub struct RedirectResolver {
    hints: HintStore,
}

impl RedirectResolver {
    pub fn new(hints: HintStore) -> Self {
        Self { hints }
    }

    /// Consume a pending hint if there is one, otherwise fall back to the
    /// role's dashboard. `None` means stay on the current page.
    ///
    /// The hint is deleted here, before the caller navigates.
    pub fn resolve(&self, role: &Role) -> Result<Option<String>, StorageError> {
        if let Some(path) = self.hints.consume()?.filter(|p| !p.is_empty()) {
            debug!(path = %path, "Using saved redirect");
            return Ok(Some(path));
        }
        let destination = role_destination(role).map(str::to_string);
        debug!(role = %role, ?destination, "Using role redirect");
        Ok(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn resolver() -> (HintStore, RedirectResolver) {
        let hints = HintStore::new(Arc::new(MemoryStore::new()));
        (hints.clone(), RedirectResolver::new(hints))
    }

    #[test]
    fn test_role_destinations() {
        let (_, resolver) = resolver();
        assert_eq!(resolver.resolve(&Role::Admin).unwrap().as_deref(), Some("/admin/dashboard"));
        assert_eq!(resolver.resolve(&Role::Developer).unwrap().as_deref(), Some("/user/dashboard"));
        assert_eq!(resolver.resolve(&Role::Tester).unwrap().as_deref(), Some("/user/dashboard"));
        assert_eq!(resolver.resolve(&Role::Other("guest".to_string())).unwrap(), None);
    }

    #[test]
    fn test_hint_is_one_shot() {
        let (hints, resolver) = resolver();
        hints.remember("/reports").unwrap();
        assert_eq!(hints.peek().unwrap().as_deref(), Some("/reports"));

        assert_eq!(resolver.resolve(&Role::Admin).unwrap().as_deref(), Some("/reports"));
        assert_eq!(hints.peek().unwrap(), None);

        // Second resolution falls through to the role
        assert_eq!(resolver.resolve(&Role::Admin).unwrap().as_deref(), Some("/admin/dashboard"));
    }

    #[test]
    fn test_hint_overrides_unmatched_role() {
        let (hints, resolver) = resolver();
        hints.remember("/tasks/42").unwrap();
        let role = Role::Other("guest".to_string());
        assert_eq!(resolver.resolve(&role).unwrap().as_deref(), Some("/tasks/42"));
    }

    #[test]
    fn test_empty_hint_is_consumed_and_ignored() {
        let (hints, resolver) = resolver();
        hints.remember("").unwrap();
        assert_eq!(resolver.resolve(&Role::Tester).unwrap().as_deref(), Some("/user/dashboard"));
        assert_eq!(hints.peek().unwrap(), None);
    }
}
