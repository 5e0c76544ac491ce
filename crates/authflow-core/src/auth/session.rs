use std::sync::Arc;

use tracing::debug;

use crate::storage::{KeyValueStore, StorageError, StoredValue};

/// Durable key holding the session token. Its presence means "signed in".
pub const TOKEN_KEY: &str = "token";

/// Durable key set when a previous session was found to be expired.
pub const SESSION_EXPIRED_KEY: &str = "sessionExpired";

/// Session token and expired flag, kept in durable storage.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Persist the token for a freshly authenticated session
    pub fn set_token(&self, token: &str) -> Result<(), StorageError> {
        self.store.set(TOKEN_KEY, token)?;
        debug!("Session token saved");
        Ok(())
    }

    pub fn token(&self) -> Result<Option<String>, StorageError> {
        self.store.get(TOKEN_KEY)
    }

    /// Token entry with the time it was saved
    pub fn token_entry(&self) -> Result<Option<StoredValue>, StorageError> {
        self.store.entry(TOKEN_KEY)
    }

    pub fn is_authenticated(&self) -> Result<bool, StorageError> {
        self.store.contains(TOKEN_KEY)
    }

    pub fn is_expired(&self) -> Result<bool, StorageError> {
        self.store.contains(SESSION_EXPIRED_KEY)
    }

    pub fn clear_expired_flag(&self) -> Result<(), StorageError> {
        if self.store.remove(SESSION_EXPIRED_KEY)?.is_some() {
            debug!("Session expired flag cleared");
        }
        Ok(())
    }

    /// Drop the token and remember that the session ended by expiring
    pub fn mark_expired(&self) -> Result<(), StorageError> {
        self.store.remove(TOKEN_KEY)?;
        self.store.set(SESSION_EXPIRED_KEY, "true")?;
        debug!("Session marked expired");
        Ok(())
    }

    /// Sign out: remove the token and any expired flag
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(SESSION_EXPIRED_KEY)?;
        Ok(())
    }
}
