//! Key-value storage backends for session state.
//!
//! Two lifetimes are modelled:
//! - `FileStore`: durable storage that survives restarts (the browser's
//!   local storage equivalent). Holds the session token and expired flag.
//! - `MemoryStore`: ephemeral storage scoped to the running process (the
//!   tab-scoped session storage equivalent). Holds the redirect hint.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// A stored string value and the time it was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredValue {
    pub value: String,
    pub stored_at: DateTime<Utc>,
}

impl StoredValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            stored_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.stored_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Also covers clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            format!("{}h ago", minutes / 60)
        } else {
            format!("{}d ago", minutes / 1440)
        }
    }
}

/// String key-value storage shared between the login flow and the rest of
/// the application.
pub trait KeyValueStore: Send + Sync {
    /// Full entry for `key`, including its write time.
    fn entry(&self, key: &str) -> Result<Option<StoredValue>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`, returning the value it held.
    fn remove(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entry(key)?.map(|e| e.value))
    }

    fn contains(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.entry(key)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_stored_value_age_display_just_now() {
        let stored = StoredValue::new("abc");
        assert_eq!(stored.age_display(), "just now");
    }

    #[test]
    fn test_stored_value_age_display_units() {
        let mut stored = StoredValue::new("abc");

        stored.stored_at = Utc::now() - Duration::minutes(5);
        assert_eq!(stored.age_display(), "5m ago");

        stored.stored_at = Utc::now() - Duration::minutes(150);
        assert_eq!(stored.age_display(), "2h ago");

        stored.stored_at = Utc::now() - Duration::days(3);
        assert_eq!(stored.age_display(), "3d ago");
    }

    #[test]
    fn test_stored_value_future_timestamp() {
        let mut stored = StoredValue::new("abc");
        stored.stored_at = Utc::now() + Duration::minutes(10);
        assert_eq!(stored.age_display(), "just now");
    }
}
