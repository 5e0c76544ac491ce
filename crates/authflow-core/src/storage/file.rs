use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use super::{KeyValueStore, StorageError, StoredValue};

type Entries = BTreeMap<String, StoredValue>;

/// Durable store backed by a single JSON file.
///
/// The whole map is rewritten on every mutation. In-memory state only
/// changes once the write has succeeded, so a failed write leaves both
/// the file and the store as they were.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<Entries>,
}

impl FileStore {
    /// Open the store at `path`, loading existing entries if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            Entries::new()
        };
        debug!(path = %path.display(), count = entries.len(), "Storage file opened");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self, entries: &Entries) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn entry(&self, key: &str) -> Result<Option<StoredValue>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.lock();
        let mut updated = entries.clone();
        updated.insert(key.to_string(), StoredValue::new(value));
        self.write(&updated)?;
        *entries = updated;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut entries = self.lock();
        if !entries.contains_key(key) {
            return Ok(None);
        }
        let mut updated = entries.clone();
        let removed = updated.remove(key).map(|e| e.value);
        self.write(&updated)?;
        *entries = updated;
        Ok(removed)
    }
}
