//! String-keyed local storage abstract Trait

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{CoreError, CoreResult};

/// Local key-value storage Trait
///
/// Synchronous, string in and string out. No transactional guarantees are
/// assumed; the caller owns its key exclusively.
///
/// Platform implementation:
/// - Embedded / tests: `InMemoryStorage`
/// - CLI: `JsonFileStorage` (one JSON object file per data directory)
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// # Returns
    /// * `Ok(Some(value))` - key exists
    /// * `Ok(None)` - key does not exist
    fn get(&self, key: &str) -> CoreResult<Option<String>>;

    /// Store `value` under `key`, overwriting any previous value
    fn set(&self, key: &str, value: &str) -> CoreResult<()>;

    /// Delete `key` (no-op if absent)
    fn remove(&self, key: &str) -> CoreResult<()>;
}

/// In-memory key-value storage
///
/// Default implementation, available on all platforms.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryStorage {
    /// Create an empty storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-seeded with one entry
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        if let Ok(mut entries) = storage.entries.write() {
            entries.insert(key.to_string(), value.to_string());
        }
        storage
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> CoreError {
    CoreError::StorageError(format!("Storage lock poisoned: {e}"))
}

impl KeyValueStorage for InMemoryStorage {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.entries.read().map_err(poisoned)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        self.entries
            .write()
            .map_err(poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        self.entries.write().map_err(poisoned)?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_missing_key_is_none() {
        let storage = InMemoryStorage::new();
        assert_eq!(storage.get("nothing").unwrap(), None);
    }

    #[test]
    fn set_overwrites_previous_value() {
        let storage = InMemoryStorage::with_entry("k", "old");
        storage.set("k", "new").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn remove_deletes_key() {
        let storage = InMemoryStorage::with_entry("k", "v");
        storage.remove("k").unwrap();
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }
}
