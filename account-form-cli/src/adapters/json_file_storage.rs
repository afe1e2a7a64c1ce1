//! JSON file key-value storage
//!
//! Keeps every key in one JSON object file, similar to a browser's local
//! storage: `{ "<key>": "<string value>", ... }`.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use account_form_core::error::{CoreError, CoreResult};
use account_form_core::traits::KeyValueStorage;

const MAX_STORE_FILE_SIZE: u64 = 10 * 1024 * 1024; // 10MB

type Entries = BTreeMap<String, String>;

/// File-backed key-value storage
///
/// A missing file reads as an empty store; the file and its parent
/// directory are created on the first write.
pub struct JsonFileStorage {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl JsonFileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> CoreResult<Entries> {
        let metadata = match std::fs::metadata(&self.path) {
            Ok(m) => m,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Store file does not exist: {}", self.path.display());
                return Ok(Entries::new());
            }
            Err(e) => {
                return Err(CoreError::StorageError(format!(
                    "Failed to read store file metadata: {e}"
                )))
            }
        };

        if metadata.len() > MAX_STORE_FILE_SIZE {
            return Err(CoreError::StorageError(format!(
                "Store file too large: {} bytes (max: {} bytes)",
                metadata.len(),
                MAX_STORE_FILE_SIZE
            )));
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| CoreError::StorageError(format!("Failed to read store file: {e}")))?;
        if content.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&content)
            .map_err(|e| CoreError::SerializationError(format!("Invalid store format: {e}")))
    }

    /// Load entries ahead of a write
    ///
    /// A store file that no longer parses is moved to `<file>.bak` and the
    /// write starts from an empty store.
    fn load_for_write(&self) -> CoreResult<Entries> {
        match self.load() {
            Err(CoreError::SerializationError(e)) => {
                let backup = self.backup_path();
                std::fs::rename(&self.path, &backup).map_err(|err| {
                    CoreError::StorageError(format!(
                        "Failed to move corrupt store file to {}: {err}",
                        backup.display()
                    ))
                })?;
                log::warn!(
                    "Store file {} is corrupt ({e}), moved to {}",
                    self.path.display(),
                    backup.display()
                );
                Ok(Entries::new())
            }
            other => other,
        }
    }

    /// Path the corrupt store file is moved to
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".bak");
        PathBuf::from(name)
    }

    fn save(&self, entries: &Entries) -> CoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                CoreError::StorageError(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }

        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)
            .map_err(|e| CoreError::StorageError(format!("Failed to write store file: {e}")))
    }

    fn locked<T>(&self, f: impl FnOnce() -> CoreResult<T>) -> CoreResult<T> {
        let _guard = self
            .lock
            .lock()
            .map_err(|e| CoreError::StorageError(format!("Storage lock poisoned: {e}")))?;
        f()
    }
}

impl KeyValueStorage for JsonFileStorage {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        self.locked(|| Ok(self.load()?.remove(key)))
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        self.locked(|| {
            let mut entries = self.load_for_write()?;
            entries.insert(key.to_string(), value.to_string());
            self.save(&entries)?;
            log::debug!("Wrote {} bytes under {key}", value.len());
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        self.locked(|| {
            let mut entries = self.load_for_write()?;
            if entries.remove(key).is_some() {
                self.save(&entries)?;
            }
            Ok(())
        })
    }
}
