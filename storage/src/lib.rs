//! # Barwaqo Storage
//!
//! Durable local key-value storage for the storefront state mirrors.
//!
//! This is the Rust counterpart of browser `localStorage`: a small set of
//! named slots holding JSON-serialized state that survives a process
//! restart. The persisted format is the direct JSON encoding of the state
//! shapes - no version field, no migration path.
//!
//! Two backends are provided:
//!
//! - [`FileStorage`]: one `<key>.json` file per slot under a root directory,
//!   written through a temp file + rename so a crash cannot truncate a slot
//! - [`MemoryStorage`]: a `HashMap` behind a lock, for tests and demos
//!
//! Persisted data is treated as untrusted input: [`hydrate`] validates the
//! stored value against the expected shape and falls back to the default
//! state on any mismatch.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Storage slot for the shopping cart state.
pub const CART_KEY: &str = "barwaqo_cart";

/// Storage slot for the wishlist state.
pub const WISHLIST_KEY: &str = "barwaqo_wishlist";

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur while reading or writing a storage slot.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Underlying I/O failure (missing directory, quota, permissions).
    #[error("storage I/O failed for key '{key}': {source}")]
    Io {
        /// Slot key involved in the failed operation
        key: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The value could not be serialized to JSON.
    #[error("failed to serialize value for key '{key}': {source}")]
    Serialize {
        /// Slot key involved in the failed operation
        key: String,
        /// Underlying serde error
        #[source]
        source: serde_json::Error,
    },

    /// The stored bytes are not valid JSON.
    ///
    /// Note: a *valid* JSON document of the wrong shape is not an error at
    /// this layer; shape validation happens in [`hydrate`].
    #[error("stored value for key '{key}' is not valid JSON: {source}")]
    Corrupt {
        /// Slot key whose stored bytes are malformed
        key: String,
        /// Underlying serde error
        #[source]
        source: serde_json::Error,
    },
}

/// A durable key-value store holding JSON documents.
///
/// Implementations must be safe to share across tasks; the store runtime
/// wraps them in an `Arc`.
pub trait Storage: Send + Sync {
    /// Load the JSON document stored under `key`.
    ///
    /// Returns `Ok(None)` when the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] on read failure and
    /// [`StorageError::Corrupt`] when the slot holds malformed JSON.
    fn load(&self, key: &str) -> Result<Option<serde_json::Value>>;

    /// Overwrite the slot `key` with `value`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] on write failure.
    fn store(&self, key: &str, value: &serde_json::Value) -> Result<()>;

    /// Delete the slot `key`. Removing an absent slot is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] on delete failure.
    fn remove(&self, key: &str) -> Result<()>;
}

/// File-backed storage: one `<key>.json` file per slot.
#[derive(Debug)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create a file-backed store rooted at `root`, creating the directory
    /// if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the root directory cannot be created.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|source| StorageError::Io {
            key: root.display().to_string(),
            source,
        })?;
        Ok(Self { root })
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<serde_json::Value>> {
        let path = self.slot_path(key);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::Io {
                    key: key.to_string(),
                    source,
                });
            },
        };

        let value = serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupt {
            key: key.to_string(),
            source,
        })?;
        Ok(Some(value))
    }

    fn store(&self, key: &str, value: &serde_json::Value) -> Result<()> {
        let bytes = serde_json::to_vec(value).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;

        // Write-then-rename keeps the slot intact if the process dies
        // mid-write.
        let path = self.slot_path(key);
        let tmp = self.root.join(format!("{key}.json.tmp"));
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };
        std::fs::write(&tmp, bytes).map_err(io_err)?;
        std::fs::rename(&tmp, &path).map_err(io_err)?;

        tracing::debug!(key, path = %path.display(), "persisted storage slot");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.slot_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

/// In-memory storage for tests and demos.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RwLock<HashMap<String, serde_json::Value>>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    ///
    /// # Panics
    ///
    /// Panics if the inner lock is poisoned.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn len(&self) -> usize {
        self.slots.read().unwrap().len()
    }

    /// Whether no slot has been written.
    ///
    /// # Panics
    ///
    /// Panics if the inner lock is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[allow(clippy::unwrap_used)] // lock poisoning only follows a panic elsewhere
impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<serde_json::Value>> {
        Ok(self.slots.read().unwrap().get(key).cloned())
    }

    fn store(&self, key: &str, value: &serde_json::Value) -> Result<()> {
        self.slots
            .write()
            .unwrap()
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.slots.write().unwrap().remove(key);
        Ok(())
    }
}

/// Rehydrate a state value from its storage slot.
///
/// Durable storage is untrusted: a missing slot, malformed JSON, or a valid
/// JSON document of the wrong shape all fall back to `S::default()` with a
/// warning, never an error. This is the process-start path, so a corrupted
/// slot must not prevent the application from coming up.
pub fn hydrate<S>(storage: &dyn Storage, key: &str) -> S
where
    S: DeserializeOwned + Default,
{
    let value = match storage.load(key) {
        Ok(Some(value)) => value,
        Ok(None) => return S::default(),
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to read storage slot, starting empty");
            return S::default();
        },
    };

    match serde_json::from_value(value) {
        Ok(state) => state,
        Err(err) => {
            tracing::warn!(key, error = %err, "persisted state has unexpected shape, starting empty");
            S::default()
        },
    }
}

/// Serialize `state` and write it to its storage slot.
///
/// # Errors
///
/// Returns [`StorageError::Serialize`] if the state cannot be encoded and
/// [`StorageError::Io`] if the backend write fails.
pub fn persist<S>(storage: &dyn Storage, key: &str, state: &S) -> Result<()>
where
    S: Serialize,
{
    let value = serde_json::to_value(state).map_err(|source| StorageError::Serialize {
        key: key.to_string(),
        source,
    })?;
    storage.store(key, &value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        items: Vec<String>,
        total: u64,
    }

    #[test]
    fn memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        let state = Sample {
            items: vec!["mango".to_string()],
            total: 1,
        };

        persist(&storage, CART_KEY, &state).unwrap();
        let loaded: Sample = hydrate(&storage, CART_KEY);
        assert_eq!(loaded, state);
    }

    #[test]
    fn hydrate_missing_slot_is_default() {
        let storage = MemoryStorage::new();
        let loaded: Sample = hydrate(&storage, WISHLIST_KEY);
        assert_eq!(loaded, Sample::default());
    }

    #[test]
    fn hydrate_wrong_shape_falls_back_to_default() {
        let storage = MemoryStorage::new();
        storage
            .store(CART_KEY, &serde_json::json!({"totally": "unrelated"}))
            .unwrap();

        let loaded: Sample = hydrate(&storage, CART_KEY);
        assert_eq!(loaded, Sample::default());
    }

    #[test]
    fn remove_missing_slot_is_noop() {
        let storage = MemoryStorage::new();
        storage.remove("nope").unwrap();
    }

    #[test]
    fn file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        let state = Sample {
            items: vec!["banana".to_string(), "papaya".to_string()],
            total: 2,
        };

        persist(&storage, CART_KEY, &state).unwrap();
        let loaded: Sample = hydrate(&storage, CART_KEY);
        assert_eq!(loaded, state);

        storage.remove(CART_KEY).unwrap();
        assert!(storage.load(CART_KEY).unwrap().is_none());
    }

    #[test]
    fn file_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let state = Sample {
            items: vec!["lime".to_string()],
            total: 1,
        };

        {
            let storage = FileStorage::new(dir.path()).unwrap();
            persist(&storage, WISHLIST_KEY, &state).unwrap();
        }

        let storage = FileStorage::new(dir.path()).unwrap();
        let loaded: Sample = hydrate(&storage, WISHLIST_KEY);
        assert_eq!(loaded, state);
    }

    #[test]
    fn file_storage_corrupt_slot_reports_and_hydrates_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        std::fs::write(dir.path().join(format!("{CART_KEY}.json")), b"{not json").unwrap();

        assert!(matches!(
            storage.load(CART_KEY),
            Err(StorageError::Corrupt { .. })
        ));

        let loaded: Sample = hydrate(&storage, CART_KEY);
        assert_eq!(loaded, Sample::default());
    }
}
