// store.rs — BlobStore trait and its file/memory implementations.
//
// The store is a dumb key-value slot for the roster blob: it reads and
// writes strings and does no validation. Repair happens in
// `EventState::rehydrate`.
//
// JsonFileStore keeps one file per storage key: `<store_dir>/<key>.json`.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CheckInError;

/// Persistence for the serialized roster.
pub trait BlobStore {
    /// Read the stored blob, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<String>, CheckInError>;

    /// Replace the stored blob.
    fn save(&self, blob: &str) -> Result<(), CheckInError>;

    /// Forget the stored blob. Returns whether anything was removed.
    fn clear(&self) -> Result<bool, CheckInError>;
}

/// File-backed store: one JSON file per storage key.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for `storage_key` under `store_dir`.
    /// Creates the directory if it doesn't exist.
    pub fn new(store_dir: impl AsRef<Path>, storage_key: &str) -> Result<Self, CheckInError> {
        let store_dir = store_dir.as_ref();
        fs::create_dir_all(store_dir).map_err(|source| CheckInError::IoError {
            path: store_dir.display().to_string(),
            source,
        })?;
        Ok(Self {
            path: store_dir.join(format!("{}.json", storage_key)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BlobStore for JsonFileStore {
    fn load(&self) -> Result<Option<String>, CheckInError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let blob = fs::read_to_string(&self.path).map_err(|source| CheckInError::IoError {
            path: self.path.display().to_string(),
            source,
        })?;
        Ok(Some(blob))
    }

    fn save(&self, blob: &str) -> Result<(), CheckInError> {
        fs::write(&self.path, blob).map_err(|source| CheckInError::IoError {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn clear(&self) -> Result<bool, CheckInError> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path).map_err(|source| CheckInError::IoError {
            path: self.path.display().to_string(),
            source,
        })?;
        Ok(true)
    }
}

/// In-process store, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with `blob`.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: RefCell::new(Some(blob.into())),
        }
    }
}

impl BlobStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, CheckInError> {
        Ok(self.blob.borrow().clone())
    }

    fn save(&self, blob: &str) -> Result<(), CheckInError> {
        *self.blob.borrow_mut() = Some(blob.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<bool, CheckInError> {
        Ok(self.blob.borrow_mut().take().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_before_save_is_none() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data"), "roster").unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data"), "roster").unwrap();
        store.save("{\"checkIns\":[],\"celebrated\":false}").unwrap();

        assert!(store.path().ends_with("data/roster.json"));
        assert_eq!(
            store.load().unwrap().as_deref(),
            Some("{\"checkIns\":[],\"celebrated\":false}")
        );
    }

    #[test]
    fn keys_are_isolated() {
        let dir = tempdir().unwrap();
        let a = JsonFileStore::new(dir.path(), "a").unwrap();
        let b = JsonFileStore::new(dir.path(), "b").unwrap();
        a.save("one").unwrap();
        assert!(b.load().unwrap().is_none());
    }

    #[test]
    fn store_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let store = JsonFileStore::new(dir.path(), "roster").unwrap();
            store.save("persisted").unwrap();
        }
        let store = JsonFileStore::new(dir.path(), "roster").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("persisted"));
    }

    #[test]
    fn clear_removes_file() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path(), "roster").unwrap();
        assert!(!store.clear().unwrap());
        store.save("x").unwrap();
        assert!(store.clear().unwrap());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn memory_store_behaves_like_a_slot() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
        store.save("a").unwrap();
        store.save("b").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("b"));
        assert!(store.clear().unwrap());
        assert!(MemoryStore::with_blob("z").load().unwrap().is_some());
    }
}
