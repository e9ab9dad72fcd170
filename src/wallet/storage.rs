//! Key-Value Persistence
//!
//! The wallet session survives restarts through a single string key. Where
//! that key lives is up to the host:
//!
//! - `MemoryStore`: process memory (tests, demos)
//! - `FileStore`: a small JSON object on disk (the CLI)
//! - `BrowserStore`: `window.localStorage` (only with the `web` feature)

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::error::{StorageError, StorageResult};

/// Host-provided string storage
pub trait KeyValueStore: Send + Sync {
    /// Read a key; `None` when absent
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a key, replacing any previous value
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete a key; deleting an absent key is not an error
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Process-local storage
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StorageResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Storage backed by a JSON object file
///
/// The whole file is rewritten on every change; it only ever holds a handful
/// of keys.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> StorageResult<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, entries: &HashMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    fn update<F>(&self, f: F) -> StorageResult<()>
    where
        F: FnOnce(&mut HashMap<String, String>),
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;

        let mut entries = self.read_all()?;
        f(&mut entries);
        self.write_all(&entries)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

/// `window.localStorage`, looked up on every call
#[cfg(feature = "web")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStore;

#[cfg(feature = "web")]
impl BrowserStore {
    fn local_storage() -> StorageResult<web_sys::Storage> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;

        window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))
    }
}

#[cfg(feature = "web")]
impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Self::local_storage()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        Self::local_storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        Self::local_storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert_eq!(store.get("walletAddress").unwrap(), None);

        store.set("walletAddress", "neutron1abc").unwrap();
        assert_eq!(
            store.get("walletAddress").unwrap().as_deref(),
            Some("neutron1abc")
        );

        store.remove("walletAddress").unwrap();
        assert_eq!(store.get("walletAddress").unwrap(), None);

        // Removing twice is fine
        store.remove("walletAddress").unwrap();
    }

    #[test]
    fn test_file_store_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        {
            let store = FileStore::new(&path);
            store.set("walletAddress", "neutron1abc").unwrap();
            store.set("other", "value").unwrap();
        }

        let store = FileStore::new(&path);
        assert_eq!(
            store.get("walletAddress").unwrap().as_deref(),
            Some("neutron1abc")
        );

        store.remove("walletAddress").unwrap();
        assert_eq!(store.get("walletAddress").unwrap(), None);
        assert_eq!(store.get("other").unwrap().as_deref(), Some("value"));
    }

    #[test]
    fn test_file_store_missing_file() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent.json"));

        assert_eq!(store.get("walletAddress").unwrap(), None);
        store.remove("walletAddress").unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(
            store.get("walletAddress"),
            Err(StorageError::Serialization(_))
        ));
    }
}
