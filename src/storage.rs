//! Durable local key-value storage for the UI side.
//!
//! String keys and string values that survive restarts. Only the UI state
//! container writes here. The file-backed store keeps the whole map in memory
//! and rewrites `local_storage.json` on every mutation.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

pub const STORAGE_KEY_LANGUAGE: &str = "language";
pub const STORAGE_KEY_THEME: &str = "theme";
pub const STORAGE_KEY_USER: &str = "user";

const STORAGE_FILE: &str = "local_storage.json";

/// String key-value store.
///
/// Reads never fail: a missing or unreadable entry is `None`. Writes report
/// errors so callers can log them.
pub trait Storage: Send {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Volatile store. Used in tests and when no data directory exists.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

/// JSON-object file store.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open (or lazily create) the store inside `dir`.
    ///
    /// A corrupt or unreadable file is logged and treated as empty; it is
    /// replaced on the next write.
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(STORAGE_FILE);
        let items = match read_items(&path) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("{}; starting with empty local storage", e);
                BTreeMap::new()
            }
        };
        Self { path, items }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Undo an in-memory change whose write failed, so reads match the file.
    fn restore(&mut self, key: &str, previous: Option<String>) {
        match previous {
            Some(value) => self.items.insert(key.to_string(), value),
            None => self.items.remove(key),
        };
    }

    fn persist(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let object: Map<String, Value> = self
            .items
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        let serialized = serde_json::to_string_pretty(&Value::Object(object))?;
        fs::write(&self.path, serialized).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

fn read_items(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(source) => {
            return Err(StorageError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let corrupt = |reason: String| StorageError::Corrupt {
        path: path.to_path_buf(),
        reason,
    };
    let parsed: Value = serde_json::from_str(&raw).map_err(|e| corrupt(e.to_string()))?;
    let Value::Object(map) = parsed else {
        return Err(corrupt("root is not an object".into()));
    };

    // Non-string values are not something setItem could have produced; skip them.
    Ok(map
        .into_iter()
        .filter_map(|(k, v)| match v {
            Value::String(s) => Some((k, s)),
            _ => None,
        })
        .collect())
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let previous = self.items.insert(key.to_string(), value.to_string());
        self.persist().inspect_err(|_| self.restore(key, previous))
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let Some(previous) = self.items.remove(key) else {
            return Ok(());
        };
        self.persist().inspect_err(|_| self.restore(key, Some(previous)))
    }
}

/// Open the platform store, or a volatile one if there is nowhere to write.
pub fn open_default(data_dir: Option<&Path>) -> Box<dyn Storage> {
    match data_dir {
        Some(dir) => Box::new(FileStorage::open(dir)),
        None => {
            tracing::warn!("no data directory; local storage will not survive restart");
            Box::new(MemoryStorage::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get_item(STORAGE_KEY_THEME), None);
        storage.set_item(STORAGE_KEY_THEME, "dark").unwrap();
        assert_eq!(storage.get_item(STORAGE_KEY_THEME).as_deref(), Some("dark"));
        storage.remove_item(STORAGE_KEY_THEME).unwrap();
        assert_eq!(storage.get_item(STORAGE_KEY_THEME), None);
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        {
            let mut storage = FileStorage::open(tmp.path());
            storage.set_item(STORAGE_KEY_LANGUAGE, "zh").unwrap();
            storage.set_item(STORAGE_KEY_USER, r#"{"username":"alice"}"#).unwrap();
            storage.remove_item(STORAGE_KEY_USER).unwrap();
        }
        let storage = FileStorage::open(tmp.path());
        assert_eq!(storage.get_item(STORAGE_KEY_LANGUAGE).as_deref(), Some("zh"));
        assert_eq!(storage.get_item(STORAGE_KEY_USER), None);
    }

    #[test]
    fn test_file_storage_missing_dir_is_created_on_write() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");
        let mut storage = FileStorage::open(&nested);
        assert_eq!(storage.get_item(STORAGE_KEY_THEME), None);
        storage.set_item(STORAGE_KEY_THEME, "light").unwrap();
        assert!(storage.path().exists());
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(STORAGE_FILE), "not json at all").unwrap();
        let mut storage = FileStorage::open(tmp.path());
        assert_eq!(storage.get_item(STORAGE_KEY_THEME), None);

        // Next write replaces the broken file
        storage.set_item(STORAGE_KEY_THEME, "dark").unwrap();
        let reopened = FileStorage::open(tmp.path());
        assert_eq!(reopened.get_item(STORAGE_KEY_THEME).as_deref(), Some("dark"));
    }

    #[test]
    fn test_non_string_values_are_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join(STORAGE_FILE),
            r#"{"theme": "dark", "count": 3}"#,
        )
        .unwrap();
        let storage = FileStorage::open(tmp.path());
        assert_eq!(storage.get_item("theme").as_deref(), Some("dark"));
        assert_eq!(storage.get_item("count"), None);
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "a file, not a directory").unwrap();

        // The parent of the store is a regular file, so every write fails
        let mut storage = FileStorage::open(&blocker.join("store"));
        storage.items.insert(STORAGE_KEY_USER.into(), "alice".into());

        assert!(storage.set_item(STORAGE_KEY_THEME, "dark").is_err());
        assert_eq!(storage.get_item(STORAGE_KEY_THEME), None);

        assert!(storage.set_item(STORAGE_KEY_USER, "bob").is_err());
        assert_eq!(storage.get_item(STORAGE_KEY_USER).as_deref(), Some("alice"));

        assert!(storage.remove_item(STORAGE_KEY_USER).is_err());
        assert_eq!(storage.get_item(STORAGE_KEY_USER).as_deref(), Some("alice"));
    }
}
