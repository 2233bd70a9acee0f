//! Local key-value storage the event store persists into.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::DayGridResult;

/// A string key-value store. Values are whole serialized documents.
pub trait Storage {
    /// Read the value under `key`. `Ok(None)` when nothing was stored yet.
    fn get(&self, key: &str) -> DayGridResult<Option<String>>;

    /// Replace the value under `key`.
    fn set(&mut self, key: &str, value: &str) -> DayGridResult<()>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> DayGridResult<Option<String>> {
        let path = self.path_for(key);

        if !path.exists() {
            return Ok(None);
        }

        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> DayGridResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        // Written to a hidden sibling first, then renamed into place.
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{}.json.tmp", key));

        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;

        log::debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

/// In-memory storage, used by tests and for throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one value.
    pub fn with(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.values.insert(key.to_string(), value.to_string());
        storage
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> DayGridResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> DayGridResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> DayGridResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> DayGridResult<()> {
        (**self).set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        assert_eq!(storage.get("calendarEvents").unwrap(), None);
    }

    #[test]
    fn file_storage_creates_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("nested/data"));

        storage.set("calendarEvents", "{}").unwrap();
        storage.set("calendarEvents", r#"{"a":1}"#).unwrap();

        assert_eq!(
            storage.get("calendarEvents").unwrap().as_deref(),
            Some(r#"{"a":1}"#)
        );
        assert!(storage.path_for("calendarEvents").exists());
        assert!(!storage.dir().join(".calendarEvents.json.tmp").exists());
    }

    #[test]
    fn memory_storage_round_trip() {
        let mut storage = MemoryStorage::with("k", "v1");
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v1"));

        storage.set("k", "v2").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(storage.get("other").unwrap(), None);
    }
}
