//! Key-value storage substrate for the history store.
//!
//! The history collection is one serialized value under one key. This module
//! defines the [`KeyValueStore`] trait the store is written against and two
//! implementations: an in-memory map with an optional quota, and a directory
//! of JSON files.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{EngineError, EngineResult};

/// A synchronous string key-value store.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> EngineResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String) -> EngineResult<()>;

    /// Deletes `key`. Deleting an absent key succeeds.
    fn remove(&mut self, key: &str) -> EngineResult<()>;
}

/// An in-memory store.
///
/// An optional quota caps the total bytes of all stored values, and `set`
/// fails with [`EngineError::QuotaExceeded`] once it would be exceeded.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    /// Creates an empty, unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store holding at most `quota_bytes` of values.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    fn used_bytes_excluding(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(_, v)| v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> EngineResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> EngineResult<()> {
        if let Some(limit) = self.quota_bytes {
            if self.used_bytes_excluding(key) + value.len() > limit {
                return Err(EngineError::QuotaExceeded {
                    key: key.to_string(),
                    limit,
                });
            }
        }
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> EngineResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A store keeping each key in `<dir>/<key>.json`.
///
/// Writes go to a temporary sibling file that is renamed into place, so a
/// reader never sees a half-written value.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Returns the directory values are stored in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> EngineResult<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(EngineError::InvalidStorageKey {
                key: key.to_string(),
            });
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> EngineResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(EngineError::StorageRead {
                key: key.to_string(),
                message: err.to_string(),
            }),
        }
    }

    fn set(&mut self, key: &str, value: String) -> EngineResult<()> {
        let path = self.path_for(key)?;
        let write_err = |err: std::io::Error| EngineError::StorageWrite {
            key: key.to_string(),
            message: err.to_string(),
        };

        fs::create_dir_all(&self.dir).map_err(write_err)?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value).map_err(write_err)?;
        fs::rename(&tmp_path, &path).map_err(write_err)?;

        tracing::debug!(key, path = %path.display(), "Wrote storage key");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> EngineResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(EngineError::StorageWrite {
                key: key.to_string(),
                message: err.to_string(),
            }),
        }
    }
}
