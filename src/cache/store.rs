//! Durable string key/value stores
//!
//! The verdict cache keeps its whole table under one versioned key, so a
//! store only needs `get` and `set`.

use crate::error::CacheError;
use rustc_hash::FxHashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tempfile::NamedTempFile;

/// Persistent string-keyed, string-valued storage
pub trait DurableStore: Send + Sync {
    /// Read a value, `Ok(None)` if the key was never written
    ///
    /// # Errors
    /// Returns `CacheError` if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Replace the value stored under `key`
    ///
    /// # Errors
    /// Returns `CacheError` if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;
}

/// One file per key inside a directory, replaced atomically on write
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Platform cache directory for the oracle, if the platform has one
    #[must_use]
    pub fn default_dir() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join("wordle-oracle"))
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{file_name}.json"))
    }
}

impl DurableStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        fs::create_dir_all(&self.dir)?;

        // Write beside the target, then rename over it
        let mut temp_file = NamedTempFile::new_in(&self.dir)?;
        temp_file.write_all(value.as_bytes())?;
        temp_file.flush()?;
        temp_file
            .persist(self.path_for(key))
            .map_err(|e| CacheError::Io(e.error))?;
        Ok(())
    }
}

/// In-process store, handy for tests and for running without a disk cache
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<FxHashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DurableStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
