//! File-backed store.
//!
//! The whole store is one JSON object (`{"key": "value", ...}`). Writes take
//! an exclusive lock on a sibling `.lock` file, then replace the document
//! atomically through a temp file in the same directory. A document that is
//! not valid JSON reads as an error but is replaced on the next write.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;

use super::{KeyValueStore, StorageError};

/// Store persisted as a single JSON document on disk
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Path to the JSON document
    path: PathBuf,

    /// Path to the advisory lock file
    lock_path: PathBuf,
}

impl FileStore {
    /// Create a store at `path` (the file is created on first write)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut lock_name = path.clone().into_os_string();
        lock_name.push(".lock");

        Self {
            path,
            lock_path: PathBuf::from(lock_name),
        }
    }

    /// Get the path to the store document
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    /// Read every key-value pair
    pub fn read_document(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    /// Read, modify and atomically rewrite the document under the lock
    fn update<F>(&self, modify: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        fs::create_dir_all(self.directory())?;

        let lock = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&self.lock_path)?;
        lock.lock_exclusive().map_err(StorageError::Lock)?;

        let mut document = match self.read_document() {
            Ok(document) => document,
            Err(StorageError::Serialization(e)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Replacing unparseable store document"
                );
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        modify(&mut document);
        self.write_document(&document)?;

        tracing::debug!(path = %self.path.display(), keys = document.len(), "Store written");

        // Lock is released when the file is dropped
        drop(lock);
        Ok(())
    }

    fn write_document(&self, document: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let mut tmp = NamedTempFile::new_in(self.directory())?;
        serde_json::to_writer_pretty(&mut tmp, document)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut document = self.read_document()?;
        Ok(document.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|doc| {
            doc.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|doc| {
            doc.remove(key);
        })
    }
}
