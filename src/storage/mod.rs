//! Key-value storage for persisted state.
//!
//! Values are opaque strings, the way browser local storage holds them. The
//! persistence bridge decides what goes inside.

use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors that can occur reading or writing a store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Store I/O failed")]
    Io(#[from] std::io::Error),

    #[error("Store document serialization failed")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to acquire store lock")]
    Lock(#[source] std::io::Error),
}

/// A durable string-to-string slot map
pub trait KeyValueStore {
    /// Read the value under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any prior value
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key` (no error if absent)
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}
