//! Persistence bridge between a [`Library`] and a key-value store.
//!
//! Every save is a full snapshot: the ordered book list encoded as a JSON
//! array under one well-known key.

use thiserror::Error;

use crate::domain::Book;
use crate::library::Library;
use crate::storage::{KeyValueStore, StorageError};

/// Key the library is stored under
pub const LIBRARY_KEY: &str = "library";

/// Why persisted state could not be loaded
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read store")]
    Storage(#[from] StorageError),

    #[error("Stored library is malformed")]
    Malformed(#[from] serde_json::Error),
}

/// Loads and saves a library through a key-value store
#[derive(Debug)]
pub struct PersistenceBridge<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PersistenceBridge<S> {
    /// Create a bridge using the default key
    pub fn new(store: S) -> Self {
        Self::with_key(store, LIBRARY_KEY)
    }

    /// Create a bridge storing under a custom key
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write the whole library, replacing any prior value
    pub fn save(&mut self, library: &Library) -> Result<(), StorageError> {
        let encoded = encode(library.books())?;
        self.store.set(&self.key, &encoded)?;

        tracing::debug!(key = %self.key, books = library.count(), "Library saved");
        Ok(())
    }

    /// Read the stored books.
    ///
    /// An absent key (or a stored `null`) is an empty library, not an error.
    pub fn load(&self) -> Result<Vec<Book>, LoadError> {
        match self.store.get(&self.key)? {
            Some(raw) => {
                let books = decode(&raw)?;
                tracing::debug!(key = %self.key, books = books.len(), "Library loaded");
                Ok(books)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Read the stored books, treating any failure as "no data"
    pub fn load_or_empty(&self) -> Vec<Book> {
        self.load().unwrap_or_else(|e| {
            tracing::warn!(key = %self.key, error = %describe(e), "Discarding unreadable library");
            Vec::new()
        })
    }
}

/// Render a load error with its causes on one line
pub fn describe(error: LoadError) -> String {
    format!("{:#}", anyhow::Error::new(error))
}

/// Encode books as the persisted JSON array
pub fn encode(books: &[Book]) -> Result<String, serde_json::Error> {
    serde_json::to_string(books)
}

/// Decode a persisted JSON array back into books
pub fn decode(raw: &str) -> Result<Vec<Book>, serde_json::Error> {
    let books: Option<Vec<Book>> = serde_json::from_str(raw)?;
    Ok(books.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn sample() -> Library {
        Library::from_books(vec![
            Book::new("Dune", "Herbert", 412u64, false),
            Book::new("Emma", "Austen", "474", true),
        ])
    }

    #[test]
    fn test_load_absent_is_empty() {
        let bridge = PersistenceBridge::new(MemoryStore::new());
        assert!(bridge.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let mut bridge = PersistenceBridge::new(MemoryStore::new());
        let library = sample();

        bridge.save(&library).unwrap();
        assert_eq!(bridge.load().unwrap(), library.books());
    }

    #[test]
    fn test_saved_layout() {
        let mut bridge = PersistenceBridge::new(MemoryStore::new());
        bridge.save(&sample()).unwrap();

        let raw = bridge.store().get(LIBRARY_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {"title": "Dune", "author": "Herbert", "pages": 412, "isRead": false},
                {"title": "Emma", "author": "Austen", "pages": "474", "isRead": true}
            ])
        );
    }

    #[test]
    fn test_null_value_is_empty() {
        let mut store = MemoryStore::new();
        store.set(LIBRARY_KEY, "null").unwrap();

        let bridge = PersistenceBridge::new(store);
        assert!(bridge.load().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_value_is_reported() {
        for raw in ["{not json", r#"{"title": "Dune"}"#, r#"[{"title": 5}]"#, "42"] {
            let mut store = MemoryStore::new();
            store.set(LIBRARY_KEY, raw).unwrap();

            let bridge = PersistenceBridge::new(store);
            assert!(
                matches!(bridge.load(), Err(LoadError::Malformed(_))),
                "expected malformed error for {raw}"
            );
            assert!(bridge.load_or_empty().is_empty());
        }
    }

    #[test]
    fn test_error_cause_printed_once() {
        let mut store = MemoryStore::new();
        store.set(LIBRARY_KEY, "[{oops").unwrap();

        let err = PersistenceBridge::new(store).load().unwrap_err();
        assert_eq!(err.to_string(), "Stored library is malformed");

        let described = describe(err);
        assert!(described.starts_with("Stored library is malformed: "));
        assert_eq!(described.matches("line 1").count(), 1);
    }

    #[test]
    fn test_custom_key() {
        let mut bridge = PersistenceBridge::with_key(MemoryStore::new(), "shelf");
        bridge.save(&sample()).unwrap();

        assert_eq!(bridge.key(), "shelf");
        assert!(bridge.store().get(LIBRARY_KEY).unwrap().is_none());
        assert_eq!(bridge.load().unwrap().len(), 2);
    }
}
