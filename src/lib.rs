//! bookshelf - Personal book tracker
//!
//! Keeps an ordered list of books (title, author, pages, read status) and
//! persists it to a local key-value store after every change.
//!
//! # Architecture
//!
//! - The library is an in-memory ordered collection keyed by exact title
//! - A persistence bridge saves full snapshots under one well-known key
//! - A session hydrates the library at startup and writes through on change
//!
//! # Modules
//!
//! - `domain`: Data structures (Book, Command, Outcome)
//! - `library`: The in-memory collection
//! - `storage`: Key-value stores (memory, file)
//! - `core`: Persistence bridge and session
//! - `config`: Store location and key resolution
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Add a book
//! bookshelf add "Dune" --author "Frank Herbert" --pages 412
//!
//! # Toggle read status
//! bookshelf toggle "Dune"
//!
//! # List books as cards
//! bookshelf list --cards
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod library;
pub mod storage;

// Re-export main types at crate root for convenience
pub use crate::core::{Hydration, LoadError, PersistenceBridge, Session};
pub use domain::{Book, Command, Outcome, Pages};
pub use library::Library;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
