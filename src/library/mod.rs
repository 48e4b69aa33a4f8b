//! Book library management.
//!
//! The library is an ordered list of books keyed by exact title. It is held
//! in memory for one session and persisted as a whole after every change.
//!
//! # Storage Layout
//!
//! ```text
//! ~/.bookshelf/
//! ├── store.json        # Key-value document ({"library": "<json array>"})
//! └── store.json.lock   # Advisory write lock
//! ```

pub mod collection;

pub use collection::Library;
