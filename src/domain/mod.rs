//! Domain types for bookshelf.
//!
//! This module contains the core data structures:
//! - Book: A tracked title with author, page count and read status
//! - Command: User actions dispatched to a library, and their outcomes

pub mod book;
pub mod command;

// Re-export commonly used types
pub use book::{Book, Pages};
pub use command::{Command, Outcome};
