//! User actions against a library and their results.

use super::book::Book;

/// A user action dispatched to the library
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Add a book unless its title is already present
    Add(Book),

    /// Remove every book with this exact title
    Remove(String),

    /// Flip the read flag of the first book with this exact title
    ToggleRead(String),
}

impl Command {
    /// Title the command refers to
    pub fn title(&self) -> &str {
        match self {
            Command::Add(book) => &book.title,
            Command::Remove(title) | Command::ToggleRead(title) => title,
        }
    }
}

/// What a command did to the library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Book appended
    Added,

    /// Add rejected because the title already exists
    Duplicate,

    /// Number of records removed (zero when nothing matched)
    Removed(usize),

    /// Read flag flipped to the given value
    Toggled { is_read: bool },

    /// No book with that title
    NotFound,
}

impl Outcome {
    /// Whether the library contents may have changed and should be saved
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Outcome::Duplicate | Outcome::NotFound)
    }
}
