//! Ordered, in-memory collection of books.
//!
//! Insertion order is display order. Titles are the lookup key; uniqueness is
//! checked by [`Library::apply`] before adding, not by the collection itself.

use crate::domain::{Book, Command, Outcome};

/// Collection of books for one session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Library {
    books: Vec<Book>,
}

impl Library {
    /// Create a new empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a library holding the given books in order
    pub fn from_books(books: Vec<Book>) -> Self {
        Self { books }
    }

    /// Append a book (no duplicate check)
    pub fn add(&mut self, book: Book) {
        self.books.push(book);
    }

    /// All books whose title exactly matches
    pub fn find<'a>(&'a self, title: &'a str) -> impl Iterator<Item = &'a Book> + 'a {
        self.books.iter().filter(move |b| b.title == title)
    }

    /// First book whose title exactly matches
    pub fn first(&self, title: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.title == title)
    }

    /// Remove every book with this title, keeping the order of the rest.
    ///
    /// Returns how many records were removed.
    pub fn remove(&mut self, title: &str) -> usize {
        let before = self.books.len();
        self.books.retain(|b| b.title != title);
        before - self.books.len()
    }

    /// Check whether a book with the same title is already held
    pub fn exists(&self, book: &Book) -> bool {
        self.contains_title(&book.title)
    }

    /// Check whether any book has this exact title
    pub fn contains_title(&self, title: &str) -> bool {
        self.books.iter().any(|b| b.title == title)
    }

    /// Get the number of books
    pub fn count(&self) -> usize {
        self.books.len()
    }

    /// Check if the library is empty
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Flip the read flag of the first matching book in place
    pub fn toggle_read(&mut self, title: &str) -> Option<bool> {
        self.books
            .iter_mut()
            .find(|b| b.title == title)
            .map(Book::toggle_read)
    }

    /// Books in display order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Iterate over books in display order
    pub fn iter(&self) -> std::slice::Iter<'_, Book> {
        self.books.iter()
    }

    /// Apply a user command
    pub fn apply(&mut self, command: Command) -> Outcome {
        match command {
            Command::Add(book) => {
                if self.exists(&book) {
                    Outcome::Duplicate
                } else {
                    self.add(book);
                    Outcome::Added
                }
            }
            Command::Remove(title) => Outcome::Removed(self.remove(&title)),
            Command::ToggleRead(title) => match self.toggle_read(&title) {
                Some(is_read) => Outcome::Toggled { is_read },
                None => Outcome::NotFound,
            },
        }
    }
}

impl<'a> IntoIterator for &'a Library {
    type Item = &'a Book;
    type IntoIter = std::slice::Iter<'a, Book>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
