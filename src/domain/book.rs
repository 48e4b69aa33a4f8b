//! The book record and its page count.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Title used when a book is built without one
pub const UNKNOWN: &str = "Unknown";

/// A tracked book
///
/// Missing fields in persisted records fall back to [`Book::default`], so a
/// stored `{"title": "Dune"}` loads as an unread book by "Unknown".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    /// Identifying key within a library (exact, case-sensitive)
    pub title: String,

    /// Author name as entered
    pub author: String,

    /// Page count as entered
    pub pages: Pages,

    /// Whether the book has been read
    #[serde(rename = "isRead")]
    pub is_read: bool,
}

impl Default for Book {
    fn default() -> Self {
        Self {
            title: UNKNOWN.to_string(),
            author: UNKNOWN.to_string(),
            pages: Pages::default(),
            is_read: false,
        }
    }
}

impl Book {
    /// Create a new book
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        pages: impl Into<Pages>,
        is_read: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            pages: pages.into(),
            is_read,
        }
    }

    /// Flip the read flag, returning the new value
    pub fn toggle_read(&mut self) -> bool {
        self.is_read = !self.is_read;
        self.is_read
    }

    /// Label shown on the read/unread toggle
    pub fn status_label(&self) -> &'static str {
        if self.is_read {
            "Read"
        } else {
            "Not read"
        }
    }
}

/// Page count, kept exactly as it was provided.
///
/// Form input arrives as text and older records may hold either a number or
/// a string, so the raw JSON value is preserved rather than validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pages(Value);

impl Pages {
    /// Build from user input: text that is exactly a canonical non-negative
    /// integer becomes a number, anything else is kept as entered.
    pub fn from_input(input: &str) -> Self {
        match input.parse::<u64>() {
            Ok(n) if n.to_string() == input => Self::from(n),
            _ => Self(Value::String(input.to_string())),
        }
    }

    /// The raw stored value
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl Default for Pages {
    fn default() -> Self {
        Self::from(0u64)
    }
}

impl From<u64> for Pages {
    fn from(n: u64) -> Self {
        Self(Value::from(n))
    }
}

impl From<u32> for Pages {
    fn from(n: u32) -> Self {
        Self(Value::from(n))
    }
}

impl From<&str> for Pages {
    fn from(s: &str) -> Self {
        Self(Value::String(s.to_string()))
    }
}

impl From<String> for Pages {
    fn from(s: String) -> Self {
        Self(Value::String(s))
    }
}

impl From<Value> for Pages {
    fn from(v: Value) -> Self {
        Self(v)
    }
}

impl fmt::Display for Pages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => write!(f, "{}", s),
            Value::Null => Ok(()),
            other => write!(f, "{}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_book_matches_form_defaults() {
        let book = Book::default();
        assert_eq!(book.title, "Unknown");
        assert_eq!(book.author, "Unknown");
        assert_eq!(book.pages, Pages::from(0u64));
        assert!(!book.is_read);
    }

    #[test]
    fn test_serializes_with_is_read_field_name() {
        let book = Book::new("Dune", "Herbert", 412u64, false);
        let json = serde_json::to_value(&book).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "title": "Dune",
                "author": "Herbert",
                "pages": 412,
                "isRead": false
            })
        );
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let book: Book = serde_json::from_str(r#"{"title": "Dune"}"#).unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Unknown");
        assert_eq!(book.pages, Pages::default());
        assert!(!book.is_read);
    }

    #[test]
    fn test_pages_preserved_verbatim() {
        let book: Book =
            serde_json::from_str(r#"{"title":"A","author":"B","pages":"412","isRead":true}"#)
                .unwrap();
        assert_eq!(book.pages.as_value(), &Value::String("412".to_string()));

        let book: Book =
            serde_json::from_str(r#"{"title":"A","author":"B","pages":12.5,"isRead":true}"#)
                .unwrap();
        assert_eq!(book.pages.to_string(), "12.5");
    }

    #[test]
    fn test_pages_from_input() {
        assert_eq!(Pages::from_input("412"), Pages::from(412u64));
        assert_eq!(Pages::from_input("about 300"), Pages::from("about 300"));
        assert_eq!(Pages::from_input("-5"), Pages::from("-5"));
        assert_eq!(Pages::from_input("+5"), Pages::from("+5"));
        assert_eq!(Pages::from_input(""), Pages::from(""));
        assert_eq!(Pages::from_input("007"), Pages::from("007"));
        assert_eq!(Pages::from_input("007").to_string(), "007");
        assert_eq!(Pages::from_input(" 412 "), Pages::from(" 412 "));
        assert_eq!(Pages::from_input("0"), Pages::from(0u64));
    }

    #[test]
    fn test_toggle_read() {
        let mut book = Book::new("Dune", "Herbert", 412u64, false);
        assert!(book.toggle_read());
        assert_eq!(book.status_label(), "Read");
        assert!(!book.toggle_read());
        assert_eq!(book.status_label(), "Not read");
    }
}
