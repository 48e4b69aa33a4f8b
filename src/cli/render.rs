//! Text rendering of books for the terminal.

use crate::domain::Book;
use crate::library::Library;

const MIN_CARD_WIDTH: usize = 24;

/// Render a book as a boxed card
pub fn render_card(book: &Book) -> String {
    let pages = book.pages.to_string();
    let status = format!("[{}]", book.status_label());
    let lines = [book.title.as_str(), book.author.as_str(), pages.as_str(), status.as_str()];

    let width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(MIN_CARD_WIDTH);

    let border = format!("+{}+", "-".repeat(width + 2));
    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    for line in lines {
        let pad = width - line.chars().count();
        out.push_str(&format!("| {}{} |\n", line, " ".repeat(pad)));
    }
    out.push_str(&border);
    out
}

/// Render the whole library as a table
pub fn render_table(library: &Library) -> String {
    let mut out = format!(
        "{:<40} {:<24} {:>8}  {:<8}\n",
        "TITLE", "AUTHOR", "PAGES", "STATUS"
    );
    out.push_str(&"-".repeat(84));
    out.push('\n');

    for book in library {
        out.push_str(&format!(
            "{:<40} {:<24} {:>8}  {:<8}\n",
            truncate(&book.title, 40),
            truncate(&book.author, 24),
            truncate(&book.pages.to_string(), 8),
            book.status_label()
        ));
    }

    out.push_str(&format!("\nTotal: {} books", library.count()));
    out
}

/// Shorten to `max` characters, ending with "..." when cut
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut cut: String = s.chars().take(keep).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_contains_fields() {
        let card = render_card(&Book::new("Dune", "Herbert", 412u64, false));
        let lines: Vec<_> = card.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[1].contains("Dune"));
        assert!(lines[2].contains("Herbert"));
        assert!(lines[3].contains("412"));
        assert!(lines[4].contains("[Not read]"));
        // All rows share the border width
        assert!(lines.iter().all(|l| l.chars().count() == lines[0].chars().count()));
    }

    #[test]
    fn test_card_grows_for_long_titles() {
        let title = "A Very Long Title That Exceeds The Minimum Width";
        let card = render_card(&Book::new(title, "x", 1u64, true));
        assert!(card.lines().next().unwrap().chars().count() >= title.len() + 4);
        assert!(card.contains("[Read]"));
    }

    #[test]
    fn test_table_lists_in_order() {
        let library = Library::from_books(vec![
            Book::new("Dune", "Herbert", 412u64, false),
            Book::new("Emma", "Austen", 474u64, true),
        ]);
        let table = render_table(&library);

        let dune = table.find("Dune").unwrap();
        let emma = table.find("Emma").unwrap();
        assert!(dune < emma);
        assert!(table.ends_with("Total: 2 books"));
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 6), "abc...");
        assert_eq!(truncate("ééééééé", 5), "éé...");
    }
}
