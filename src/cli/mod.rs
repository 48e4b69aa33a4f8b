//! Command-line interface for bookshelf.
//!
//! Provides commands for adding, listing, showing, removing and toggling
//! books. Every change is saved immediately.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::{self, ResolvedConfig};
use crate::core::{Hydration, PersistenceBridge, Session};
use crate::domain::{Book, Command, Outcome, Pages};
use crate::storage::FileStore;

pub mod render;

/// bookshelf - Personal book tracker
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Store file (overrides configuration)
    #[arg(long, global = true, env = "BOOKSHELF_STORE")]
    pub store: Option<PathBuf>,

    /// Storage key the library is kept under
    #[arg(long, global = true, env = "BOOKSHELF_KEY")]
    pub key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a book
    Add {
        /// Book title (must be unique)
        title: String,

        /// Author name
        #[arg(short, long, default_value = "Unknown")]
        author: String,

        /// Page count
        #[arg(short, long, default_value = "0")]
        pages: String,

        /// Mark as already read
        #[arg(short, long)]
        read: bool,
    },

    /// List all books
    List {
        /// Show each book as a card instead of a table
        #[arg(long)]
        cards: bool,
    },

    /// Show every book with this exact title
    Show {
        /// Book title
        title: String,
    },

    /// Remove every book with this exact title
    Remove {
        /// Book title
        title: String,
    },

    /// Toggle read/unread status
    Toggle {
        /// Book title
        title: String,
    },

    /// Print the number of books
    Count,

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let mut session = self.open_session()?;

        match self.command {
            Commands::Add {
                title,
                author,
                pages,
                read,
            } => add_book(&mut session, Book::new(title, author, Pages::from_input(&pages), read)),
            Commands::List { cards } => {
                list_books(&session, cards);
                Ok(())
            }
            Commands::Show { title } => show_book(&session, &title),
            Commands::Remove { title } => remove_book(&mut session, title),
            Commands::Toggle { title } => toggle_book(&mut session, title),
            Commands::Count => {
                println!("{}", session.library().count());
                Ok(())
            }
            Commands::Config => show_config(&session),
        }
    }

    /// Open the store and hydrate the library
    fn open_session(&self) -> Result<Session<FileStore>> {
        let (store_path, key) =
            store_location(self.store.clone(), self.key.clone(), config::config)?;

        let bridge = PersistenceBridge::with_key(FileStore::new(store_path), key);
        let session = Session::open(bridge);

        if let Hydration::Recovered { reason } = session.hydration() {
            eprintln!("Warning: stored library could not be read, starting empty ({})", reason);
        }

        Ok(session)
    }
}

/// Pick the store file and key, loading configuration only for values not
/// given on the command line
fn store_location<'a, F>(
    store: Option<PathBuf>,
    key: Option<String>,
    load: F,
) -> Result<(PathBuf, String)>
where
    F: FnOnce() -> Result<&'a ResolvedConfig>,
{
    match (store, key) {
        (Some(store), Some(key)) => Ok((store, key)),
        (store, key) => {
            let cfg = load()?;
            Ok((
                store.unwrap_or_else(|| cfg.store.clone()),
                key.unwrap_or_else(|| cfg.key.clone()),
            ))
        }
    }
}

/// Add a book unless the title is taken
fn add_book(session: &mut Session<FileStore>, book: Book) -> Result<()> {
    let title = book.title.clone();

    match session.dispatch(Command::Add(book))? {
        Outcome::Added => {
            if let Some(book) = session.library().first(&title) {
                println!("{}", render::render_card(book));
            }
            Ok(())
        }
        Outcome::Duplicate => {
            eprintln!("A book titled '{}' is already in the library", title);
            std::process::exit(1);
        }
        other => anyhow::bail!("Unexpected outcome adding '{}': {:?}", title, other),
    }
}

/// List all books
fn list_books(session: &Session<FileStore>, cards: bool) {
    let library = session.library();

    if library.is_empty() {
        println!("Library is empty. Use 'bookshelf add <title>' to add a book.");
        return;
    }

    if cards {
        for book in library {
            println!("{}", render::render_card(book));
        }
    } else {
        println!("{}", render::render_table(library));
    }
}

/// Show every book with a title
fn show_book(session: &Session<FileStore>, title: &str) -> Result<()> {
    let mut found = false;
    for book in session.library().find(title) {
        println!("{}", render::render_card(book));
        found = true;
    }

    if !found {
        anyhow::bail!("No book titled '{}'", title);
    }
    Ok(())
}

/// Remove every book with a title
fn remove_book(session: &mut Session<FileStore>, title: String) -> Result<()> {
    match session.dispatch(Command::Remove(title.clone()))? {
        Outcome::Removed(0) => println!("No book titled '{}'", title),
        Outcome::Removed(1) => println!("Removed '{}'", title),
        Outcome::Removed(n) => println!("Removed {} books titled '{}'", n, title),
        other => anyhow::bail!("Unexpected outcome removing '{}': {:?}", title, other),
    }
    Ok(())
}

/// Toggle read status
fn toggle_book(session: &mut Session<FileStore>, title: String) -> Result<()> {
    match session.dispatch(Command::ToggleRead(title.clone()))? {
        Outcome::Toggled { is_read } => {
            let label = if is_read { "Read" } else { "Not read" };
            println!("'{}' is now marked {}", title, label);
            Ok(())
        }
        Outcome::NotFound => anyhow::bail!("No book titled '{}'", title),
        other => anyhow::bail!("Unexpected outcome toggling '{}': {:?}", title, other),
    }
}

/// Show resolved configuration
fn show_config(session: &Session<FileStore>) -> Result<()> {
    let cfg = config::config()?;
    let bridge = session.bridge();

    println!("Bookshelf Configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!("Home:        {}", cfg.home.display());
    println!("Store:       {}", bridge.store().path().display());
    println!("Key:         {}", bridge.key());
    println!();
    let state = match session.hydration() {
        Hydration::Empty => "empty".to_string(),
        Hydration::Restored(n) => format!("{} books", n),
        Hydration::Recovered { reason } => format!("unreadable ({})", reason),
    };
    println!("Stored library: {}", state);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_with_defaults() {
        let cli = Cli::try_parse_from(["bookshelf", "add", "Dune"]).unwrap();
        match cli.command {
            Commands::Add {
                title,
                author,
                pages,
                read,
            } => {
                assert_eq!(title, "Dune");
                assert_eq!(author, "Unknown");
                assert_eq!(pages, "0");
                assert!(!read);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_store_after_subcommand() {
        let cli = Cli::try_parse_from([
            "bookshelf", "toggle", "Dune", "--store", "/tmp/books.json",
        ])
        .unwrap();
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/books.json")));
        assert!(matches!(cli.command, Commands::Toggle { .. }));
    }

    fn leaked_config() -> &'static ResolvedConfig {
        Box::leak(Box::new(ResolvedConfig {
            home: PathBuf::from("/home/reader/.bookshelf"),
            store: PathBuf::from("/home/reader/.bookshelf/store.json"),
            key: "library".to_string(),
            config_file: None,
        }))
    }

    #[test]
    fn test_store_location_skips_config_when_overridden() {
        let (store, key) = store_location(
            Some(PathBuf::from("/tmp/books.json")),
            Some("shelf".to_string()),
            || anyhow::bail!("config should not be loaded"),
        )
        .unwrap();

        assert_eq!(store, PathBuf::from("/tmp/books.json"));
        assert_eq!(key, "shelf");
    }

    #[test]
    fn test_store_location_fills_missing_values_from_config() {
        let (store, key) =
            store_location(Some(PathBuf::from("/tmp/books.json")), None, || {
                Ok(leaked_config())
            })
            .unwrap();
        assert_eq!(store, PathBuf::from("/tmp/books.json"));
        assert_eq!(key, "library");

        let (store, key) =
            store_location(None, Some("shelf".to_string()), || Ok(leaked_config())).unwrap();
        assert_eq!(store, PathBuf::from("/home/reader/.bookshelf/store.json"));
        assert_eq!(key, "shelf");
    }

    #[test]
    fn test_store_location_reports_config_errors() {
        let result = store_location(None, None, || anyhow::bail!("bad config.yaml"));
        assert!(result.unwrap_err().to_string().contains("bad config.yaml"));
    }

    #[test]
    fn test_parse_add_all_fields() {
        let cli = Cli::try_parse_from([
            "bookshelf", "add", "Dune", "--author", "Herbert", "--pages", "412", "--read",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Add { ref author, ref pages, read: true, .. }
                if author == "Herbert" && pages == "412"
        ));
    }
}
