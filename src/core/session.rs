//! A user session: one library, hydrated once, saved after every change.

use anyhow::{Context, Result};

use crate::domain::{Command, Outcome};
use crate::library::Library;
use crate::storage::KeyValueStore;

use super::bridge::{describe, PersistenceBridge};

/// How the library was restored at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hydration {
    /// Nothing was stored
    Empty,

    /// Stored books were loaded
    Restored(usize),

    /// Stored state was unreadable and has been replaced by an empty library
    Recovered { reason: String },
}

/// Owns the library and its persistence for one run
#[derive(Debug)]
pub struct Session<S> {
    library: Library,
    bridge: PersistenceBridge<S>,
    hydration: Hydration,
}

impl<S: KeyValueStore> Session<S> {
    /// Hydrate a library from the bridge.
    ///
    /// Never fails: unreadable state is recorded as [`Hydration::Recovered`]
    /// and the session starts empty.
    pub fn open(bridge: PersistenceBridge<S>) -> Self {
        let (library, hydration) = match bridge.load() {
            Ok(books) if books.is_empty() => (Library::new(), Hydration::Empty),
            Ok(books) => {
                let n = books.len();
                (Library::from_books(books), Hydration::Restored(n))
            }
            Err(e) => {
                let reason = describe(e);
                tracing::warn!(error = %reason, "Stored library unreadable, starting empty");
                (Library::new(), Hydration::Recovered { reason })
            }
        };

        tracing::debug!(?hydration, "Session opened");

        Self {
            library,
            bridge,
            hydration,
        }
    }

    /// Apply a command and write the library through if it changed
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome> {
        let title = command.title().to_string();
        let outcome = self.library.apply(command);

        if outcome.is_mutation() {
            self.bridge
                .save(&self.library)
                .with_context(|| format!("Failed to save library after change to '{}'", title))?;
        }

        tracing::debug!(%title, ?outcome, "Command applied");
        Ok(outcome)
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn hydration(&self) -> &Hydration {
        &self.hydration
    }

    pub fn bridge(&self) -> &PersistenceBridge<S> {
        &self.bridge
    }
}
