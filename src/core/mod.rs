//! Core persistence logic.
//!
//! This module contains:
//! - PersistenceBridge: Snapshot save/load of a library through a store
//! - Session: Startup hydration and write-through command dispatch

pub mod bridge;
pub mod session;

// Re-export commonly used types
pub use bridge::{decode, describe, encode, LoadError, PersistenceBridge, LIBRARY_KEY};
pub use session::{Hydration, Session};
