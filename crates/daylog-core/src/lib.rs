//! # Daylog Core
//!
//! Core library for Daylog - a local, encrypted bullet journal.
//!
//! This crate holds the domain logic and storage independent of the CLI.
//!
//! ## Architecture
//!
//! - **journal**: Day sessions, the carry-over engine, task migration and
//!   entry mutations
//! - **storage**: `EntryStore` trait, entry data model, encrypted SQLite and
//!   in-memory backends
//! - **clock**: Source of "today"
//! - **settings**: Theme, language and notification preferences
//! - **inspiration**: The passage of the day
//! - **crypto**: Passphrase rules

pub mod clock;
pub mod crypto;
pub mod error;
pub mod inspiration;
pub mod journal;
pub mod settings;
pub mod storage;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{DaylogError, Result};
pub use journal::{DayView, Journal};
pub use settings::Settings;
pub use storage::{
    AgeSqliteStore, Entry, EntryKind, EntryPatch, EntryStatus, EntryStore, MemoryStore, Origin,
};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
