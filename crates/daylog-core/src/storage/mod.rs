//! Storage abstractions and implementations.
//!
//! Defines the [`EntryStore`] trait and the entry data model, plus two
//! backends: the age-encrypted SQLite file and an in-process map.

pub mod age_sqlite;
pub mod encryption;
pub mod memory;
pub mod traits;
pub mod types;

pub use age_sqlite::AgeSqliteStore;
pub use memory::MemoryStore;
pub use traits::EntryStore;
pub use types::{Entry, EntryKind, EntryPatch, EntryStatus, JournalMetadata, Origin, Partition};
