//! Entry store trait definition.
//!
//! `EntryStore` is the boundary between the journal logic and persistence.
//! Implementations own confidentiality at rest; callers always see plaintext
//! content.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use super::types::{Entry, EntryKind, EntryStatus};
use crate::error::Result;

/// Persistence for journal entries.
///
/// Every method is atomic on its own. `record_migration` is the only
/// operation that spans two records.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Insert or replace an entry by id.
    async fn put(&self, entry: &Entry) -> Result<()>;

    /// Get an entry by id.
    ///
    /// Returns `Ok(None)` if no entry has that id.
    async fn get(&self, id: &Uuid) -> Result<Option<Entry>>;

    /// All entries dated exactly `date`, any kind and status.
    async fn entries_on(&self, date: NaiveDate) -> Result<Vec<Entry>>;

    /// All entries of one kind with the given status, any date.
    async fn entries_by_kind_and_status(
        &self,
        kind: EntryKind,
        status: EntryStatus,
    ) -> Result<Vec<Entry>>;

    /// All entries whose kind is in `kinds` with the given status, any date.
    async fn entries_by_kinds_and_status(
        &self,
        kinds: &[EntryKind],
        status: EntryStatus,
    ) -> Result<Vec<Entry>>;

    /// Delete an entry. Deleting a missing id is not an error.
    async fn delete(&self, id: &Uuid) -> Result<()>;

    /// Persist a migration pair as one unit.
    ///
    /// The stored copy of `original` is re-read first. If it is missing or
    /// already migrated, nothing is written and `Ok(false)` is returned, so a
    /// repeated or interrupted migration can never produce a second clone.
    /// Otherwise `clone` is inserted and `original` (already flagged
    /// `migrated`) replaces the stored record.
    async fn record_migration(&self, clone: &Entry, original: &Entry) -> Result<bool>;
}
