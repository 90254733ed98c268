//! In-process entry store.
//!
//! Keeps entries in a `HashMap` behind a mutex. Nothing is encrypted or
//! written to disk; used by tests and by the CLI's `--ephemeral` mode.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{DaylogError, Result};
use crate::storage::traits::EntryStore;
use crate::storage::types::{Entry, EntryKind, EntryStatus};

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<Uuid, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `entries`.
    pub fn with_entries(entries: impl IntoIterator<Item = Entry>) -> Self {
        let map = entries.into_iter().map(|entry| (entry.id, entry)).collect();
        Self {
            entries: Mutex::new(map),
        }
    }

    /// Number of stored entries, including migrated ones.
    pub fn len(&self) -> usize {
        self.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every stored entry, ordered by creation time.
    pub fn snapshot(&self) -> Result<Vec<Entry>> {
        let mut all: Vec<Entry> = self.lock()?.values().cloned().collect();
        all.sort_by_key(|entry| entry.created_at);
        Ok(all)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Entry>>> {
        self.entries
            .lock()
            .map_err(|_| DaylogError::StoreUnavailable("memory store lock poisoned".to_string()))
    }

    fn select(&self, predicate: impl Fn(&Entry) -> bool) -> Result<Vec<Entry>> {
        let entries = self.lock()?;
        let mut matched: Vec<Entry> = entries.values().filter(|e| predicate(e)).cloned().collect();
        matched.sort_by_key(|entry| entry.created_at);
        Ok(matched)
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn put(&self, entry: &Entry) -> Result<()> {
        self.lock()?.insert(entry.id, entry.clone());
        Ok(())
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Entry>> {
        Ok(self.lock()?.get(id).cloned())
    }

    async fn entries_on(&self, date: NaiveDate) -> Result<Vec<Entry>> {
        self.select(|entry| entry.date == date)
    }

    async fn entries_by_kind_and_status(
        &self,
        kind: EntryKind,
        status: EntryStatus,
    ) -> Result<Vec<Entry>> {
        self.select(|entry| entry.kind == kind && entry.status == status)
    }

    async fn entries_by_kinds_and_status(
        &self,
        kinds: &[EntryKind],
        status: EntryStatus,
    ) -> Result<Vec<Entry>> {
        self.select(|entry| kinds.contains(&entry.kind) && entry.status == status)
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        self.lock()?.remove(id);
        Ok(())
    }

    async fn record_migration(&self, clone: &Entry, original: &Entry) -> Result<bool> {
        let mut entries = self.lock()?;
        let still_open = entries
            .get(&original.id)
            .map(|stored| stored.status != EntryStatus::Migrated)
            .unwrap_or(false);
        if !still_open {
            return Ok(false);
        }
        entries.insert(clone.id, clone.clone());
        entries.insert(original.id, original.clone());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::storage::types::Origin;

    fn day(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_indexed_queries() {
        let store = MemoryStore::new();
        let task = Entry::new(EntryKind::Task, "Buy stamps", day("2024-03-08"), Utc::now());
        let goal = Entry::new(EntryKind::Goal, "Run 10k", day("2024-03-01"), Utc::now());
        store.put(&task).await.unwrap();
        store.put(&goal).await.unwrap();

        assert_eq!(store.entries_on(day("2024-03-08")).await.unwrap(), vec![task.clone()]);
        assert_eq!(
            store
                .entries_by_kind_and_status(EntryKind::Goal, EntryStatus::Incomplete)
                .await
                .unwrap(),
            vec![goal]
        );
        assert_eq!(
            store
                .entries_by_kinds_and_status(&EntryKind::ROLLING, EntryStatus::Incomplete)
                .await
                .unwrap(),
            vec![task]
        );
    }

    #[tokio::test]
    async fn test_record_migration_refuses_migrated_original() {
        let original = Entry::new(EntryKind::Task, "Call bank", day("2024-03-08"), Utc::now());
        let store = MemoryStore::with_entries([original.clone()]);
        let clone = original.successor(
            day("2024-03-10"),
            Origin::CarriedOver {
                original_date: original.date,
            },
            Utc::now(),
        );
        let flagged = original.superseded(day("2024-03-10"));

        assert!(store.record_migration(&clone, &flagged).await.unwrap());
        assert_eq!(store.len(), 2);

        let second = original.successor(
            day("2024-03-10"),
            Origin::CarriedOver {
                original_date: original.date,
            },
            Utc::now(),
        );
        assert!(!store.record_migration(&second, &flagged).await.unwrap());
        assert_eq!(store.len(), 2);
        assert!(store.get(&second.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let entry = Entry::new(EntryKind::Note, "idea", day("2024-03-08"), Utc::now());
        let store = MemoryStore::with_entries([entry.clone()]);

        store.delete(&entry.id).await.unwrap();
        store.delete(&entry.id).await.unwrap();
        assert!(store.is_empty());
    }
}
