use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use daylog_core::storage::{Entry, EntryKind, EntryPatch, EntryStatus, EntryStore, MemoryStore, Origin};
use daylog_core::{DaylogError, FixedClock, Journal, Result};
use uuid::Uuid;

fn day(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid date")
}

fn seeded(entries: impl IntoIterator<Item = Entry>, today: &str) -> (Arc<MemoryStore>, Arc<FixedClock>) {
    (
        Arc::new(MemoryStore::with_entries(entries)),
        Arc::new(FixedClock::new(day(today))),
    )
}

#[tokio::test]
async fn test_overdue_task_is_carried_into_today_once() {
    let original = Entry::new(EntryKind::Task, "Buy milk", day("2024-03-08"), Utc::now());
    let (store, clock) = seeded([original.clone()], "2024-03-10");

    let mut journal = Journal::open(store.clone(), clock, day("2024-03-10"))
        .await
        .expect("open today");

    let view = journal.day_view();
    assert_eq!(view.daily.len(), 1);
    let clone = &view.daily[0];
    assert_ne!(clone.id, original.id);
    assert_eq!(clone.content, "Buy milk");
    assert_eq!(clone.date, day("2024-03-10"));
    assert_eq!(clone.status, EntryStatus::Incomplete);
    assert_eq!(
        clone.origin,
        Some(Origin::CarriedOver {
            original_date: day("2024-03-08")
        })
    );

    let stored = store.get(&original.id).await.expect("get").expect("original kept");
    assert_eq!(stored.status, EntryStatus::Migrated);
    assert_eq!(stored.migrated_to, Some(day("2024-03-10")));

    journal.refresh().await.expect("second refresh");
    assert_eq!(journal.day_view().daily.len(), 1);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_viewing_another_day_is_a_pure_read() {
    let overdue = Entry::new(EntryKind::Note, "Idea for garden", day("2024-03-05"), Utc::now());
    let (store, clock) = seeded([overdue.clone()], "2024-03-10");
    let before = store.snapshot().expect("snapshot");

    let past = Journal::open(store.clone(), clock.clone(), day("2024-03-05"))
        .await
        .expect("open past day");
    assert_eq!(past.day_view().daily, vec![overdue]);

    Journal::open(store.clone(), clock, day("2024-03-12"))
        .await
        .expect("open future day");
    assert_eq!(store.snapshot().expect("snapshot"), before);
}

#[tokio::test]
async fn test_entries_from_today_and_completed_ones_stay_put() {
    let done = {
        let mut entry = Entry::new(EntryKind::Task, "Pay rent", day("2024-03-01"), Utc::now());
        entry.status = EntryStatus::Complete;
        entry
    };
    let gratitude = Entry::new(EntryKind::Gratitude, "Friends", day("2024-03-09"), Utc::now());
    let current = Entry::new(EntryKind::Event, "Standup", day("2024-03-10"), Utc::now());
    let (store, clock) = seeded([done, gratitude, current.clone()], "2024-03-10");

    let journal = Journal::open(store.clone(), clock, day("2024-03-10"))
        .await
        .expect("open today");

    assert_eq!(journal.day_view().daily, vec![current]);
    assert_eq!(store.len(), 3);
}

#[tokio::test]
async fn test_habit_persists_until_completed() {
    let (store, clock) = seeded([], "2024-03-01");
    let mut journal = Journal::open(store.clone(), clock.clone(), day("2024-03-01"))
        .await
        .expect("open");
    let habit = journal.add("Drink water", EntryKind::Habit).await.expect("add habit");
    assert_eq!(habit.date, day("2024-03-01"));

    for later in ["2024-03-02", "2024-03-05", "2024-03-20"] {
        clock.set_today(day(later));
        journal.navigate(day(later)).await.expect("navigate");
        let view = journal.day_view();
        assert_eq!(view.carry_over.len(), 1, "habit missing on {}", later);
        assert!(view.daily.is_empty());
    }

    journal
        .update(&habit.id, EntryPatch::new().status(EntryStatus::Complete))
        .await
        .expect("complete habit")
        .expect("habit found");
    assert!(journal.carry_over().is_empty());

    journal.refresh().await.expect("refresh");
    assert!(journal.carry_over().is_empty());
}

#[tokio::test]
async fn test_carry_over_is_ordered_by_creation() {
    let clock = Arc::new(FixedClock::new(day("2024-03-10")));
    let store = Arc::new(MemoryStore::new());
    let mut journal = Journal::open(store, clock, day("2024-03-10"))
        .await
        .expect("open");

    let habit = journal.add("Meditate", EntryKind::Habit).await.expect("habit");
    let goal = journal.add("Ship v1", EntryKind::Goal).await.expect("goal");
    let important = journal.add("Visa renewal", EntryKind::Important).await.expect("important");

    journal.refresh().await.expect("refresh");
    let ids: Vec<Uuid> = journal.carry_over().iter().map(|entry| entry.id).collect();
    assert_eq!(ids, vec![habit.id, goal.id, important.id]);
}

#[tokio::test]
async fn test_add_then_fetch() {
    let (store, clock) = seeded([], "2024-03-10");
    let mut journal = Journal::open(store.clone(), clock, day("2024-03-10"))
        .await
        .expect("open");

    let entry = journal.add("Call the plumber", EntryKind::Task).await.expect("add");
    let fetched = store.get(&entry.id).await.expect("get").expect("stored");
    assert_eq!(fetched.content, "Call the plumber");
    assert_eq!(fetched.kind, EntryKind::Task);
    assert_eq!(fetched.status, EntryStatus::Incomplete);
}

#[tokio::test]
async fn test_migrate_task_to_another_day() {
    let (store, clock) = seeded([], "2024-03-10");
    let mut journal = Journal::open(store.clone(), clock, day("2024-03-10"))
        .await
        .expect("open");
    let task = journal.add("Book flights", EntryKind::Task).await.expect("add");

    let clone = journal
        .migrate(&task.id, day("2024-03-15"))
        .await
        .expect("migrate")
        .expect("task migrated");

    assert_eq!(clone.date, day("2024-03-15"));
    assert_eq!(clone.status, EntryStatus::Incomplete);
    assert_eq!(
        clone.origin,
        Some(Origin::MigratedFrom {
            source_date: day("2024-03-10")
        })
    );

    let original = store.get(&task.id).await.expect("get").expect("original kept");
    assert_eq!(original.status, EntryStatus::Migrated);
    assert_eq!(original.migrated_to, Some(day("2024-03-15")));
    assert!(journal.day_view().daily.is_empty());

    journal.navigate(day("2024-03-15")).await.expect("navigate");
    assert_eq!(journal.day_view().daily, vec![clone]);
}

#[tokio::test]
async fn test_migrate_to_viewed_day_shows_clone() {
    let (store, clock) = seeded([], "2024-03-10");
    let mut journal = Journal::open(store, clock, day("2024-03-10"))
        .await
        .expect("open");
    let task = journal.add("Tidy desk", EntryKind::Task).await.expect("add");

    let clone = journal
        .migrate(&task.id, day("2024-03-10"))
        .await
        .expect("migrate")
        .expect("task migrated");
    assert_eq!(journal.day_view().daily, vec![clone]);
}

#[tokio::test]
async fn test_migrate_ignores_non_tasks_and_unknown_ids() {
    let (store, clock) = seeded([], "2024-03-10");
    let mut journal = Journal::open(store.clone(), clock, day("2024-03-10"))
        .await
        .expect("open");
    let note = journal.add("Random thought", EntryKind::Note).await.expect("add");
    let goal = journal.add("Read 20 books", EntryKind::Goal).await.expect("add");
    let before = store.snapshot().expect("snapshot");

    for id in [note.id, goal.id, Uuid::new_v4()] {
        let result = journal.migrate(&id, day("2024-03-11")).await.expect("migrate");
        assert!(result.is_none());
    }
    assert_eq!(store.snapshot().expect("snapshot"), before);
}

#[tokio::test]
async fn test_migrating_twice_yields_one_clone() {
    let (store, clock) = seeded([], "2024-03-10");
    let mut journal = Journal::open(store.clone(), clock, day("2024-03-10"))
        .await
        .expect("open");
    let task = journal.add("Fix bike", EntryKind::Task).await.expect("add");

    assert!(journal.migrate(&task.id, day("2024-03-12")).await.expect("first").is_some());
    assert!(journal.migrate(&task.id, day("2024-03-13")).await.expect("second").is_none());
    assert_eq!(store.len(), 2);
}

/// Store wrapper that fails every call once tripped.
struct FlakyStore {
    inner: MemoryStore,
    broken: AtomicBool,
}

impl FlakyStore {
    fn check(&self) -> Result<()> {
        if self.broken.load(Ordering::SeqCst) {
            Err(DaylogError::Storage("disk unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl EntryStore for FlakyStore {
    async fn put(&self, entry: &Entry) -> Result<()> {
        self.check()?;
        self.inner.put(entry).await
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Entry>> {
        self.check()?;
        self.inner.get(id).await
    }

    async fn entries_on(&self, date: NaiveDate) -> Result<Vec<Entry>> {
        self.check()?;
        self.inner.entries_on(date).await
    }

    async fn entries_by_kind_and_status(
        &self,
        kind: EntryKind,
        status: EntryStatus,
    ) -> Result<Vec<Entry>> {
        self.check()?;
        self.inner.entries_by_kind_and_status(kind, status).await
    }

    async fn entries_by_kinds_and_status(
        &self,
        kinds: &[EntryKind],
        status: EntryStatus,
    ) -> Result<Vec<Entry>> {
        self.check()?;
        self.inner.entries_by_kinds_and_status(kinds, status).await
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        self.check()?;
        self.inner.delete(id).await
    }

    async fn record_migration(&self, clone: &Entry, original: &Entry) -> Result<bool> {
        self.check()?;
        self.inner.record_migration(clone, original).await
    }
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_view() {
    let habit = Entry::new(EntryKind::Habit, "Journal nightly", day("2024-03-01"), Utc::now());
    let store = Arc::new(FlakyStore {
        inner: MemoryStore::with_entries([habit]),
        broken: AtomicBool::new(false),
    });
    let clock = Arc::new(FixedClock::new(day("2024-03-10")));
    let mut journal = Journal::open(store.clone(), clock, day("2024-03-10"))
        .await
        .expect("open");
    let before = journal.day_view();

    store.broken.store(true, Ordering::SeqCst);
    assert!(journal.navigate(day("2024-03-11")).await.is_err());
    assert_eq!(journal.viewing_date(), day("2024-03-10"));
    assert_eq!(journal.day_view(), before);

    assert!(journal.add("Anything", EntryKind::Task).await.is_err());
    assert!(journal.day_view().daily.is_empty());
}
