//! Journal session for one viewed day.
//!
//! A [`Journal`] owns the two in-memory partitions of the day being viewed
//! (daily entries and recurring carry-over entries) and is the only way the
//! rest of the program mutates entries. Every mutation is persisted through
//! the [`EntryStore`] first and mirrored into the partitions afterwards.
//!
//! Targets that cannot be found (an unknown id, a non-task passed to
//! [`Journal::migrate`]) are not errors: those operations return `Ok(None)`
//! and change nothing.

mod carry_over;

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::{DaylogError, Result};
use crate::storage::{Entry, EntryKind, EntryPatch, EntryStatus, EntryStore, Origin, Partition};

/// Active entries for one day, as produced by a refresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayView {
    pub date: NaiveDate,
    pub daily: Vec<Entry>,
    pub carry_over: Vec<Entry>,
}

pub struct Journal {
    store: Arc<dyn EntryStore>,
    clock: Arc<dyn Clock>,
    view: DayView,
}

impl Journal {
    /// Session viewing the clock's today. Partitions stay empty until
    /// [`Journal::refresh`] runs.
    pub fn new(store: Arc<dyn EntryStore>, clock: Arc<dyn Clock>) -> Self {
        let today = clock.today();
        Self {
            store,
            clock,
            view: DayView {
                date: today,
                ..DayView::default()
            },
        }
    }

    /// Open a session on `date` and load it.
    pub async fn open(
        store: Arc<dyn EntryStore>,
        clock: Arc<dyn Clock>,
        date: NaiveDate,
    ) -> Result<Self> {
        let mut journal = Self::new(store, clock);
        journal.navigate(date).await?;
        Ok(journal)
    }

    pub fn viewing_date(&self) -> NaiveDate {
        self.view.date
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Daily partition, including entries this session retired by migration.
    pub fn daily(&self) -> &[Entry] {
        &self.view.daily
    }

    pub fn carry_over(&self) -> &[Entry] {
        &self.view.carry_over
    }

    /// Active entries of both partitions.
    pub fn day_view(&self) -> DayView {
        DayView {
            date: self.view.date,
            daily: self.view.daily.iter().filter(|e| e.is_active()).cloned().collect(),
            carry_over: self.view.carry_over.clone(),
        }
    }

    /// Switch to `date` and refresh. On failure the session keeps showing
    /// the previous day.
    pub async fn navigate(&mut self, date: NaiveDate) -> Result<()> {
        self.load(date).await
    }

    /// Reload the viewed day, carrying overdue entries over if it is today.
    ///
    /// A failed refresh leaves both partitions as they were.
    pub async fn refresh(&mut self) -> Result<()> {
        self.load(self.view.date).await
    }

    async fn load(&mut self, date: NaiveDate) -> Result<()> {
        match carry_over::load_day(self.store.as_ref(), self.clock.as_ref(), date).await {
            Ok(view) => {
                self.view = view;
                Ok(())
            }
            Err(e) => {
                error!(date = %date, error = %e, kind = e.label(), "refresh failed");
                Err(e)
            }
        }
    }

    /// Find an entry of either partition.
    pub fn find(&self, id: &Uuid) -> Option<&Entry> {
        self.view
            .daily
            .iter()
            .chain(self.view.carry_over.iter())
            .find(|entry| entry.id == *id)
    }

    /// Resolve a full id or a unique id prefix among the loaded entries.
    ///
    /// Returns `Ok(None)` when nothing matches and an error when the prefix
    /// is ambiguous.
    pub fn resolve_id(&self, text: &str) -> Result<Option<Uuid>> {
        if let Ok(id) = Uuid::parse_str(text) {
            return Ok(self.find(&id).map(|entry| entry.id));
        }

        let prefix = text.trim().to_ascii_lowercase();
        if prefix.is_empty() {
            return Err(DaylogError::InvalidInput("Entry id cannot be empty".to_string()));
        }
        let mut matches: Vec<Uuid> = self
            .view
            .daily
            .iter()
            .chain(self.view.carry_over.iter())
            .filter(|entry| entry.id.to_string().starts_with(&prefix))
            .map(|entry| entry.id)
            .collect();
        matches.sort();
        matches.dedup();

        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            n => Err(DaylogError::InvalidInput(format!(
                "Id prefix '{}' matches {} entries",
                prefix, n
            ))),
        }
    }

    /// Create an entry on the viewed day, or on today for recurring kinds.
    ///
    /// Reflection kinds go through [`Journal::reflect`], so a day never holds
    /// two of the same reflection.
    pub async fn add(&mut self, content: &str, kind: EntryKind) -> Result<Entry> {
        if kind.is_reflection() {
            return self.reflect(kind, content).await;
        }
        self.insert(content, kind).await
    }

    async fn insert(&mut self, content: &str, kind: EntryKind) -> Result<Entry> {
        if content.trim().is_empty() {
            return Err(DaylogError::InvalidInput(
                "Entry content cannot be empty".to_string(),
            ));
        }

        let date = match kind.partition() {
            Partition::CarryOver => self.clock.today(),
            Partition::Daily => self.view.date,
        };
        let entry = Entry::new(kind, content, date, self.clock.now());
        self.persist(&entry, "add").await?;

        match kind.partition() {
            Partition::CarryOver => self.view.carry_over.push(entry.clone()),
            Partition::Daily => self.view.daily.push(entry.clone()),
        }
        info!(id = %entry.id, kind = %kind, %date, "entry added");
        Ok(entry)
    }

    /// Merge `patch` into a loaded entry and persist it.
    ///
    /// A recurring entry marked complete leaves the carry-over partition.
    /// Migrated entries are never changed.
    pub async fn update(&mut self, id: &Uuid, patch: EntryPatch) -> Result<Option<Entry>> {
        let Some(current) = self.find(id) else {
            return Ok(None);
        };
        if !current.is_active() {
            return Ok(None);
        }
        if patch.status == Some(EntryStatus::Migrated) {
            return Err(DaylogError::InvalidInput(
                "Entries are only marked migrated by a migration".to_string(),
            ));
        }
        if let Some(ref content) = patch.content {
            if content.trim().is_empty() {
                return Err(DaylogError::InvalidInput(
                    "Entry content cannot be empty".to_string(),
                ));
            }
        }

        let mut updated = current.clone();
        updated.apply(&patch);
        self.persist(&updated, "update").await?;

        replace(&mut self.view.daily, &updated);
        if updated.kind.is_recurring() && updated.status == EntryStatus::Complete {
            self.view.carry_over.retain(|entry| entry.id != updated.id);
        } else {
            replace(&mut self.view.carry_over, &updated);
        }
        Ok(Some(updated))
    }

    /// Write the viewed day's gratitude or journal reflection.
    ///
    /// Each reflection kind has at most one entry per day: an existing one is
    /// rewritten, otherwise a new one is added.
    pub async fn reflect(&mut self, kind: EntryKind, content: &str) -> Result<Entry> {
        if !kind.is_reflection() {
            return Err(DaylogError::InvalidInput(format!(
                "{} is not a reflection type",
                kind
            )));
        }

        let date = self.view.date;
        let existing = self
            .view
            .daily
            .iter()
            .find(|entry| entry.kind == kind && entry.date == date && entry.is_active())
            .map(|entry| entry.id);

        match existing {
            Some(id) => self
                .update(&id, EntryPatch::new().content(content))
                .await?
                .ok_or_else(|| DaylogError::Validation(format!("Reflection {} vanished", id))),
            None => self.insert(content, kind).await,
        }
    }

    /// Delete an entry everywhere. Unknown ids are fine.
    pub async fn delete(&mut self, id: &Uuid) -> Result<()> {
        if let Err(e) = self.store.delete(id).await {
            error!(id = %id, error = %e, kind = e.label(), "delete failed");
            return Err(e);
        }
        self.view.daily.retain(|entry| entry.id != *id);
        self.view.carry_over.retain(|entry| entry.id != *id);
        Ok(())
    }

    /// Move a task from the viewed day to `target`.
    ///
    /// The original is retired as `migrated` and a fresh incomplete copy is
    /// created on `target`. Only tasks in the daily partition qualify; anything
    /// else returns `Ok(None)`.
    pub async fn migrate(&mut self, id: &Uuid, target: NaiveDate) -> Result<Option<Entry>> {
        let Some(original) = self
            .view
            .daily
            .iter()
            .find(|entry| entry.id == *id && entry.kind == EntryKind::Task)
            .cloned()
        else {
            return Ok(None);
        };
        if !original.is_active() {
            return Ok(None);
        }

        let source = self.view.date;
        let clone = original.successor(
            target,
            Origin::MigratedFrom {
                source_date: source,
            },
            self.clock.now(),
        );
        let flagged = original.superseded(target);

        match self.store.record_migration(&clone, &flagged).await {
            Ok(true) => {}
            Ok(false) => return Ok(None),
            Err(e) => {
                error!(id = %id, %target, error = %e, kind = e.label(), "migration failed");
                return Err(e);
            }
        }

        replace(&mut self.view.daily, &flagged);
        if target == source {
            self.view.daily.push(clone.clone());
        }
        info!(original = %id, clone = %clone.id, from = %source, to = %target, "task migrated");
        Ok(Some(clone))
    }

    async fn persist(&self, entry: &Entry, action: &'static str) -> Result<()> {
        self.store.put(entry).await.map_err(|e| {
            error!(id = %entry.id, action, error = %e, kind = e.label(), "write failed");
            e
        })
    }
}

fn replace(entries: &mut [Entry], updated: &Entry) {
    if let Some(slot) = entries.iter_mut().find(|entry| entry.id == updated.id) {
        *slot = updated.clone();
    }
}
