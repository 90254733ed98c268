//! Core data types for the journal.
//!
//! `Entry` is the only persisted journal record. Its wire form (JSON export,
//! `--json` output) keeps the camelCase field names of the journal data
//! model: `type`, `createdAt`, `migratedFrom`, `migratedTo`, `originalDate`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DaylogError;

/// Kind of journal entry. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    Task,
    Note,
    Event,
    Gratitude,
    Goal,
    Important,
    Habit,
    MorningJournal,
    EveningJournal,
}

/// In-memory partition an entry is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    /// Date-scoped entries shown for the viewed day.
    Daily,
    /// Recurring entries shown on every day until resolved.
    CarryOver,
}

impl EntryKind {
    pub const ALL: [EntryKind; 9] = [
        EntryKind::Task,
        EntryKind::Note,
        EntryKind::Event,
        EntryKind::Gratitude,
        EntryKind::Goal,
        EntryKind::Important,
        EntryKind::Habit,
        EntryKind::MorningJournal,
        EntryKind::EveningJournal,
    ];

    /// Recurring kinds, in carry-over display order.
    pub const RECURRING: [EntryKind; 3] = [EntryKind::Goal, EntryKind::Important, EntryKind::Habit];

    /// Kinds that roll into today when left incomplete on an earlier day.
    pub const ROLLING: [EntryKind; 3] = [EntryKind::Task, EntryKind::Note, EntryKind::Event];

    /// Wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Task => "task",
            EntryKind::Note => "note",
            EntryKind::Event => "event",
            EntryKind::Gratitude => "gratitude",
            EntryKind::Goal => "goal",
            EntryKind::Important => "important",
            EntryKind::Habit => "habit",
            EntryKind::MorningJournal => "morningJournal",
            EntryKind::EveningJournal => "eveningJournal",
        }
    }

    pub fn partition(&self) -> Partition {
        match self {
            EntryKind::Goal | EntryKind::Important | EntryKind::Habit => Partition::CarryOver,
            EntryKind::Task
            | EntryKind::Note
            | EntryKind::Event
            | EntryKind::Gratitude
            | EntryKind::MorningJournal
            | EntryKind::EveningJournal => Partition::Daily,
        }
    }

    /// Goals, important items and habits persist across days.
    pub fn is_recurring(&self) -> bool {
        self.partition() == Partition::CarryOver
    }

    pub fn rolls_over(&self) -> bool {
        matches!(self, EntryKind::Task | EntryKind::Note | EntryKind::Event)
    }

    /// At most one entry of a reflection kind exists per day.
    pub fn is_reflection(&self) -> bool {
        matches!(
            self,
            EntryKind::Gratitude | EntryKind::MorningJournal | EntryKind::EveningJournal
        )
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = DaylogError;

    /// Accepts wire names case-insensitively, with or without `-`/`_`
    /// separators (`morningJournal`, `morning-journal`, `morning_journal`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        EntryKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().to_ascii_lowercase() == normalized)
            .ok_or_else(|| DaylogError::InvalidInput(format!("Unknown entry type: {}", value)))
    }
}

/// Completion state of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryStatus {
    Incomplete,
    Complete,
    /// Terminal: superseded by a migration clone.
    Migrated,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Incomplete => "incomplete",
            EntryStatus::Complete => "complete",
            EntryStatus::Migrated => "migrated",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryStatus {
    type Err = DaylogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "incomplete" => Ok(EntryStatus::Incomplete),
            "complete" => Ok(EntryStatus::Complete),
            "migrated" => Ok(EntryStatus::Migrated),
            other => Err(DaylogError::InvalidInput(format!(
                "Unknown entry status: {}",
                other
            ))),
        }
    }
}

/// How a clone came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Rolled into today automatically; `original_date` is the day it was
    /// overdue from.
    CarriedOver { original_date: NaiveDate },
    /// Moved by the user from the day that was being viewed.
    MigratedFrom { source_date: NaiveDate },
}

impl Origin {
    /// Storage tag for the variant.
    pub fn tag(&self) -> &'static str {
        match self {
            Origin::CarriedOver { .. } => "carried_over",
            Origin::MigratedFrom { .. } => "migrated_from",
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            Origin::CarriedOver { original_date } => *original_date,
            Origin::MigratedFrom { source_date } => *source_date,
        }
    }

    /// Rebuild from the storage tag and date.
    pub fn from_parts(tag: &str, date: NaiveDate) -> Result<Self, DaylogError> {
        match tag {
            "carried_over" => Ok(Origin::CarriedOver {
                original_date: date,
            }),
            "migrated_from" => Ok(Origin::MigratedFrom { source_date: date }),
            other => Err(DaylogError::Storage(format!("Unknown origin tag: {}", other))),
        }
    }
}

/// A journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "EntryRecord", try_from = "EntryRecord")]
pub struct Entry {
    /// Unique identifier, never reused
    pub id: Uuid,

    /// Day this entry belongs to (ignored by queries for recurring kinds)
    pub date: NaiveDate,

    /// Plaintext content
    pub content: String,

    pub kind: EntryKind,

    pub status: EntryStatus,

    /// Set once at creation; used for display order only
    pub created_at: DateTime<Utc>,

    /// Target day of the migration that superseded this entry
    pub migrated_to: Option<NaiveDate>,

    /// Lineage for entries created by a migration
    pub origin: Option<Origin>,
}

impl Entry {
    /// Create a fresh, incomplete entry with a new id.
    pub fn new(
        kind: EntryKind,
        content: impl Into<String>,
        date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            content: content.into(),
            kind,
            status: EntryStatus::Incomplete,
            created_at,
            migrated_to: None,
            origin: None,
        }
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Migrated entries are history only and never shown in active lists.
    pub fn is_active(&self) -> bool {
        self.status != EntryStatus::Migrated
    }

    /// Incomplete task/note/event dated strictly before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.kind.rolls_over() && self.status == EntryStatus::Incomplete && self.date < today
    }

    /// Build the clone that continues this entry on `date`.
    pub fn successor(&self, date: NaiveDate, origin: Origin, created_at: DateTime<Utc>) -> Entry {
        Entry::new(self.kind, self.content.clone(), date, created_at).with_origin(origin)
    }

    /// Copy of this entry flagged as superseded by a migration to `target`.
    pub fn superseded(&self, target: NaiveDate) -> Entry {
        Entry {
            status: EntryStatus::Migrated,
            migrated_to: Some(target),
            ..self.clone()
        }
    }

    /// Merge a partial update into this entry.
    pub fn apply(&mut self, patch: &EntryPatch) {
        if let Some(ref content) = patch.content {
            self.content = content.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// Partial update for [`Entry`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryPatch {
    pub content: Option<String>,
    pub status: Option<EntryStatus>,
}

impl EntryPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn status(mut self, status: EntryStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Wire shape of an entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntryRecord {
    id: Uuid,
    date: NaiveDate,
    content: String,
    #[serde(rename = "type")]
    kind: EntryKind,
    status: EntryStatus,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    migrated_from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    migrated_to: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    original_date: Option<NaiveDate>,
}

impl From<Entry> for EntryRecord {
    fn from(entry: Entry) -> Self {
        let (migrated_from, original_date) = match entry.origin {
            Some(Origin::MigratedFrom { source_date }) => (Some(source_date), None),
            Some(Origin::CarriedOver { original_date }) => (None, Some(original_date)),
            None => (None, None),
        };
        Self {
            id: entry.id,
            date: entry.date,
            content: entry.content,
            kind: entry.kind,
            status: entry.status,
            created_at: entry.created_at,
            migrated_from,
            migrated_to: entry.migrated_to,
            original_date,
        }
    }
}

impl TryFrom<EntryRecord> for Entry {
    type Error = DaylogError;

    fn try_from(record: EntryRecord) -> Result<Self, Self::Error> {
        let origin = match (record.migrated_from, record.original_date) {
            (Some(_), Some(_)) => {
                return Err(DaylogError::Validation(
                    "Entry cannot have both migratedFrom and originalDate".to_string(),
                ))
            }
            (Some(source_date), None) => Some(Origin::MigratedFrom { source_date }),
            (None, Some(original_date)) => Some(Origin::CarriedOver { original_date }),
            (None, None) => None,
        };
        Ok(Self {
            id: record.id,
            date: record.date,
            content: record.content,
            kind: record.kind,
            status: record.status,
            created_at: record.created_at,
            migrated_to: record.migrated_to,
            origin,
        })
    }
}

/// Metadata for a journal file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalMetadata {
    /// Format version (e.g., "0.1")
    pub format_version: String,

    /// When this journal was created
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp (informational)
    pub last_modified: DateTime<Utc>,
}
