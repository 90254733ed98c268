//! Entry row type for database queries.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::Row;
use uuid::Uuid;

use crate::error::{DaylogError, Result};
use crate::storage::types::{Entry, EntryKind, EntryStatus, Origin};

/// Column list matching [`EntryRow::from_row`].
pub const ENTRY_COLUMNS: &str =
    "id, date, kind, status, content, created_at, migrated_to, origin_kind, origin_date";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw row data from the entries table, before parsing into domain types.
#[derive(Debug)]
pub struct EntryRow {
    pub id: String,
    pub date: String,
    pub kind: String,
    pub status: String,
    pub content: String,
    pub created_at: String,
    pub migrated_to: Option<String>,
    pub origin_kind: Option<String>,
    pub origin_date: Option<String>,
}

impl EntryRow {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            date: row.get(1)?,
            kind: row.get(2)?,
            status: row.get(3)?,
            content: row.get(4)?,
            created_at: row.get(5)?,
            migrated_to: row.get(6)?,
            origin_kind: row.get(7)?,
            origin_date: row.get(8)?,
        })
    }

    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            id: entry.id.to_string(),
            date: format_date(entry.date),
            kind: entry.kind.as_str().to_string(),
            status: entry.status.as_str().to_string(),
            content: entry.content.clone(),
            created_at: format_timestamp(entry.created_at),
            migrated_to: entry.migrated_to.map(format_date),
            origin_kind: entry.origin.map(|origin| origin.tag().to_string()),
            origin_date: entry.origin.map(|origin| format_date(origin.date())),
        }
    }
}

/// ISO calendar day, the only date format stored.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Fixed-width RFC 3339 so that text ordering matches time ordering.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_date(value: &str, column: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| DaylogError::Storage(format!("Invalid {} value {:?}: {}", column, value, e)))
}

impl TryFrom<EntryRow> for Entry {
    type Error = DaylogError;

    fn try_from(row: EntryRow) -> Result<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| DaylogError::Storage(format!("Invalid entry UUID: {}", e)))?;
        let date = parse_date(&row.date, "date")?;
        let kind: EntryKind = row.kind.parse()?;
        let status: EntryStatus = row.status.parse()?;
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map_err(|e| DaylogError::Storage(format!("Invalid timestamp: {}", e)))?
            .with_timezone(&Utc);
        let migrated_to = row
            .migrated_to
            .as_deref()
            .map(|value| parse_date(value, "migrated_to"))
            .transpose()?;
        let origin = match (row.origin_kind.as_deref(), row.origin_date.as_deref()) {
            (Some(tag), Some(value)) => Some(Origin::from_parts(tag, parse_date(value, "origin_date")?)?),
            (None, None) => None,
            _ => {
                return Err(DaylogError::Storage(format!(
                    "Entry {} has a partial origin",
                    row.id
                )))
            }
        };

        Ok(Entry {
            id,
            date,
            content: row.content,
            kind,
            status,
            created_at,
            migrated_to,
            origin,
        })
    }
}
