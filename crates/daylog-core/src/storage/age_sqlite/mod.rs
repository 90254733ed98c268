//! Age-encrypted SQLite storage backend.
//!
//! The journal is an SQLite database held in memory. `flush` serializes it,
//! encrypts the bytes with age and replaces the file atomically; `open`
//! reverses that. Nothing touches disk between flushes.

mod file;
mod row;

use std::fs;
use std::path::{Path, PathBuf};
use std::ptr::NonNull;
use std::sync::{Mutex, MutexGuard};

use age::secrecy::{ExposeSecret, SecretString};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::serialize::OwnedData;
use rusqlite::{params, params_from_iter, Connection, DatabaseName, OptionalExtension};
use tracing::debug;
use uuid::Uuid;

use crate::crypto::validate_passphrase;
use crate::error::{DaylogError, Result};
use crate::settings::{Settings, SETTINGS_KEY};
use crate::storage::encryption::{decrypt, encrypt};
use crate::storage::traits::EntryStore;
use crate::storage::types::{Entry, EntryKind, EntryStatus, JournalMetadata};

use file::write_atomic;
use row::{format_date, format_timestamp, EntryRow, ENTRY_COLUMNS};

/// Current on-disk format.
pub const FORMAT_VERSION: &str = "0.1";

const SCHEMA: &str = r#"
    CREATE TABLE meta (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE entries (
        id TEXT PRIMARY KEY,
        date TEXT NOT NULL,
        kind TEXT NOT NULL,
        status TEXT NOT NULL,
        content TEXT NOT NULL,
        created_at TEXT NOT NULL,
        migrated_to TEXT,
        origin_kind TEXT,
        origin_date TEXT,

        CHECK ((origin_kind IS NULL) = (origin_date IS NULL))
    );

    CREATE INDEX entries_date ON entries (date);
    CREATE INDEX entries_kind_status ON entries (kind, status);

    CREATE TABLE settings (
        key TEXT PRIMARY KEY,
        value_json TEXT NOT NULL
    );
"#;

/// Age-encrypted SQLite entry store.
pub struct AgeSqliteStore {
    path: PathBuf,
    conn: Mutex<Connection>,
    // Retained so that flush can re-encrypt without prompting again.
    passphrase: SecretString,
}

impl AgeSqliteStore {
    /// Create a new, empty journal file at `path`.
    ///
    /// # Errors
    ///
    /// Fails if the file already exists, the passphrase is too weak, or the
    /// file cannot be written.
    pub fn create(path: &Path, passphrase: &str) -> Result<()> {
        if path.exists() {
            return Err(DaylogError::Storage(
                "Journal file already exists".to_string(),
            ));
        }
        validate_passphrase(passphrase)?;

        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;

        let created_at = format_timestamp(Utc::now());
        for (key, value) in [
            ("format_version", FORMAT_VERSION),
            ("created_at", created_at.as_str()),
            ("last_modified", created_at.as_str()),
        ] {
            conn.execute("INSERT INTO meta (key, value) VALUES (?, ?)", [key, value])?;
        }

        let plaintext = conn.serialize(DatabaseName::Main)?;
        let encrypted = encrypt(plaintext.as_ref(), passphrase)?;
        write_atomic(path, &encrypted)?;
        debug!(path = %path.display(), "journal created");
        Ok(())
    }

    /// Open an existing journal, returning a ready handle.
    ///
    /// # Errors
    ///
    /// Returns `DaylogError::JournalNotFound` if there is no file at `path`
    /// and `DaylogError::IncorrectPassphrase` if the passphrase is wrong.
    pub fn open(path: &Path, passphrase: &str) -> Result<Self> {
        if !path.exists() {
            return Err(DaylogError::JournalNotFound);
        }
        validate_passphrase(passphrase)?;

        let encrypted = fs::read(path)?;
        let plaintext = decrypt(&encrypted, passphrase)?;
        let mut conn = Connection::open_in_memory()?;
        conn.deserialize(DatabaseName::Main, owned_data_from_bytes(&plaintext)?, false)?;

        let format_version: Option<String> = conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'format_version'",
                [],
                |row| row.get(0),
            )
            .optional()?;
        match format_version.as_deref() {
            Some(FORMAT_VERSION) => {}
            Some(other) => {
                return Err(DaylogError::Storage(format!(
                    "Unsupported journal format version: {}",
                    other
                )))
            }
            None => {
                return Err(DaylogError::Storage(
                    "Journal metadata is missing format_version".to_string(),
                ))
            }
        }

        debug!(path = %path.display(), "journal opened");
        Ok(Self {
            path: path.to_path_buf(),
            conn: Mutex::new(conn),
            passphrase: SecretString::from(passphrase.to_string()),
        })
    }

    /// Encrypt the current database and atomically replace the file.
    pub fn flush(&self) -> Result<()> {
        let encrypted = {
            let conn = self.lock_conn()?;
            let data = conn.serialize(DatabaseName::Main)?;
            encrypt(data.as_ref(), self.passphrase.expose_secret())?
        };
        write_atomic(&self.path, &encrypted)?;
        debug!(path = %self.path.display(), bytes = encrypted.len(), "journal flushed");
        Ok(())
    }

    /// Flush and release the handle.
    pub fn close(self) -> Result<()> {
        self.flush()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata(&self) -> Result<JournalMetadata> {
        let conn = self.lock_conn()?;
        let read = |key: &str| -> Result<String> {
            conn.query_row("SELECT value FROM meta WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .map_err(DaylogError::from)
        };
        let parse = |value: String, key: &str| -> Result<DateTime<Utc>> {
            DateTime::parse_from_rfc3339(&value)
                .map(|ts| ts.with_timezone(&Utc))
                .map_err(|e| DaylogError::Storage(format!("Invalid {} timestamp: {}", key, e)))
        };

        Ok(JournalMetadata {
            format_version: read("format_version")?,
            created_at: parse(read("created_at")?, "created_at")?,
            last_modified: parse(read("last_modified")?, "last_modified")?,
        })
    }

    /// Verify the database and every stored entry.
    ///
    /// Checks SQLite's own integrity, the required metadata keys, that every
    /// row parses into an [`Entry`], and that `migrated` rows (and only those)
    /// carry a migration target.
    pub fn check_integrity(&self) -> Result<()> {
        let conn = self.lock_conn()?;

        let verdict: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        if verdict != "ok" {
            return Err(DaylogError::Storage(format!(
                "SQLite integrity check failed: {}",
                verdict
            )));
        }

        let metadata_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM meta WHERE key IN ('format_version', 'created_at', 'last_modified')",
            [],
            |row| row.get(0),
        )?;
        if metadata_count < 3 {
            return Err(DaylogError::Storage(
                "Metadata table missing required keys".to_string(),
            ));
        }

        let mut stmt = conn.prepare(&format!("SELECT {} FROM entries", ENTRY_COLUMNS))?;
        let rows = stmt.query_map([], EntryRow::from_row)?;
        for row in rows {
            let entry: Entry = row?.try_into()?;
            let migrated = entry.status == EntryStatus::Migrated;
            if migrated != entry.migrated_to.is_some() {
                return Err(DaylogError::Validation(format!(
                    "Entry {} has status {} but migrated_to {:?}",
                    entry.id, entry.status, entry.migrated_to
                )));
            }
        }

        Ok(())
    }

    /// Stored settings, or the defaults if none were saved yet.
    pub fn load_settings(&self) -> Result<Settings> {
        let conn = self.lock_conn()?;
        let value: Option<String> = conn
            .query_row(
                "SELECT value_json FROM settings WHERE key = ?",
                [SETTINGS_KEY],
                |row| row.get(0),
            )
            .optional()?;
        match value {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Settings::default()),
        }
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        let json = serde_json::to_string(settings)?;
        let conn = self.lock_conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO settings (key, value_json) VALUES (?, ?)",
            [SETTINGS_KEY, json.as_str()],
        )?;
        touch(&conn)?;
        Ok(())
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| DaylogError::StoreUnavailable("SQLite connection poisoned".to_string()))
    }
}

fn upsert(conn: &Connection, entry: &Entry) -> Result<()> {
    let row = EntryRow::from_entry(entry);
    conn.execute(
        &format!(
            "INSERT OR REPLACE INTO entries ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            ENTRY_COLUMNS
        ),
        params![
            row.id,
            row.date,
            row.kind,
            row.status,
            row.content,
            row.created_at,
            row.migrated_to,
            row.origin_kind,
            row.origin_date,
        ],
    )?;
    Ok(())
}

fn touch(conn: &Connection) -> Result<()> {
    conn.execute(
        "UPDATE meta SET value = ? WHERE key = 'last_modified'",
        [format_timestamp(Utc::now())],
    )?;
    Ok(())
}

fn query_entries<P: rusqlite::Params>(conn: &Connection, filter: &str, params: P) -> Result<Vec<Entry>> {
    let sql = format!(
        "SELECT {} FROM entries WHERE {} ORDER BY created_at ASC",
        ENTRY_COLUMNS, filter
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params, EntryRow::from_row)?;

    let mut entries = Vec::new();
    for row in rows {
        entries.push(row?.try_into()?);
    }
    Ok(entries)
}

fn owned_data_from_bytes(bytes: &[u8]) -> Result<OwnedData> {
    if bytes.is_empty() {
        return Err(DaylogError::Storage("SQLite payload is empty".to_string()));
    }

    let size: i32 = bytes
        .len()
        .try_into()
        .map_err(|_| DaylogError::Storage("SQLite payload too large".to_string()))?;

    // SAFETY: sqlite3_malloc returns either null or a buffer of `size` bytes;
    // null is rejected below.
    let raw = unsafe { rusqlite::ffi::sqlite3_malloc(size) as *mut u8 };
    let ptr = NonNull::new(raw)
        .ok_or_else(|| DaylogError::Storage("SQLite allocation failed".to_string()))?;

    // SAFETY: `ptr` points to a fresh allocation of exactly `bytes.len()`
    // bytes that cannot overlap `bytes`. OwnedData takes ownership of the
    // sqlite3_malloc buffer and frees it through SQLite.
    unsafe {
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), ptr.as_ptr(), bytes.len());
        Ok(OwnedData::from_raw_nonnull(ptr, bytes.len()))
    }
}

#[async_trait]
impl EntryStore for AgeSqliteStore {
    async fn put(&self, entry: &Entry) -> Result<()> {
        let conn = self.lock_conn()?;
        upsert(&conn, entry)?;
        touch(&conn)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Entry>> {
        let conn = self.lock_conn()?;
        let mut found = query_entries(&conn, "id = ?", [id.to_string()])?;
        Ok(found.pop())
    }

    async fn entries_on(&self, date: NaiveDate) -> Result<Vec<Entry>> {
        let conn = self.lock_conn()?;
        query_entries(&conn, "date = ?", [format_date(date)])
    }

    async fn entries_by_kind_and_status(
        &self,
        kind: EntryKind,
        status: EntryStatus,
    ) -> Result<Vec<Entry>> {
        let conn = self.lock_conn()?;
        query_entries(
            &conn,
            "kind = ? AND status = ?",
            [kind.as_str(), status.as_str()],
        )
    }

    async fn entries_by_kinds_and_status(
        &self,
        kinds: &[EntryKind],
        status: EntryStatus,
    ) -> Result<Vec<Entry>> {
        if kinds.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; kinds.len()].join(", ");
        let filter = format!("kind IN ({}) AND status = ?", placeholders);
        let values = kinds
            .iter()
            .map(|kind| kind.as_str())
            .chain(std::iter::once(status.as_str()));

        let conn = self.lock_conn()?;
        query_entries(&conn, &filter, params_from_iter(values))
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        let conn = self.lock_conn()?;
        let removed = conn.execute("DELETE FROM entries WHERE id = ?", [id.to_string()])?;
        if removed > 0 {
            touch(&conn)?;
        }
        Ok(())
    }

    async fn record_migration(&self, clone: &Entry, original: &Entry) -> Result<bool> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let stored_status: Option<String> = tx
            .query_row(
                "SELECT status FROM entries WHERE id = ?",
                [original.id.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        match stored_status.as_deref() {
            None => return Ok(false),
            Some(status) if status == EntryStatus::Migrated.as_str() => return Ok(false),
            Some(_) => {}
        }

        upsert(&tx, clone)?;
        upsert(&tx, original)?;
        touch(&tx)?;
        tx.commit()?;
        Ok(true)
    }
}
