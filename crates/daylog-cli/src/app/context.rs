//! Application context for the Daylog CLI.
//!
//! Combines CLI arguments with the lazily-loaded config file, and opens the
//! journal session commands work on.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use once_cell::unsync::OnceCell;
use tracing::debug;
use uuid::Uuid;

use daylog_core::{AgeSqliteStore, Clock, EntryStore, Journal, MemoryStore, SystemClock};

use crate::cli::{Cli, DayArgs};
use crate::config::DaylogConfig;
use crate::errors::CliError;
use crate::helpers::parse_day;

use super::passphrase::open_store_with_retry;
use super::resolver::{load_config, resolve_journal_path};

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<DaylogConfig>>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    pub fn interactive(&self) -> bool {
        std::io::stdin().is_terminal()
    }

    /// The config file, loaded on first use. `None` if there is no file.
    pub fn config(&self) -> anyhow::Result<Option<&DaylogConfig>> {
        self.config
            .get_or_try_init(load_config)
            .map(Option::as_ref)
    }

    pub fn journal_path(&self) -> anyhow::Result<PathBuf> {
        resolve_journal_path(self.cli, self.config()?)
    }

    /// Clock in the configured timezone, pinned when `--today` is given.
    pub fn clock(&self) -> anyhow::Result<SystemClock> {
        let timezone = match self.config()? {
            Some(config) => config.timezone()?,
            None => None,
        };
        let clock = match timezone {
            Some(tz) => SystemClock::with_timezone(tz),
            None => SystemClock::new(),
        };
        match self.cli.today.as_deref() {
            Some(value) => {
                let pinned = parse_day(value, clock.today())?;
                Ok(clock.pinned_to(pinned))
            }
            None => Ok(clock),
        }
    }

    /// Resolve a `--date` argument against the clock.
    pub fn day(&self, args: &DayArgs, clock: &dyn Clock) -> anyhow::Result<NaiveDate> {
        match args.date.as_deref() {
            Some(value) => parse_day(value, clock.today()),
            None => Ok(clock.today()),
        }
    }

    /// Open the encrypted journal with passphrase handling.
    pub fn open_store(&self) -> anyhow::Result<AgeSqliteStore> {
        let path = self.journal_path()?;
        open_store_with_retry(&path, self.interactive())
    }

    /// Open a journal session on the day selected by `args`.
    pub async fn open_session(&self, args: &DayArgs) -> anyhow::Result<Session> {
        let clock = Arc::new(self.clock()?);
        let date = self.day(args, clock.as_ref())?;

        let (store, encrypted): (Arc<dyn EntryStore>, Option<Arc<AgeSqliteStore>>) =
            if self.cli.ephemeral {
                if !self.quiet() {
                    eprintln!("Note: using an ephemeral journal; nothing will be saved.");
                }
                (Arc::new(MemoryStore::new()), None)
            } else {
                let store = Arc::new(self.open_store()?);
                (store.clone(), Some(store))
            };

        debug!(%date, ephemeral = self.cli.ephemeral, "opening session");
        let journal = Journal::open(store, clock, date).await?;
        Ok(Session { journal, encrypted })
    }
}

/// An open journal plus the file it must be written back to.
pub struct Session {
    pub journal: Journal,
    encrypted: Option<Arc<AgeSqliteStore>>,
}

impl Session {
    /// Resolve an id argument among the loaded entries.
    pub fn resolve(&self, text: &str) -> anyhow::Result<Uuid> {
        self.journal.resolve_id(text)?.ok_or_else(|| {
            CliError::not_found(
                format!("Entry not found: {}", text),
                format!(
                    "Hint: Run `daylog view --date {}` to list entry ids.",
                    self.journal.viewing_date()
                ),
            )
            .into()
        })
    }

    /// Write the journal back to disk.
    pub fn close(self) -> anyhow::Result<()> {
        let Session { journal, encrypted } = self;
        drop(journal);
        if let Some(store) = encrypted {
            store.flush()?;
        }
        Ok(())
    }
}
