//! Path resolution for config and journal files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{read_config, resolve_config_path, DaylogConfig};
use crate::errors::CliError;

/// Load the config file if it exists.
pub fn load_config() -> anyhow::Result<Option<DaylogConfig>> {
    let config_path = resolve_config_path()?;
    if !config_path.exists() {
        return Ok(None);
    }
    read_config(&config_path).map(Some)
}

/// Resolve the journal path from CLI args or config.
pub fn resolve_journal_path(cli: &Cli, config: Option<&DaylogConfig>) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.journal.as_deref() {
        return Ok(PathBuf::from(path));
    }
    match config {
        Some(config) => Ok(PathBuf::from(&config.journal.path)),
        None => {
            let config_path = resolve_config_path()?;
            Err(CliError::not_found(
                missing_config_message(&config_path),
                "Hint: Run `daylog init` or pass --journal.",
            )
            .into())
        }
    }
}

pub fn missing_journal_message(path: &Path) -> String {
    format!(
        "No journal found at {}\n\nRun:\n  daylog init\n\nOr specify a journal path:\n  DAYLOG_PATH=/path/to/my.daylog daylog init",
        path.display()
    )
}

pub fn missing_config_message(config_path: &Path) -> String {
    format!("No config found at {}", config_path.display())
}
