//! Passphrase handling and journal opening with retry logic.

use std::path::Path;

use zeroize::Zeroizing;

use daylog_core::{AgeSqliteStore, DaylogError};

use crate::constants::{MAX_PASSPHRASE_ATTEMPTS, PASSPHRASE_ENV};
use crate::errors::CliError;
use crate::helpers::prompt_passphrase;

use super::resolver::missing_journal_message;

/// Open the journal, prompting again after a wrong passphrase when a TTY is
/// available.
pub fn open_store_with_retry(path: &Path, interactive: bool) -> anyhow::Result<AgeSqliteStore> {
    if !path.exists() {
        return Err(CliError::not_found(
            missing_journal_message(path),
            "Hint: Check --journal or the path in your config.",
        )
        .into());
    }

    let from_env = std::env::var(PASSPHRASE_ENV)
        .map(|value| !value.trim().is_empty())
        .unwrap_or(false);
    let max_attempts = if interactive && !from_env {
        MAX_PASSPHRASE_ATTEMPTS
    } else {
        1
    };
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        let passphrase: Zeroizing<String> = prompt_passphrase(interactive)?;
        match AgeSqliteStore::open(path, &passphrase) {
            Ok(store) => return Ok(store),
            Err(DaylogError::IncorrectPassphrase) => {
                let remaining = max_attempts.saturating_sub(attempts);
                if remaining == 0 {
                    let err = if max_attempts > 1 {
                        CliError::auth_failed_with_hint(
                            "Too many failed passphrase attempts.",
                            "Hint: If you forgot your passphrase, the journal cannot be recovered.",
                        )
                    } else {
                        CliError::auth_failed("Incorrect passphrase.")
                    };
                    return Err(err.into());
                }
                eprintln!(
                    "Incorrect passphrase. {} attempt{} remaining.",
                    remaining,
                    if remaining == 1 { "" } else { "s" }
                );
            }
            Err(DaylogError::JournalNotFound) => {
                return Err(CliError::not_found(missing_journal_message(path), "").into());
            }
            Err(err) => return Err(err.into()),
        }
    }
}
