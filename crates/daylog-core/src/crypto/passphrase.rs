//! Passphrase validation.
//!
//! Enforces minimum requirements before a passphrase is handed to age.

use crate::error::{DaylogError, Result};

/// Minimum passphrase length in characters.
const MIN_PASSPHRASE_LENGTH: usize = 8;

/// Validate that a passphrase meets minimum requirements.
///
/// A passphrase must not be blank and must be at least eight characters long.
///
/// # Examples
///
/// ```
/// use daylog_core::crypto::validate_passphrase;
///
/// assert!(validate_passphrase("morning-pages-2024").is_ok());
/// assert!(validate_passphrase("short").is_err());
/// ```
pub fn validate_passphrase(passphrase: &str) -> Result<()> {
    if passphrase.trim().is_empty() {
        return Err(DaylogError::InvalidInput(
            "Passphrase cannot be empty".to_string(),
        ));
    }

    let length = passphrase.chars().count();
    if length < MIN_PASSPHRASE_LENGTH {
        return Err(DaylogError::InvalidInput(format!(
            "Passphrase must be at least {} characters (got {})",
            MIN_PASSPHRASE_LENGTH, length
        )));
    }

    Ok(())
}
