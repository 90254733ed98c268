//! Input handling helpers for passphrases and entry content.

use dialoguer::Password;
use zeroize::Zeroizing;

use daylog_core::crypto::validate_passphrase;

use crate::constants::PASSPHRASE_ENV;
use crate::errors::CliError;

fn env_passphrase() -> Option<Zeroizing<String>> {
    std::env::var(PASSPHRASE_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(Zeroizing::new)
}

/// Prompt for the passphrase, or read it from `DAYLOG_PASSPHRASE`.
pub fn prompt_passphrase(interactive: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Some(value) = env_passphrase() {
        return Ok(value);
    }
    if !interactive {
        return Err(anyhow::anyhow!(
            "No passphrase provided and no TTY available. Set {}.",
            PASSPHRASE_ENV
        ));
    }
    Password::new()
        .with_prompt("Passphrase")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read passphrase: {}", e))
}

/// Prompt for a new passphrase with confirmation, or read it from
/// `DAYLOG_PASSPHRASE`.
pub fn prompt_init_passphrase(interactive: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Some(value) = env_passphrase() {
        validate_passphrase(&value)
            .map_err(|e| anyhow::anyhow!("Passphrase does not meet requirements: {}", e))?;
        return Ok(value);
    }
    if !interactive {
        return Err(anyhow::anyhow!(
            "No passphrase provided and no TTY available. Set {}.",
            PASSPHRASE_ENV
        ));
    }
    loop {
        let passphrase = Zeroizing::new(
            Password::new()
                .with_prompt("Enter passphrase")
                .with_confirmation("Confirm passphrase", "Passphrases do not match")
                .interact()
                .map_err(|e| anyhow::anyhow!("Failed to read passphrase: {}", e))?,
        );
        if let Err(err) = validate_passphrase(&passphrase) {
            eprintln!("Passphrase does not meet requirements: {}", err);
            continue;
        }
        return Ok(passphrase);
    }
}

/// Join positional words into entry content, trimmed.
pub fn join_content(words: &[String]) -> anyhow::Result<String> {
    let content = words.join(" ").trim().to_string();
    if content.is_empty() {
        return Err(CliError::invalid_input("Entry content cannot be empty").into());
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_content_trims() {
        let words = vec!["  Buy".to_string(), "milk ".to_string()];
        assert_eq!(join_content(&words).unwrap(), "Buy milk");
        assert!(join_content(&["  ".to_string()]).is_err());
    }
}
