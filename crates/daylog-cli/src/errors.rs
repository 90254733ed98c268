//! CLI error types for structured error handling.
//!
//! Typed errors that map to specific exit codes. Anything else bubbles up
//! through `anyhow` and exits with 1.

use std::fmt;

use crate::constants::exit_codes;

#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config, journal, entry)
    NotFound { message: String, hint: String },

    /// Authentication failed (wrong passphrase, too many attempts)
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),

    /// Journal failed its integrity check
    IntegrityFailed(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message, hint } => {
                if let Some(h) = hint {
                    write!(f, "{}\n{}", message, h)
                } else {
                    write!(f, "{}", message)
                }
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
            CliError::IntegrityFailed(message) => write!(f, "Integrity check failed: {}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    pub fn auth_failed(message: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: None,
        }
    }

    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::IntegrityFailed(_) => exit_codes::INTEGRITY_FAILED,
        }
    }
}

/// Exit code for an error returned from a command.
///
/// Typed CLI errors keep their own code; core input errors count as invalid
/// input; everything else is a general failure.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(cli) = err.downcast_ref::<CliError>() {
        return cli.exit_code();
    }
    match err.downcast_ref::<daylog_core::DaylogError>() {
        Some(daylog_core::DaylogError::InvalidInput(_)) => exit_codes::INVALID_INPUT,
        Some(daylog_core::DaylogError::IncorrectPassphrase) => exit_codes::AUTH_FAILED,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::not_found("x", "y").exit_code(), exit_codes::NOT_FOUND);
        assert_eq!(CliError::auth_failed("x").exit_code(), exit_codes::AUTH_FAILED);
        assert_eq!(
            CliError::invalid_input("x").exit_code(),
            exit_codes::INVALID_INPUT
        );
    }

    #[test]
    fn test_exit_code_for_wrapped_errors() {
        let err = anyhow::Error::new(CliError::not_found("Entry not found", "hint"));
        assert_eq!(exit_code_for(&err), exit_codes::NOT_FOUND);

        let core = anyhow::Error::new(daylog_core::DaylogError::InvalidInput("empty".into()));
        assert_eq!(exit_code_for(&core), exit_codes::INVALID_INPUT);

        assert_eq!(exit_code_for(&anyhow::anyhow!("boom")), 1);
    }
}
