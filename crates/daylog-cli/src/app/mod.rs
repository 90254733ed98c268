//! Application-level utilities for the Daylog CLI.
//!
//! This module provides:
//! - Path resolution for config and journal files
//! - Passphrase handling with retry logic
//! - The per-invocation context that opens a journal session

mod context;
mod passphrase;
mod resolver;

pub use context::{AppContext, Session};
