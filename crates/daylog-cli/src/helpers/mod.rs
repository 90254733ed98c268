//! Input and parsing helper functions for the CLI.
//!
//! - Passphrase prompting (`input`)
//! - Date, entry type and output format parsing (`parsing`)

mod input;
mod parsing;

pub use input::{join_content, prompt_init_passphrase, prompt_passphrase};
pub use parsing::{parse_day, parse_entry_kind, parse_output_format, OutputFormat};
