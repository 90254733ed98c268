//! JSON output.

use serde::Serialize;

/// Print `value` as pretty JSON on stdout.
///
/// Entries keep their journal wire names (`type`, `createdAt`,
/// `originalDate`, ...).
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let output = serde_json::to_string_pretty(value)?;
    println!("{}", output);
    Ok(())
}
