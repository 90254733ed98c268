//! Parsing helpers for days, entry types and output format.

use chrono::{Duration, NaiveDate};

use daylog_core::EntryKind;

use crate::errors::CliError;

/// Parse a day argument relative to `today`.
///
/// Accepts `YYYY-MM-DD`, `today`, `yesterday` and `tomorrow`.
pub fn parse_day(value: &str, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    match value.trim().to_ascii_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => Ok(today - Duration::days(1)),
        "tomorrow" => Ok(today + Duration::days(1)),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d").map_err(|_| {
            CliError::invalid_input(format!(
                "Invalid date: {} (expected YYYY-MM-DD, today, yesterday or tomorrow)",
                value
            ))
            .into()
        }),
    }
}

pub fn parse_entry_kind(value: &str) -> anyhow::Result<EntryKind> {
    value.parse::<EntryKind>().map_err(|_| {
        let names: Vec<&str> = EntryKind::ALL.iter().map(|kind| kind.as_str()).collect();
        CliError::invalid_input(format!(
            "Unknown entry type: {} (expected one of {})",
            value,
            names.join(", ")
        ))
        .into()
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Plain,
}

pub fn parse_output_format(value: Option<&str>) -> anyhow::Result<Option<OutputFormat>> {
    match value {
        None => Ok(None),
        Some("table") => Ok(Some(OutputFormat::Table)),
        Some("plain") => Ok(Some(OutputFormat::Plain)),
        Some(other) => Err(CliError::invalid_input(format!(
            "Unsupported format: {} (use table or plain)",
            other
        ))
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_day_keywords() {
        let today = day("2024-03-10");
        assert_eq!(parse_day("today", today).unwrap(), today);
        assert_eq!(parse_day("Yesterday", today).unwrap(), day("2024-03-09"));
        assert_eq!(parse_day("tomorrow", today).unwrap(), day("2024-03-11"));
        assert_eq!(parse_day("2024-02-29", today).unwrap(), day("2024-02-29"));
        assert!(parse_day("10/03/2024", today).is_err());
    }

    #[test]
    fn test_parse_entry_kind() {
        assert_eq!(parse_entry_kind("evening-journal").unwrap(), EntryKind::EveningJournal);
        assert!(parse_entry_kind("chore").is_err());
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format(Some("plain")).unwrap(), Some(OutputFormat::Plain));
        assert!(parse_output_format(Some("csv")).is_err());
    }
}
