//! String formatting utilities for UI rendering.

use chrono::NaiveDate;
use uuid::Uuid;

use daylog_core::{Entry, Origin};

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}

/// Format a short ID from a UUID (first 8 characters).
pub fn short_id(id: &Uuid) -> String {
    id.to_string()[..8].to_string()
}

/// Sanitize a string for single-line output (replace newlines with spaces).
pub fn single_line(s: &str) -> String {
    s.replace('\n', " ").replace('\r', "")
}

/// Day heading, e.g. "Sunday 10 March 2024".
pub fn format_day(date: NaiveDate) -> String {
    date.format("%A %-d %B %Y").to_string()
}

/// Where an entry came from, if it was moved.
pub fn lineage(entry: &Entry) -> Option<String> {
    match entry.origin {
        Some(Origin::CarriedOver { original_date }) => Some(format!("from {}", original_date)),
        Some(Origin::MigratedFrom { source_date }) => Some(format!("moved from {}", source_date)),
        None => entry.migrated_to.map(|target| format!("moved to {}", target)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use daylog_core::EntryKind;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hello", 2), "he");
    }

    #[test]
    fn test_short_id() {
        let id = Uuid::parse_str("7a2e3c0b-1234-5678-9abc-def012345678").unwrap();
        assert_eq!(short_id(&id), "7a2e3c0b");
    }

    #[test]
    fn test_format_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(format_day(date), "Sunday 10 March 2024");
    }

    #[test]
    fn test_lineage() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let entry = Entry::new(EntryKind::Task, "x", date, Utc::now()).with_origin(
            Origin::CarriedOver {
                original_date: NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
            },
        );
        assert_eq!(lineage(&entry).as_deref(), Some("from 2024-03-08"));
    }
}
