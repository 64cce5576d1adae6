//! CSV export of the entry collection.

use chrono::{DateTime, Utc};

use crate::clock::LocalZone;
use crate::entries::Entry;
use crate::error::{Result, TimelogError};
use crate::format::{escape_for_delimited_field, format_local, format_utc};
use crate::storage::timestamp;

/// Header row of the exported document.
pub const CSV_HEADER: &str =
    "Timestamp (ISO),Timestamp (Local),Timestamp (UTC),Description,Notes";

/// Media type of the exported document.
pub const CSV_MIME: &str = "text/csv;charset=utf-8";

/// A ready-to-save export: what to call it and what to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub mime: &'static str,
    pub content: String,
}

impl CsvExport {
    /// Build the export for `entries`, named after the UTC date of `now`.
    ///
    /// # Errors
    ///
    /// Returns `TimelogError::EmptyCollection` when `entries` is empty.
    pub fn build(entries: &[Entry], zone: &LocalZone, now: &DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            filename: export_filename(now),
            mime: CSV_MIME,
            content: csv_document(entries, zone)?,
        })
    }
}

/// `time_tracker_<YYYY-MM-DD>.csv` for the UTC date of `now`.
pub fn export_filename(now: &DateTime<Utc>) -> String {
    format!("time_tracker_{}.csv", now.format("%Y-%m-%d"))
}

/// Header plus one row per entry, in the given order, joined by `\n`.
pub fn csv_document(entries: &[Entry], zone: &LocalZone) -> Result<String> {
    if entries.is_empty() {
        return Err(TimelogError::EmptyCollection);
    }

    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for entry in entries {
        lines.push(csv_row(entry, zone));
    }
    Ok(lines.join("\n"))
}

fn csv_row(entry: &Entry, zone: &LocalZone) -> String {
    let iso = timestamp::canonical(&entry.timestamp);
    let local = format_local(&entry.timestamp, zone);
    let utc = format_utc(&entry.timestamp);

    [
        escape_for_delimited_field(Some(&iso)),
        escape_for_delimited_field(Some(&local)),
        escape_for_delimited_field(Some(&utc)),
        escape_for_delimited_field(Some(&entry.description)),
        escape_for_delimited_field(entry.notes.as_deref()),
    ]
    .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entries::EntryId;
    use chrono::TimeZone;

    fn entry(description: &str, notes: Option<&str>) -> Entry {
        Entry {
            id: EntryId::new("1"),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
            description: description.to_string(),
            notes: notes.map(str::to_string),
        }
    }

    #[test]
    fn test_empty_is_error() {
        assert!(matches!(
            csv_document(&[], &LocalZone::utc()),
            Err(TimelogError::EmptyCollection)
        ));
    }

    #[test]
    fn test_single_entry_document() {
        let doc = csv_document(&[entry("Standup", None)], &LocalZone::utc()).unwrap();
        let lines: Vec<&str> = doc.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(
            lines[1],
            "2024-01-15T10:30:00.000Z,\"01/15/2024, 10:30:00 AM\",2024-01-15 10:30:00 UTC,Standup,"
        );
    }

    #[test]
    fn test_fields_are_quoted() {
        let doc = csv_document(&[entry("a,b\"c", Some("two\nlines"))], &LocalZone::utc()).unwrap();
        assert!(doc.ends_with(",\"a,b\"\"c\",\"two\nlines\""));
    }

    #[test]
    fn test_build_names_file_by_utc_date() {
        let now = Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap();
        let export = CsvExport::build(&[entry("x", None)], &LocalZone::utc(), &now).unwrap();
        assert_eq!(export.filename, "time_tracker_2024-02-29.csv");
        assert_eq!(export.mime, "text/csv;charset=utf-8");
        assert!(export.content.starts_with(CSV_HEADER));
    }
}
