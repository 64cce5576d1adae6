//! Timestamp display, timestamp input parsing, and escaping for HTML and CSV.
//!
//! Everything here is a pure function of its arguments.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::LocalZone;
use crate::error::{Result, TimelogError};

/// Pattern used for the 12-hour local display.
const LOCAL_PATTERN: &str = "%m/%d/%Y, %I:%M:%S %p";

/// Pattern used for the UTC display.
const UTC_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

/// Pattern used to present a timestamp in an editable form field.
const INPUT_PATTERN: &str = "%Y-%m-%dT%H:%M:%S";

/// Naive input layouts accepted in addition to RFC 3339.
const NAIVE_INPUT_PATTERNS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Which clock entries are displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimezoneMode {
    #[default]
    Local,
    Utc,
}

impl fmt::Display for TimezoneMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimezoneMode::Local => write!(f, "local"),
            TimezoneMode::Utc => write!(f, "utc"),
        }
    }
}

impl FromStr for TimezoneMode {
    type Err = TimelogError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(TimezoneMode::Local),
            "utc" => Ok(TimezoneMode::Utc),
            other => Err(TimelogError::Validation(format!(
                "Unknown timezone mode: {} (use local or utc)",
                other
            ))),
        }
    }
}

/// Render `instant` for display in the given mode.
///
/// - `Utc`: `2024-01-15 10:30:00 UTC`
/// - `Local`: `01/15/2024, 10:30:00 AM (Local)`, in `zone`
pub fn format_timestamp(instant: &DateTime<Utc>, mode: TimezoneMode, zone: &LocalZone) -> String {
    match mode {
        TimezoneMode::Utc => format_utc(instant),
        TimezoneMode::Local => format!("{} (Local)", format_local(instant, zone)),
    }
}

/// UTC rendering with seconds precision and a `UTC` suffix.
pub fn format_utc(instant: &DateTime<Utc>) -> String {
    format!("{} UTC", instant.format(UTC_PATTERN))
}

/// 12-hour local rendering without the `(Local)` marker.
pub fn format_local(instant: &DateTime<Utc>, zone: &LocalZone) -> String {
    zone.format(instant, LOCAL_PATTERN)
}

/// Value placed in the form's date/time field for `instant`.
pub fn timestamp_input(instant: &DateTime<Utc>, zone: &LocalZone) -> String {
    zone.to_naive(instant).format(INPUT_PATTERN).to_string()
}

/// Parse a date/time typed into the form.
///
/// RFC 3339 values carry their own offset. Naive values are wall-clock
/// readings in `zone`.
pub fn parse_timestamp_input(value: &str, zone: &LocalZone) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TimelogError::Validation("Date/time is required".to_string()));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    let naive = NAIVE_INPUT_PATTERNS
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(trimmed, pattern).ok())
        .ok_or_else(|| {
            TimelogError::Validation(format!(
                "Invalid date/time (expected YYYY-MM-DDTHH:MM[:SS] or RFC 3339): {}",
                trimmed
            ))
        })?;

    zone.from_naive(&naive).ok_or_else(|| {
        TimelogError::Validation(format!(
            "Date/time does not exist in the {} timezone: {}",
            zone, trimmed
        ))
    })
}

/// Neutralize markup-significant characters for embedding in HTML.
pub fn escape_for_display(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Quote a CSV field when it contains a comma, a double quote or a line break
/// (`\n` or `\r`).
pub fn escape_for_delimited_field(field: Option<&str>) -> String {
    let Some(value) = field else {
        return String::new();
    };
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
