//! Serde helpers for the canonical stored timestamp form.
//!
//! Written as RFC 3339 in UTC with millisecond precision and a `Z` suffix
//! (`2024-01-15T10:30:00.000Z`). Any RFC 3339 instant is accepted on read.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Canonical text for `instant`.
pub fn canonical(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn serialize<S>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&canonical(instant))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| serde::de::Error::custom(format!("Invalid timestamp {:?}: {}", raw, e)))
}
