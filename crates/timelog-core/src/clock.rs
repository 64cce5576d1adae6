//! Current-time source and the zone used for "local" input and display.
//!
//! Every place that needs "now" goes through a [`Clock`] so that default
//! timestamps and export filenames are deterministic under test.

use std::cell::Cell;
use std::fmt;

use chrono::{DateTime, Duration, Local, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{Result, TimelogError};

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock of the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: Cell<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// The zone that "local" refers to for this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalZone {
    /// The operating system's local zone
    #[default]
    System,
    /// An explicit IANA zone (e.g. from configuration)
    Named(Tz),
}

impl LocalZone {
    /// UTC as the local zone; handy for tests and headless hosts.
    pub fn utc() -> Self {
        LocalZone::Named(Tz::UTC)
    }

    /// Resolve a configured zone name. Empty or `auto` means the system zone.
    pub fn from_name(name: Option<&str>) -> Result<Self> {
        let trimmed = match name.map(str::trim) {
            None | Some("") => return Ok(LocalZone::System),
            Some(value) if value.eq_ignore_ascii_case("auto") => return Ok(LocalZone::System),
            Some(value) => value,
        };
        trimmed
            .parse::<Tz>()
            .map(LocalZone::Named)
            .map_err(|_| TimelogError::Validation(format!("Invalid timezone: {}", trimmed)))
    }

    /// Wall-clock reading of `instant` in this zone.
    pub fn to_naive(&self, instant: &DateTime<Utc>) -> NaiveDateTime {
        match self {
            LocalZone::System => instant.with_timezone(&Local).naive_local(),
            LocalZone::Named(tz) => instant.with_timezone(tz).naive_local(),
        }
    }

    /// Map a wall-clock reading in this zone back to an instant.
    ///
    /// Readings that occur twice (DST fold) resolve to the earlier instant;
    /// readings skipped by a DST gap return `None`.
    pub fn from_naive(&self, naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            LocalZone::System => Local
                .from_local_datetime(naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            LocalZone::Named(tz) => tz
                .from_local_datetime(naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }

    /// Format `instant` in this zone with a strftime pattern.
    pub fn format(&self, instant: &DateTime<Utc>, pattern: &str) -> String {
        match self {
            LocalZone::System => instant.with_timezone(&Local).format(pattern).to_string(),
            LocalZone::Named(tz) => instant.with_timezone(tz).format(pattern).to_string(),
        }
    }
}

impl fmt::Display for LocalZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalZone::System => write!(f, "system"),
            LocalZone::Named(tz) => write!(f, "{}", tz),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn naive(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_fixed_clock_advances() {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let clock = FixedClock::new(start);
        assert_eq!(clock.now(), start);
        clock.advance(Duration::seconds(90));
        assert_eq!(clock.now(), start + Duration::seconds(90));
    }

    #[test]
    fn test_from_name_variants() {
        assert_eq!(LocalZone::from_name(None).unwrap(), LocalZone::System);
        assert_eq!(LocalZone::from_name(Some("  ")).unwrap(), LocalZone::System);
        assert_eq!(LocalZone::from_name(Some("Auto")).unwrap(), LocalZone::System);
        assert_eq!(
            LocalZone::from_name(Some("Europe/Berlin")).unwrap(),
            LocalZone::Named(chrono_tz::Europe::Berlin)
        );
        assert!(matches!(
            LocalZone::from_name(Some("Mars/Olympus")),
            Err(TimelogError::Validation(_))
        ));
    }

    #[test]
    fn test_named_zone_round_trip() {
        let zone = LocalZone::Named(chrono_tz::America::New_York);
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 15, 30, 0).unwrap();
        let wall = zone.to_naive(&instant);
        assert_eq!(wall, naive(2024, 1, 15, 10, 30));
        assert_eq!(zone.from_naive(&wall), Some(instant));
    }

    #[test]
    fn test_dst_gap_is_rejected() {
        let zone = LocalZone::Named(chrono_tz::America::New_York);
        // 2024-03-10 02:30 does not exist in New York.
        assert_eq!(zone.from_naive(&naive(2024, 3, 10, 2, 30)), None);
    }

    #[test]
    fn test_dst_fold_takes_earliest() {
        let zone = LocalZone::Named(chrono_tz::America::New_York);
        // 2024-11-03 01:30 happens twice; the first is still EDT (UTC-4).
        let resolved = zone.from_naive(&naive(2024, 11, 3, 1, 30)).unwrap();
        assert_eq!(resolved, Utc.with_ymd_and_hms(2024, 11, 3, 5, 30, 0).unwrap());
    }
}
