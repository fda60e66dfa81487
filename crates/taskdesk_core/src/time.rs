//! Conversions between nanosecond timestamps and calendar dates.
//!
//! # Invariants
//! - `nanos_to_millis(millis_to_nanos(t)) == t` for every millisecond `t`.
//! - Calendar conversions use UTC; a date maps to its midnight.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::model::Time;

pub const NANOS_PER_MILLI: i64 = 1_000_000;
pub const NANOS_PER_DAY: i64 = 86_400_000_000_000;

/// Placeholder rendered for missing values in display formats.
pub const PLACEHOLDER: &str = "—";

const IMPORT_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

pub fn millis_to_nanos(millis: i64) -> Time {
    millis.saturating_mul(NANOS_PER_MILLI)
}

pub fn nanos_to_millis(nanos: Time) -> i64 {
    nanos.div_euclid(NANOS_PER_MILLI)
}

/// Time source injected into services so tests can pin "today".
pub type Clock = fn() -> Time;

/// Current wall-clock time in nanoseconds.
pub fn now_nanos() -> Time {
    let now = Utc::now();
    now.timestamp_nanos_opt()
        .unwrap_or_else(|| millis_to_nanos(now.timestamp_millis()))
}

/// UTC day index of a timestamp (days since the epoch).
pub fn day_number(nanos: Time) -> i64 {
    nanos.div_euclid(NANOS_PER_DAY)
}

pub fn same_day(left: Time, right: Time) -> bool {
    day_number(left) == day_number(right)
}

/// Midnight UTC of `date`, in nanoseconds.
pub fn date_to_nanos(date: NaiveDate) -> Time {
    let midnight = date.and_time(NaiveTime::MIN).and_utc();
    millis_to_nanos(midnight.timestamp_millis())
}

pub fn nanos_to_date(nanos: Time) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(nanos_to_millis(nanos)).map(|dt| dt.date_naive())
}

/// Parses an import date cell: `YYYY-MM-DD`, or `DD/MM/YYYY` as written by exports.
pub fn parse_import_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    IMPORT_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

/// `DD/MM/YYYY`, empty for missing timestamps.
pub fn format_export_date(nanos: Option<Time>) -> String {
    nanos
        .and_then(nanos_to_date)
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

/// `Mar 31, 2026`, or the placeholder for missing timestamps.
pub fn format_display_date(nanos: Option<Time>) -> String {
    nanos
        .and_then(nanos_to_date)
        .map(|date| date.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// `YYYY-MM-DD` stamp used in export file names.
pub fn file_date_stamp(nanos: Time) -> String {
    nanos_to_date(nanos)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_round_trip_through_nanos() {
        for millis in [0_i64, 1, 1_767_225_600_000, -86_400_000] {
            assert_eq!(nanos_to_millis(millis_to_nanos(millis)), millis);
        }
    }

    #[test]
    fn date_maps_to_utc_midnight() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
        assert_eq!(date_to_nanos(date), 1_774_915_200_000 * NANOS_PER_MILLI);
        assert_eq!(nanos_to_date(date_to_nanos(date)), Some(date));
    }

    #[test]
    fn parse_import_date_accepts_iso_and_export_format() {
        let expected = NaiveDate::from_ymd_opt(2026, 1, 15);
        assert_eq!(parse_import_date(" 2026-01-15 "), expected);
        assert_eq!(parse_import_date("15/01/2026"), expected);
        assert_eq!(parse_import_date("2026-13-40"), None);
        assert_eq!(parse_import_date("soon"), None);
    }

    #[test]
    fn formats_use_placeholders_for_missing_values() {
        let nanos = date_to_nanos(NaiveDate::from_ymd_opt(2026, 3, 31).unwrap());
        assert_eq!(format_export_date(Some(nanos)), "31/03/2026");
        assert_eq!(format_export_date(None), "");
        assert_eq!(format_display_date(Some(nanos)), "Mar 31, 2026");
        assert_eq!(format_display_date(None), PLACEHOLDER);
        assert_eq!(file_date_stamp(nanos), "2026-03-31");
    }

    #[test]
    fn day_number_floors_toward_negative_infinity() {
        assert_eq!(day_number(NANOS_PER_DAY - 1), 0);
        assert_eq!(day_number(NANOS_PER_DAY), 1);
        assert_eq!(day_number(-1), -1);
        assert!(same_day(NANOS_PER_DAY, NANOS_PER_DAY * 2 - 1));
    }
}
