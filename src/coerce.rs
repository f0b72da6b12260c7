//! Tolerant cell parsing for the schemaless sheet backend.
//!
//! The backing store enforces no types: every cell is text, columns can be
//! absent, and operators paste whatever they paste. Parsers here degrade to
//! a safe default instead of failing, so one bad cell never takes down a
//! whole read.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::sheet::{ColumnSpec, Row};

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// Integer cell: malformed text coerces to 0. Thousands separators and a
/// trailing decimal part ("12.0") are tolerated.
pub fn parse_int(raw: &str) -> i64 {
    let cleaned: String = raw.trim().replace(',', "");
    if let Ok(value) = cleaned.parse::<i64>() {
        return value;
    }
    cleaned.parse::<f64>().map(|v| v.trunc() as i64).unwrap_or(0)
}

/// Money cell: malformed text coerces to 0.0. Currency markers and
/// separators are stripped before parsing.
pub fn parse_money(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse::<f64>().unwrap_or(0.0)
}

/// Timestamp cell: malformed text coerces to None, never an error. Naive
/// values are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    None
}

/// Boolean-ish cell ("Yes"/"No" in the sheet): anything but an affirmative
/// reads as false.
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "yes" | "y" | "true" | "1"
    )
}

/// Link cell: the sheet writes "None" for absent assets.
pub fn parse_link(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
        return None;
    }
    Some(raw.to_string())
}

/// Synthesize missing canonical columns with type-appropriate defaults so
/// downstream computation is always well-defined. Runs once per read, at
/// the store-adapter boundary.
pub fn normalize_rows(rows: &mut [Row], columns: &[ColumnSpec]) {
    for row in rows.iter_mut() {
        for column in columns {
            row.entry(column.name.to_string())
                .or_insert_with(|| column.kind.default_cell().to_string());
        }
    }
}
