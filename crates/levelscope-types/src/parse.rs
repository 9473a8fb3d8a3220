//! Total parsing functions for telemetry cells.
//!
//! Nothing here returns an error: a cell that cannot be read as the expected
//! type becomes `None` and the row is kept.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Recognized timestamp column names, in lookup priority order.
pub const TIMESTAMP_COLUMNS: [&str; 4] = ["timestamp", "Timestamp", "submitted_at", "submission_time"];

/// Format used when writing timestamps back out.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse a numeric cell leniently.
///
/// Surrounding whitespace is ignored. Empty cells, malformed numbers and
/// non-finite values (`inf`, `NaN`) all map to `None`.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a timestamp cell leniently.
///
/// Accepts RFC 3339 (normalized to UTC), ISO-like `date time` forms, the
/// `M/D/YYYY H:MM:SS` form spreadsheet exports use, and bare dates.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
