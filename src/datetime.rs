//! Lenient timestamp parsing for date-like column values.
//!
//! Offset-less inputs are read as UTC. Only strings are parsed; numbers and
//! booleans are rejected instead of being coerced into epoch offsets.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::error::{Error, Result};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Parses a string into an absolute UTC timestamp.
///
/// # Errors
///
/// Returns [`Error::DateParse`] if no supported format matches.
///
/// # Example
///
/// ```
/// use dqdash::datetime::parse_timestamp;
///
/// let ts = parse_timestamp("2024-01-02T03:04:05.000").unwrap();
/// assert_eq!(ts.to_rfc3339(), "2024-01-02T03:04:05+00:00");
/// ```
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let s = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            if let Some(naive) = date.and_hms_opt(0, 0, 0) {
                return Ok(naive.and_utc());
            }
        }
    }

    Err(Error::date_parse(raw))
}

/// Parses a JSON value; only strings are eligible.
///
/// # Errors
///
/// Returns [`Error::DateParse`] for non-strings and unparsable strings.
pub fn parse_value(value: &Value) -> Result<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp(s),
        other => Err(Error::date_parse(other.to_string())),
    }
}

/// Returns true if the value parses as a timestamp.
pub fn is_date_like(value: &Value) -> bool {
    parse_value(value).is_ok()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_rfc3339_with_offset() {
        let ts = parse_timestamp("2024-03-01T10:00:00-05:00").unwrap();
        assert_eq!(ts, utc(2024, 3, 1, 15, 0, 0));
    }

    #[test]
    fn test_socrata_floating_timestamp() {
        let ts = parse_timestamp("2024-03-01T10:20:30.000").unwrap();
        assert_eq!(ts, utc(2024, 3, 1, 10, 20, 30));
    }

    #[test]
    fn test_space_separated() {
        let ts = parse_timestamp("2024-03-01 10:20:30").unwrap();
        assert_eq!(ts, utc(2024, 3, 1, 10, 20, 30));
    }

    #[test]
    fn test_us_twelve_hour_clock() {
        let ts = parse_timestamp("03/01/2024 02:15:00 PM").unwrap();
        assert_eq!(ts, utc(2024, 3, 1, 14, 15, 0));
    }

    #[test]
    fn test_date_only() {
        assert_eq!(parse_timestamp("2024-01-01").unwrap(), utc(2024, 1, 1, 0, 0, 0));
        assert_eq!(parse_timestamp("12/31/2023").unwrap(), utc(2023, 12, 31, 0, 0, 0));
        assert_eq!(parse_timestamp(" 2024-01-01 ").unwrap(), utc(2024, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("2024-13-45").is_err());
    }

    #[test]
    fn test_non_strings_are_not_coerced() {
        assert!(parse_value(&json!(1_700_000_000)).is_err());
        assert!(parse_value(&json!(true)).is_err());
        assert!(is_date_like(&json!("2024-01-01")));
        assert!(!is_date_like(&json!("Open")));
    }
}
