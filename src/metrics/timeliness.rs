//! Timeliness: age of records relative to an evaluation instant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{dataset::Dataset, datetime};

const NANOS_PER_SEC: i128 = 1_000_000_000;
const NANOS_PER_DAY: i128 = 86_400 * NANOS_PER_SEC;

/// Record ages for one date column, in whole days (floored).
///
/// Negative ages mean the timestamp lies after the evaluation instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinessReport {
    /// Column the ages were derived from
    pub date_column: String,
    /// Mean age, floored after averaging
    pub average_age_days: i64,
    /// Largest age
    pub oldest_record_days: i64,
    /// Smallest age
    pub newest_record_days: i64,
    /// Values that parsed as timestamps
    pub dated_records: usize,
    /// Non-null values that did not parse
    pub unparsable_records: usize,
    /// Null or absent values
    pub missing_records: usize,
}

impl TimelinessReport {
    /// The three age metrics as `(name, days)` pairs.
    pub fn metrics(&self) -> [(&'static str, i64); 3] {
        [
            ("average_age_days", self.average_age_days),
            ("oldest_record_days", self.oldest_record_days),
            ("newest_record_days", self.newest_record_days),
        ]
    }
}

/// Computes timeliness of `date_column` as seen from `now`.
///
/// Returns `None` when the column is not part of the dataset or none of its
/// values parse.
pub fn timeliness(
    dataset: &Dataset,
    date_column: &str,
    now: DateTime<Utc>,
) -> Option<TimelinessReport> {
    if !dataset.has_column(date_column) {
        tracing::warn!(column = date_column, "date column not found in dataset");
        return None;
    }

    let mut ages: Vec<i128> = Vec::with_capacity(dataset.len());
    let mut unparsable = 0usize;
    let mut missing = 0usize;

    for value in dataset.values(date_column) {
        let Some(value) = value else {
            missing += 1;
            continue;
        };
        match datetime::parse_value(value) {
            Ok(ts) => ages.push(age_nanos(now, ts)),
            Err(e) => {
                unparsable += 1;
                tracing::debug!(column = date_column, error = %e, "skipping value");
            }
        }
    }

    if unparsable > 0 {
        tracing::warn!(
            column = date_column,
            unparsable,
            "excluded unparsable dates from timeliness"
        );
    }

    let (Some(&oldest), Some(&newest)) = (ages.iter().max(), ages.iter().min()) else {
        tracing::warn!(column = date_column, "no parsable dates, timeliness unavailable");
        return None;
    };

    let sum: i128 = ages.iter().sum();
    let count = i128::try_from(ages.len()).unwrap_or(i128::MAX);
    let mean = sum.div_euclid(count);

    Some(TimelinessReport {
        date_column: date_column.to_string(),
        average_age_days: whole_days(mean),
        oldest_record_days: whole_days(oldest),
        newest_record_days: whole_days(newest),
        dated_records: ages.len(),
        unparsable_records: unparsable,
        missing_records: missing,
    })
}

/// Exact age in nanoseconds; positive when `ts` precedes `now`.
fn age_nanos(now: DateTime<Utc>, ts: DateTime<Utc>) -> i128 {
    let secs = i128::from(now.timestamp()) - i128::from(ts.timestamp());
    let nanos = i128::from(now.timestamp_subsec_nanos()) - i128::from(ts.timestamp_subsec_nanos());
    secs * NANOS_PER_SEC + nanos
}

fn whole_days(nanos: i128) -> i64 {
    // chrono timestamps span far fewer than i64::MAX days.
    i64::try_from(nanos.div_euclid(NANOS_PER_DAY)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Duration, TimeZone};

    #[test]
    fn test_whole_days_floors() {
        assert_eq!(whole_days(0), 0);
        assert_eq!(whole_days(NANOS_PER_DAY - 1), 0);
        assert_eq!(whole_days(NANOS_PER_DAY), 1);
        assert_eq!(whole_days(-1), -1);
        assert_eq!(whole_days(-NANOS_PER_DAY), -1);
        assert_eq!(whole_days(-NANOS_PER_DAY - 1), -2);
    }

    #[test]
    fn test_age_nanos_keeps_sub_millisecond_sign() {
        let now = Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap();

        assert_eq!(age_nanos(now, now + Duration::nanoseconds(1)), -1);
        assert_eq!(age_nanos(now, now - Duration::microseconds(500)), 500_000);
        assert_eq!(age_nanos(now, now - Duration::days(2)), 2 * NANOS_PER_DAY);
    }
}
