//! Consistency: cardinality and most frequent values of categorical columns.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::percentage;
use crate::dataset::Dataset;

/// Unique ratio above which a column is flagged as high cardinality.
pub const HIGH_CARDINALITY_THRESHOLD: f64 = 80.0;

/// Number of entries kept in [`ColumnConsistency::most_common`].
pub const MOST_COMMON_LIMIT: usize = 3;

/// Column name to consistency statistics.
pub type ConsistencyReport = BTreeMap<String, ColumnConsistency>;

/// Consistency statistics for a single column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnConsistency {
    /// Distinct non-null values
    pub unique_values: usize,
    /// Distinct values over total record count (0-100)
    pub unique_ratio: f64,
    /// Most frequent values, descending by count
    pub most_common: Vec<ValueCount>,
}

impl ColumnConsistency {
    /// Check if the unique ratio exceeds `threshold` percent
    pub fn is_high_cardinality(&self, threshold: f64) -> bool {
        self.unique_ratio > threshold
    }
}

/// A value and how often it occurs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    /// Rendered value
    pub value: String,
    /// Occurrences
    pub count: usize,
}

impl ValueCount {
    /// Create a new value count
    pub fn new(value: impl Into<String>, count: usize) -> Self {
        Self {
            value: value.into(),
            count,
        }
    }
}

/// Computes consistency for each of `columns` present in the dataset.
///
/// Columns the dataset does not have are skipped.
pub fn consistency<S: AsRef<str>>(dataset: &Dataset, columns: &[S]) -> ConsistencyReport {
    let mut report = ConsistencyReport::new();

    for column in columns {
        let column = column.as_ref();
        if !dataset.has_column(column) {
            tracing::debug!(column, "categorical column not found, skipping");
            continue;
        }
        report.insert(column.to_string(), analyze_column(dataset, column));
    }

    report
}

fn analyze_column(dataset: &Dataset, column: &str) -> ColumnConsistency {
    // Insertion order doubles as first-encountered order for tie breaking.
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for value in dataset.values(column).flatten() {
        let key = render(value);
        if let Some(&i) = index.get(&key) {
            counts[i].1 += 1;
        } else {
            index.insert(key.clone(), counts.len());
            counts.push((key, 1));
        }
    }

    let unique_values = counts.len();
    // Stable sort keeps first-encountered order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    ColumnConsistency {
        unique_values,
        unique_ratio: percentage(unique_values, dataset.len()),
        most_common: counts
            .into_iter()
            .take(MOST_COMMON_LIMIT)
            .map(|(value, count)| ValueCount { value, count })
            .collect(),
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
