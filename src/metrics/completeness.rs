//! Completeness: share of records carrying a non-null value per column.

use std::collections::BTreeMap;

use super::percentage;
use crate::dataset::Dataset;

/// Column name to completeness percentage (0-100).
pub type CompletenessReport = BTreeMap<String, f64>;

/// Computes completeness for `columns`.
///
/// A column no record carries scores 0. An empty dataset scores 0 for every
/// column.
pub fn completeness<S: AsRef<str>>(dataset: &Dataset, columns: &[S]) -> CompletenessReport {
    let total = dataset.len();

    columns
        .iter()
        .map(|column| {
            let column = column.as_ref();
            let present = dataset.values(column).filter(Option::is_some).count();
            (column.to_string(), percentage(present, total))
        })
        .collect()
}

/// Columns sorted by descending completeness, ties in name order.
pub fn ranked(report: &CompletenessReport) -> Vec<(&str, f64)> {
    let mut ranked: Vec<(&str, f64)> = report.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}
