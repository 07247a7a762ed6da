//! Data quality metrics for tabular datasets
//!
//! Three fixed metric families are computed over a [`Dataset`]:
//!
//! - **Completeness**: percentage of records with a non-null value, per column
//! - **Timeliness**: age of records in whole days, from one date column
//! - **Consistency**: cardinality and most frequent values of categorical
//!   columns
//!
//! Every call is pure. Nothing is cached between calls and the dataset is
//! never modified, so a [`MetricsEngine`] can be shared across threads.
//!
//! # Example
//!
//! ```
//! use dqdash::{Dataset, MetricsEngine};
//!
//! let dataset = Dataset::from_json_str(
//!     r#"[{"status": "Open", "created_date": "2024-01-01"},
//!         {"status": "Closed", "created_date": null}]"#,
//! ).unwrap();
//!
//! let report = MetricsEngine::new().generate_report(&dataset);
//! assert_eq!(report.dataset_size, 2);
//! assert_eq!(report.metrics.completeness["created_date"], 50.0);
//! ```

// Percentages are computed from counts
#![allow(clippy::cast_precision_loss)]

mod completeness;
mod consistency;
mod report;
mod timeliness;


use chrono::{DateTime, Utc};

pub use completeness::{ranked as ranked_completeness, CompletenessReport};
pub use consistency::{
    ColumnConsistency, ConsistencyReport, ValueCount, HIGH_CARDINALITY_THRESHOLD,
    MOST_COMMON_LIMIT,
};
pub use report::{Metrics, QualityReport};
pub use timeliness::TimelinessReport;

use crate::{dataset::Dataset, schema::Schema};

/// Date column used for timeliness unless configured otherwise.
pub const DEFAULT_DATE_COLUMN: &str = "created_date";

/// `part / total * 100`, or 0 when `total` is 0.
pub(crate) fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// Computes data quality metrics.
#[derive(Debug, Clone)]
pub struct MetricsEngine {
    date_column: String,
}

impl Default for MetricsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsEngine {
    /// Create an engine using [`DEFAULT_DATE_COLUMN`].
    pub fn new() -> Self {
        Self {
            date_column: DEFAULT_DATE_COLUMN.to_string(),
        }
    }

    /// Set the default date column for timeliness
    #[must_use]
    pub fn date_column(mut self, column: impl Into<String>) -> Self {
        self.date_column = column.into();
        self
    }

    /// The configured default date column.
    pub fn default_date_column(&self) -> &str {
        &self.date_column
    }

    /// Completeness per column; `None` means every dataset column.
    pub fn completeness(&self, dataset: &Dataset, columns: Option<&[&str]>) -> CompletenessReport {
        match columns {
            Some(columns) => completeness::completeness(dataset, columns),
            None => completeness::completeness(dataset, dataset.columns()),
        }
    }

    /// Timeliness of `date_column` (or the configured default) as of now.
    pub fn timeliness(
        &self,
        dataset: &Dataset,
        date_column: Option<&str>,
    ) -> Option<TimelinessReport> {
        self.timeliness_at(dataset, date_column, Utc::now())
    }

    /// Timeliness as seen from `now`.
    pub fn timeliness_at(
        &self,
        dataset: &Dataset,
        date_column: Option<&str>,
        now: DateTime<Utc>,
    ) -> Option<TimelinessReport> {
        let column = date_column.unwrap_or(&self.date_column);
        timeliness::timeliness(dataset, column, now)
    }

    /// Consistency per categorical column; `None` detects them.
    pub fn consistency(&self, dataset: &Dataset, columns: Option<&[&str]>) -> ConsistencyReport {
        match columns {
            Some(columns) => consistency::consistency(dataset, columns),
            None => self.consistency_with_schema(dataset, &Schema::detect(dataset)),
        }
    }

    /// Consistency for the categorical columns of an already detected schema.
    pub fn consistency_with_schema(&self, dataset: &Dataset, schema: &Schema) -> ConsistencyReport {
        consistency::consistency(dataset, &schema.categorical_columns())
    }

    /// Runs every metric with defaults and packages the result.
    pub fn generate_report(&self, dataset: &Dataset) -> QualityReport {
        self.generate_report_at(dataset, Utc::now())
    }

    /// Like [`MetricsEngine::generate_report`] with a fixed evaluation time.
    pub fn generate_report_at(&self, dataset: &Dataset, now: DateTime<Utc>) -> QualityReport {
        tracing::info!(records = dataset.len(), "computing quality metrics");

        let schema = Schema::detect(dataset);
        tracing::debug!(columns = schema.len(), "detected column kinds");

        let metrics = Metrics {
            completeness: self.completeness(dataset, None),
            timeliness: self.timeliness_at(dataset, None, now),
            consistency: self.consistency_with_schema(dataset, &schema),
        };

        QualityReport {
            report_generated: now,
            dataset_size: dataset.len(),
            metrics,
        }
    }
}
