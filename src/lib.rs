//! dqdash - Data Quality Metrics for Tabular Data
//!
//! Computes descriptive data quality metrics over a tabular dataset loaded
//! from disk or fetched from a JSON API, and emits a JSON report.
//!
//! # Metrics
//!
//! 1. **Completeness** - percentage of records with a value, per column
//! 2. **Timeliness** - record age in whole days, from one date column
//! 3. **Consistency** - cardinality and most frequent values of categorical
//!    columns
//!
//! # Quick Start
//!
//! ```no_run
//! use dqdash::{source::{DataSource, LocalSource}, MetricsEngine};
//!
//! let dataset = LocalSource::new("requests.csv").load().unwrap();
//! let report = MetricsEngine::new().generate_report(&dataset);
//! report.save("data_quality_report.json").unwrap();
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::similar_names
    )
)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

/// CLI module for command-line interface
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dataset;
pub mod datetime;
pub mod error;
#[cfg(feature = "cli")]
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod schema;
pub mod source;

pub use config::{DashboardConfig, SourceConfig};
pub use dataset::{CsvOptions, Dataset, Record};
pub use error::{Error, Result};
pub use metrics::{
    ColumnConsistency, CompletenessReport, ConsistencyReport, Metrics, MetricsEngine,
    QualityReport, TimelinessReport, ValueCount,
};
pub use schema::{ColumnKind, Schema};
pub use source::DataSource;
