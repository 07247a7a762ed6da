//! Pipeline configuration.
//!
//! Every field has a default, so running with no configuration fetches the
//! NYC 311 Service Requests sample and writes the report next to the
//! working directory.

use std::path::PathBuf;

#[cfg(feature = "http")]
use crate::source::HttpSource;
use crate::{
    error::{Error, Result},
    metrics::{MetricsEngine, DEFAULT_DATE_COLUMN},
    source::{DataSource, LocalSource},
};

/// NYC 311 Service Requests endpoint.
pub const DEFAULT_URL: &str = "https://data.cityofnewyork.us/resource/erm2-nwe9.json";
/// Number of records requested from the endpoint.
pub const DEFAULT_LIMIT: usize = 1000;
/// Sort order sent to the endpoint, newest first.
pub const DEFAULT_ORDER: &str = "created_date DESC";
/// HTTP request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Where the JSON report is written.
pub const DEFAULT_REPORT_PATH: &str = "data_quality_report.json";
/// Where log lines are appended.
pub const DEFAULT_LOG_FILE: &str = "data_quality.log";

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    /// A JSON HTTP endpoint.
    Http {
        /// Endpoint URL
        url: String,
        /// Maximum records requested
        limit: usize,
        /// Sort expression
        order: Option<String>,
        /// Request timeout in seconds
        timeout_secs: u64,
    },
    /// A local CSV/TSV/JSON file.
    File {
        /// Path to the file
        path: PathBuf,
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::Http {
            url: DEFAULT_URL.to_string(),
            limit: DEFAULT_LIMIT,
            order: Some(DEFAULT_ORDER.to_string()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Configuration of a full dashboard run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Dataset source
    pub source: SourceConfig,
    /// Column used for timeliness
    pub date_column: String,
    /// Report output path; `None` skips writing
    pub output: Option<PathBuf>,
    /// Log file; `None` logs to stderr only
    pub log_file: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            date_column: DEFAULT_DATE_COLUMN.to_string(),
            output: Some(PathBuf::from(DEFAULT_REPORT_PATH)),
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}

impl DashboardConfig {
    /// Checks values that would otherwise fail deep inside the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] describing the first bad value.
    pub fn validate(&self) -> Result<()> {
        if self.date_column.trim().is_empty() {
            return Err(Error::invalid_config("date column must not be empty"));
        }

        match &self.source {
            SourceConfig::Http {
                url,
                limit,
                timeout_secs,
                ..
            } => {
                if url.trim().is_empty() {
                    return Err(Error::invalid_config("url must not be empty"));
                }
                if *limit == 0 {
                    return Err(Error::invalid_config("limit must be positive"));
                }
                if *timeout_secs == 0 {
                    return Err(Error::invalid_config("timeout must be positive"));
                }
            }
            SourceConfig::File { path } => {
                if path.as_os_str().is_empty() {
                    return Err(Error::invalid_config("input path must not be empty"));
                }
            }
        }

        Ok(())
    }

    /// Builds the configured data source.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be constructed.
    pub fn build_source(&self) -> Result<Box<dyn DataSource>> {
        match &self.source {
            SourceConfig::File { path } => Ok(Box::new(LocalSource::new(path.clone()))),
            #[cfg(feature = "http")]
            SourceConfig::Http {
                url,
                limit,
                order,
                timeout_secs,
            } => {
                let source = HttpSource::with_timeout(url.clone(), *timeout_secs)?
                    .limit(*limit)
                    .order(order.clone());
                Ok(Box::new(source))
            }
            #[cfg(not(feature = "http"))]
            SourceConfig::Http { .. } => Err(Error::invalid_config(
                "HTTP sources require the `http` feature",
            )),
        }
    }

    /// Builds the metrics engine.
    pub fn engine(&self) -> MetricsEngine {
        MetricsEngine::new().date_column(self.date_column.clone())
    }
}
