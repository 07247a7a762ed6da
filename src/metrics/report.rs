//! The quality report and its JSON form.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CompletenessReport, ConsistencyReport, TimelinessReport};
use crate::error::{Error, Result};

/// Metrics computed for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Per-column completeness percentages
    pub completeness: CompletenessReport,
    /// Record ages, `None` when unavailable
    pub timeliness: Option<TimelinessReport>,
    /// Per-column consistency statistics
    pub consistency: ConsistencyReport,
}

/// A generated data quality report.
///
/// Serializes to the report file layout:
///
/// ```json
/// {
///   "report_generated": "2024-05-01T12:00:00Z",
///   "dataset_size": 1000,
///   "metrics": { "completeness": {}, "timeliness": null, "consistency": {} }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// When the report was generated
    pub report_generated: DateTime<Utc>,
    /// Number of records analyzed
    pub dataset_size: usize,
    /// The computed metrics
    pub metrics: Metrics,
}

impl QualityReport {
    /// Columns whose unique ratio exceeds `threshold` percent.
    pub fn high_cardinality_columns(&self, threshold: f64) -> Vec<(&str, f64)> {
        self.metrics
            .consistency
            .iter()
            .filter(|(_, c)| c.is_high_cardinality(threshold))
            .map(|(name, c)| (name.as_str(), c.unique_ratio))
            .collect()
    }

    /// Renders the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a report previously written by [`QualityReport::save`].
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid report.
    pub fn from_json_str(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Writes the report as UTF-8 JSON to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json_pretty()?;
        std::fs::write(path, json).map_err(|e| Error::io(e, path))?;
        tracing::info!(path = %path.display(), "report saved");
        Ok(())
    }

    /// Reads a report from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(e, path))?;
        Self::from_json_str(&text)
    }
}
