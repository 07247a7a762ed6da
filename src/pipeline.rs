//! Load, measure, persist.
//!
//! The pipeline is fail-fast: if the source cannot produce a dataset no
//! metrics are computed and no report is written.

use std::{fmt, path::Path};

use crate::{
    error::Result,
    metrics::{ranked_completeness, MetricsEngine, QualityReport, HIGH_CARDINALITY_THRESHOLD},
    source::DataSource,
};

/// Number of completeness scores shown in the summary.
pub const SUMMARY_TOP_COLUMNS: usize = 5;

/// Loads a dataset from `source`, computes the report and optionally saves it.
///
/// # Errors
///
/// Returns the source error unchanged if loading fails, or an I/O error if
/// the report cannot be written.
pub fn run(
    source: &dyn DataSource,
    engine: &MetricsEngine,
    output: Option<&Path>,
) -> Result<QualityReport> {
    tracing::info!(source = %source.describe(), "loading dataset");
    let dataset = source.load()?;
    tracing::info!(records = dataset.len(), "initialized dashboard");

    let report = engine.generate_report(&dataset);

    if let Some(path) = output {
        report.save(path)?;
    }

    Ok(report)
}

/// Console summary of a report.
#[derive(Debug, Clone, Copy)]
pub struct Summary<'a>(pub &'a QualityReport);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        writeln!(f, "=== Data Quality Dashboard Summary ===")?;
        writeln!(f, "Dataset Size: {} records", report.dataset_size)?;

        writeln!(f, "\nCompleteness Scores (Top {SUMMARY_TOP_COLUMNS}):")?;
        for (column, score) in ranked_completeness(&report.metrics.completeness)
            .into_iter()
            .take(SUMMARY_TOP_COLUMNS)
        {
            writeln!(f, "{column}: {score:.2}%")?;
        }

        writeln!(f, "\nTimeliness Metrics:")?;
        match &report.metrics.timeliness {
            Some(timeliness) => {
                for (name, days) in timeliness.metrics() {
                    writeln!(f, "{name}: {days}")?;
                }
                if timeliness.unparsable_records > 0 {
                    writeln!(
                        f,
                        "warning: {} unparsable value(s) in '{}' were excluded",
                        timeliness.unparsable_records, timeliness.date_column
                    )?;
                }
            }
            None => writeln!(f, "unavailable")?,
        }

        writeln!(f, "\nConsistency Issues:")?;
        let flagged = report.high_cardinality_columns(HIGH_CARDINALITY_THRESHOLD);
        if flagged.is_empty() {
            writeln!(f, "None detected")?;
        }
        for (column, ratio) in flagged {
            writeln!(f, "High cardinality in {column}: {ratio:.2}% unique values")?;
        }

        Ok(())
    }
}

/// Renders the console summary for a report.
pub fn render_summary(report: &QualityReport) -> String {
    Summary(report).to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::{
        dataset::Dataset,
        error::Error,
        source::{LocalSource, MemorySource},
    };

    fn requests() -> Dataset {
        Dataset::from_json_str(
            r#"[
                {"unique_key": "1", "status": "Open", "created_date": "2024-01-01"},
                {"unique_key": "2", "status": "Closed", "created_date": "2024-01-02"},
                {"unique_key": "3", "status": "Open", "created_date": null}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_run_without_output() {
        let source = MemorySource::new(requests());
        let report = run(&source, &MetricsEngine::new(), None).unwrap();
        assert_eq!(report.dataset_size, 3);
    }

    #[test]
    fn test_run_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        let source = MemorySource::new(requests());
        let report = run(&source, &MetricsEngine::new(), Some(&path)).unwrap();

        let saved = QualityReport::load(&path).unwrap();
        assert_eq!(saved.dataset_size, report.dataset_size);
    }

    #[test]
    fn test_run_fails_fast_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        let source = LocalSource::new(dir.path().join("missing.csv"));
        let err = run(&source, &MetricsEngine::new(), Some(&path)).unwrap_err();

        assert!(matches!(err, Error::Io { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_render_summary() {
        let now = Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap();
        let report = MetricsEngine::new().generate_report_at(&requests(), now);
        let summary = render_summary(&report);

        assert!(summary.contains("Dataset Size: 3 records"));
        assert!(summary.contains("status: 100.00%"));
        assert!(summary.contains("created_date: 66.67%"));
        assert!(summary.contains("average_age_days: 9"));
        assert!(summary.contains("oldest_record_days: 10"));
        assert!(summary.contains("newest_record_days: 9"));
        assert!(summary.contains("High cardinality in unique_key: 100.00% unique values"));
        assert!(!summary.contains("High cardinality in status"));
    }

    #[test]
    fn test_summary_display_matches_render() {
        let report = MetricsEngine::new().generate_report(&requests());
        let summary = render_summary(&report);

        assert_eq!(format!("{}", Summary(&report)), summary);
        assert!(summary.starts_with("=== Data Quality Dashboard Summary ===\n"));
        assert!(summary.ends_with("% unique values\n"));
    }

    #[test]
    fn test_render_summary_top_five_only() {
        let dataset = Dataset::from_json_str(
            r#"[{"a":1,"b":1,"c":1,"d":1,"e":1,"f":null}]"#,
        )
        .unwrap();
        let report = MetricsEngine::new().generate_report(&dataset);
        let summary = render_summary(&report);

        assert!(summary.contains("e: 100.00%"));
        assert!(!summary.contains("f: 0.00%"));
        assert!(summary.contains("unavailable"));
        assert!(summary.contains("None detected"));
    }
}
