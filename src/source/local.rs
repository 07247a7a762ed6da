//! Local file data source.

use std::path::{Path, PathBuf};

use super::DataSource;
use crate::{
    dataset::{CsvOptions, Dataset},
    error::{Error, Result},
};

/// Loads a dataset from a local file, choosing the parser by extension.
///
/// `.csv`, `.tsv` and `.txt` are read as delimited text with a header row;
/// `.json` and `.jsonl` as JSON records.
///
/// # Example
///
/// ```no_run
/// use dqdash::source::{DataSource, LocalSource};
///
/// let dataset = LocalSource::new("requests.csv").load().unwrap();
/// println!("{} records", dataset.len());
/// ```
#[derive(Debug, Clone)]
pub struct LocalSource {
    path: PathBuf,
}

impl LocalSource {
    /// Creates a source for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for LocalSource {
    fn load(&self) -> Result<Dataset> {
        let ext = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let dataset = match ext.as_str() {
            "csv" | "txt" => Dataset::from_csv(&self.path)?,
            "tsv" => {
                let options = CsvOptions::new().with_delimiter(b'\t');
                Dataset::from_csv_with_options(&self.path, options)?
            }
            "json" | "jsonl" => Dataset::from_json(&self.path)?,
            other => return Err(Error::unsupported_format(other)),
        };

        tracing::info!(
            path = %self.path.display(),
            records = dataset.len(),
            columns = dataset.columns().len(),
            "loaded local dataset"
        );
        Ok(dataset)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requests.csv");
        std::fs::write(&path, "status,created_date\nOpen,2024-01-01\nClosed,\n").unwrap();

        let dataset = LocalSource::new(&path).load().unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.columns(), &["status", "created_date"]);
    }

    #[test]
    fn test_load_tsv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requests.TSV");
        std::fs::write(&path, "a\tb\n1\tx\n").unwrap();

        let dataset = LocalSource::new(&path).load().unwrap();
        assert_eq!(dataset.columns(), &["a", "b"]);
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requests.json");
        std::fs::write(&path, r#"[{"status":"Open"},{"agency":"NYPD"}]"#).unwrap();

        let dataset = LocalSource::new(&path).load().unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.columns(), &["status", "agency"]);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = LocalSource::new("data.xlsx").load().unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = LocalSource::new("/nonexistent/data.csv").load().unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_describe() {
        assert_eq!(LocalSource::new("a.csv").describe(), "file a.csv");
    }
}
