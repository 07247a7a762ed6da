//! In-memory data source.

use super::DataSource;
use crate::{dataset::Dataset, error::Result};

/// A source that hands out a copy of a dataset it already holds.
///
/// Useful for tests and for callers that build records themselves.
///
/// # Example
///
/// ```
/// use dqdash::{source::{DataSource, MemorySource}, Dataset};
///
/// let source = MemorySource::new(Dataset::from_json_str(r#"[{"a": 1}]"#).unwrap());
/// assert_eq!(source.load().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    dataset: Dataset,
}

impl MemorySource {
    /// Wraps `dataset`.
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

impl DataSource for MemorySource {
    fn load(&self) -> Result<Dataset> {
        Ok(self.dataset.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory dataset ({} records)", self.dataset.len())
    }
}
