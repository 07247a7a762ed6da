//! Column type detection.
//!
//! A single pass over the dataset tags every column with a [`ColumnKind`].
//! The result is computed once and handed to the metrics that need it.

use std::fmt;

use serde_json::Value;

use crate::{dataset::Dataset, datetime};

/// Detected kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Every non-null value is a number.
    Numeric,
    /// Free text or booleans.
    Categorical,
    /// Every non-null value is a date-like string.
    Date,
    /// No non-null values, or nested values.
    Unknown,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => write!(f, "numeric"),
            Self::Categorical => write!(f, "categorical"),
            Self::Date => write!(f, "date"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Column kinds for a dataset, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<(String, ColumnKind)>,
}

impl Schema {
    /// Detects the kind of every column of `dataset`.
    pub fn detect(dataset: &Dataset) -> Self {
        let columns = dataset
            .columns()
            .iter()
            .map(|name| (name.clone(), detect_column(dataset, name)))
            .collect();

        Self { columns }
    }

    /// Kind of `column`, if it is part of the schema.
    pub fn kind(&self, column: &str) -> Option<ColumnKind> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, kind)| *kind)
    }

    /// Iterates over `(name, kind)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ColumnKind)> {
        self.columns.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    /// Names of columns with the given kind.
    pub fn columns_of(&self, kind: ColumnKind) -> Vec<&str> {
        self.iter()
            .filter(|(_, k)| *k == kind)
            .map(|(name, _)| name)
            .collect()
    }

    /// Names of categorical columns.
    pub fn categorical_columns(&self) -> Vec<&str> {
        self.columns_of(ColumnKind::Categorical)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

fn detect_column(dataset: &Dataset, column: &str) -> ColumnKind {
    let mut seen_any = false;
    let mut all_numeric = true;
    let mut all_dates = true;

    for value in dataset.values(column).flatten() {
        seen_any = true;
        match value {
            Value::Array(_) | Value::Object(_) => return ColumnKind::Unknown,
            Value::Number(_) => all_dates = false,
            Value::String(_) => {
                all_numeric = false;
                if all_dates && !datetime::is_date_like(value) {
                    all_dates = false;
                }
            }
            Value::Bool(_) | Value::Null => {
                all_numeric = false;
                all_dates = false;
            }
        }
    }

    if !seen_any {
        ColumnKind::Unknown
    } else if all_numeric {
        ColumnKind::Numeric
    } else if all_dates {
        ColumnKind::Date
    } else {
        ColumnKind::Categorical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(json: &str) -> Dataset {
        Dataset::from_json_str(json).unwrap()
    }

    #[test]
    fn test_detects_each_kind() {
        let ds = dataset(
            r#"[
                {"n": 1, "s": "Open", "d": "2024-01-01", "e": null, "o": {"lat": 1}},
                {"n": 2.5, "s": "Closed", "d": "2024-01-02T10:00:00.000", "o": {"lat": 2}}
            ]"#,
        );
        let schema = Schema::detect(&ds);

        assert_eq!(schema.kind("n"), Some(ColumnKind::Numeric));
        assert_eq!(schema.kind("s"), Some(ColumnKind::Categorical));
        assert_eq!(schema.kind("d"), Some(ColumnKind::Date));
        assert_eq!(schema.kind("e"), Some(ColumnKind::Unknown));
        assert_eq!(schema.kind("o"), Some(ColumnKind::Unknown));
        assert_eq!(schema.kind("missing"), None);
        assert_eq!(schema.len(), 5);
    }

    #[test]
    fn test_numeric_strings_stay_categorical() {
        let ds = dataset(r#"[{"zip": "10001"}, {"zip": "10002"}]"#);
        assert_eq!(Schema::detect(&ds).kind("zip"), Some(ColumnKind::Categorical));
    }

    #[test]
    fn test_mixed_dates_and_text_is_categorical() {
        let ds = dataset(r#"[{"d": "2024-01-01"}, {"d": "unknown"}]"#);
        assert_eq!(Schema::detect(&ds).kind("d"), Some(ColumnKind::Categorical));
    }

    #[test]
    fn test_mixed_numbers_and_text_is_categorical() {
        let ds = dataset(r#"[{"v": 1}, {"v": "one"}]"#);
        assert_eq!(Schema::detect(&ds).kind("v"), Some(ColumnKind::Categorical));
    }

    #[test]
    fn test_booleans_are_categorical() {
        let ds = dataset(r#"[{"flag": true}, {"flag": false}]"#);
        assert_eq!(Schema::detect(&ds).kind("flag"), Some(ColumnKind::Categorical));
    }

    #[test]
    fn test_categorical_columns_keep_order() {
        let ds = dataset(r#"[{"b": "x", "n": 1, "a": "y"}]"#);
        let schema = Schema::detect(&ds);
        assert_eq!(schema.categorical_columns(), vec!["b", "a"]);
        assert_eq!(schema.columns_of(ColumnKind::Numeric), vec!["n"]);
    }

    #[test]
    fn test_empty_dataset() {
        let schema = Schema::detect(&Dataset::default());
        assert!(schema.is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(ColumnKind::Date.to_string(), "date");
        assert_eq!(ColumnKind::Categorical.to_string(), "categorical");
    }
}
