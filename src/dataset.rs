//! Dataset types for dqdash.
//!
//! A [`Dataset`] is an ordered sequence of [`Record`]s, each a flat mapping
//! from column name to JSON value. Records do not have to share keys; the
//! dataset's columns are the union of keys in first-encountered order.

use std::{
    collections::HashSet,
    io::{BufReader, Cursor, Read, Seek, SeekFrom},
    path::Path,
    sync::Arc,
};

use arrow::{
    array::{
        Array, BooleanArray, Float32Array, Float64Array, Int16Array, Int32Array, Int64Array,
        Int8Array, LargeStringArray, RecordBatch, StringArray, UInt16Array, UInt32Array,
        UInt64Array, UInt8Array,
    },
    util::display::array_value_to_string,
};
use serde_json::{Map, Number, Value};

use crate::error::{Error, Result};

/// A single row: column name to value.
pub type Record = Map<String, Value>;

/// An in-memory tabular dataset.
///
/// # Example
///
/// ```
/// use dqdash::Dataset;
///
/// let dataset = Dataset::from_json_str(r#"[{"status": "Open"}, {"status": null}]"#).unwrap();
/// assert_eq!(dataset.len(), 2);
/// assert_eq!(dataset.columns(), &["status".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    /// Creates a dataset from records, deriving columns from their keys.
    pub fn new(records: Vec<Record>) -> Self {
        Self::with_columns(Vec::new(), records)
    }

    /// Creates a dataset with a known header.
    ///
    /// Keys found in records but missing from `columns` are appended in
    /// first-encountered order.
    pub fn with_columns(columns: Vec<String>, records: Vec<Record>) -> Self {
        let mut seen: HashSet<String> = HashSet::with_capacity(columns.len());
        let mut ordered = Vec::with_capacity(columns.len());
        for name in columns {
            if seen.insert(name.clone()) {
                ordered.push(name);
            }
        }
        for record in &records {
            for key in record.keys() {
                if !seen.contains(key) {
                    seen.insert(key.clone());
                    ordered.push(key.clone());
                }
            }
        }

        Self {
            columns: ordered,
            records,
        }
    }

    /// Parses JSON text: either an array of objects or one object per line.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON or an element is not
    /// an object.
    pub fn from_json_str(data: &str) -> Result<Self> {
        let trimmed = data.trim_start();
        let values: Vec<Value> = if trimmed.starts_with('[') {
            serde_json::from_str(trimmed)?
        } else {
            trimmed
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(serde_json::from_str::<Value>)
                .collect::<std::result::Result<Vec<_>, _>>()?
        };

        Self::from_values(values)
    }

    /// Parses JSON bytes, see [`Dataset::from_json_str`].
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not UTF-8 JSON records.
    pub fn from_json_slice(data: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::parse(format!("response is not valid UTF-8: {e}")))?;
        Self::from_json_str(text)
    }

    /// Loads a JSON or JSON-lines file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(e, path))?;
        Self::from_json_str(&text)
    }

    fn from_values(values: Vec<Value>) -> Result<Self> {
        let records = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| match value {
                Value::Object(map) => Ok(map),
                other => Err(Error::parse(format!(
                    "record {i} is not a JSON object: {other}"
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(records))
    }

    /// Loads a delimited text file with a header row.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not valid CSV.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_csv_with_options(path, CsvOptions::default())
    }

    /// Loads a delimited text file with options.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not valid CSV.
    pub fn from_csv_with_options(path: impl AsRef<Path>, options: CsvOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::io(e, path))?;
        read_csv(BufReader::new(file), &options)
    }

    /// Parses delimited text held in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid CSV.
    pub fn from_csv_str(data: &str) -> Result<Self> {
        read_csv(Cursor::new(data.as_bytes()), &CsvOptions::default())
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Column names in first-encountered order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns true if any record (or the header) carries `name`.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// All records.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the record at `index`.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Iterates over records.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Iterates over one column, yielding `None` for absent or null values.
    pub fn values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = Option<&'a Value>> + 'a {
        self.records
            .iter()
            .map(move |record| record.get(column).filter(|v| !v.is_null()))
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

/// Options for delimited text parsing.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Delimiter character (default is comma).
    pub delimiter: Option<u8>,
    /// Batch size for reading.
    pub batch_size: usize,
    /// Maximum number of rows sampled for type inference.
    pub infer_rows: usize,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            batch_size: 8192,
            infer_rows: 1000,
        }
    }
}

impl CsvOptions {
    /// Creates new CSV options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the delimiter character.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Sets the batch size for reading.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }
}

fn read_csv<R: Read + Seek>(mut reader: R, options: &CsvOptions) -> Result<Dataset> {
    use arrow_csv::{reader::Format, ReaderBuilder};

    let mut format = Format::default().with_header(true);
    if let Some(delim) = options.delimiter {
        format = format.with_delimiter(delim);
    }
    let (inferred, _) = format.infer_schema(&mut reader, Some(options.infer_rows))?;
    reader
        .seek(SeekFrom::Start(0))
        .map_err(Error::io_no_path)?;

    let schema = Arc::new(inferred);
    let columns: Vec<String> = schema.fields().iter().map(|f| f.name().clone()).collect();

    let mut builder = ReaderBuilder::new(schema)
        .with_batch_size(options.batch_size)
        .with_header(true);
    if let Some(delim) = options.delimiter {
        builder = builder.with_delimiter(delim);
    }

    let mut records = Vec::new();
    for batch in builder.build(reader)? {
        records.extend(batch_to_records(&batch?, &columns)?);
    }

    Ok(Dataset::with_columns(columns, records))
}

/// Converts a batch into records, omitting null cells.
fn batch_to_records(batch: &RecordBatch, columns: &[String]) -> Result<Vec<Record>> {
    let mut records = vec![Record::new(); batch.num_rows()];

    for (col_idx, name) in columns.iter().enumerate() {
        let array = batch.column(col_idx);
        for (row, record) in records.iter_mut().enumerate() {
            if array.is_null(row) {
                continue;
            }
            let value = cell_value(array.as_ref(), row)?;
            if !value.is_null() {
                record.insert(name.clone(), value);
            }
        }
    }

    Ok(records)
}

fn cell_value(array: &dyn Array, idx: usize) -> Result<Value> {
    let any = array.as_any();
    let value = if let Some(a) = any.downcast_ref::<StringArray>() {
        Value::String(a.value(idx).to_string())
    } else if let Some(a) = any.downcast_ref::<LargeStringArray>() {
        Value::String(a.value(idx).to_string())
    } else if let Some(a) = any.downcast_ref::<BooleanArray>() {
        Value::Bool(a.value(idx))
    } else if let Some(a) = any.downcast_ref::<Int64Array>() {
        Value::from(a.value(idx))
    } else if let Some(a) = any.downcast_ref::<Int32Array>() {
        Value::from(a.value(idx))
    } else if let Some(a) = any.downcast_ref::<Int16Array>() {
        Value::from(a.value(idx))
    } else if let Some(a) = any.downcast_ref::<Int8Array>() {
        Value::from(a.value(idx))
    } else if let Some(a) = any.downcast_ref::<UInt64Array>() {
        Value::from(a.value(idx))
    } else if let Some(a) = any.downcast_ref::<UInt32Array>() {
        Value::from(a.value(idx))
    } else if let Some(a) = any.downcast_ref::<UInt16Array>() {
        Value::from(a.value(idx))
    } else if let Some(a) = any.downcast_ref::<UInt8Array>() {
        Value::from(a.value(idx))
    } else if let Some(a) = any.downcast_ref::<Float64Array>() {
        float_value(a.value(idx))
    } else if let Some(a) = any.downcast_ref::<Float32Array>() {
        float_value(f64::from(a.value(idx)))
    } else {
        // Dates and timestamps keep their textual form for the date parser.
        Value::String(array_value_to_string(array, idx)?)
    };

    Ok(value)
}

fn float_value(v: f64) -> Value {
    Number::from_f64(v).map_or(Value::Null, Value::Number)
}
