//! Error types for dqdash.

use std::path::PathBuf;

/// Result type alias for dqdash operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in dqdash operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        /// The path where the error occurred, if known.
        path: Option<PathBuf>,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Arrow error while reading delimited text.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Fetching the dataset from a remote source failed.
    #[error("Data fetch failed for '{url}': {message}")]
    DataFetch {
        /// The requested URL.
        url: String,
        /// Status line or transport error.
        message: String,
    },

    /// A value could not be interpreted as a timestamp.
    #[error("Cannot parse '{value}' as a date")]
    DateParse {
        /// Rendering of the offending value.
        value: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },

    /// Unsupported file format.
    #[error("Unsupported format: {format}")]
    UnsupportedFormat {
        /// The unsupported format name or extension.
        format: String,
    },

    /// Parse error for malformed input data.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
    },
}

impl Error {
    /// Create an I/O error with a path context.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: Some(path.into()),
            source,
        }
    }

    /// Create an I/O error without path context.
    pub fn io_no_path(source: std::io::Error) -> Self {
        Self::Io { path: None, source }
    }

    /// Create a data fetch error.
    pub fn data_fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataFetch {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a date parse error.
    pub fn date_parse(value: impl Into<String>) -> Self {
        Self::DateParse {
            value: value.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an unsupported format error.
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// True for errors raised while fetching remote data.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::DataFetch { .. })
    }
}
