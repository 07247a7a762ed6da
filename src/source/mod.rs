//! Data sources for dqdash.
//!
//! A [`DataSource`] produces the in-memory [`Dataset`] the metrics run on.
//! The engine never learns which source produced it.

#[cfg(feature = "http")]
pub mod http;
pub mod local;
pub mod memory;

#[cfg(feature = "http")]
pub use http::HttpSource;
pub use local::LocalSource;
pub use memory::MemorySource;

use crate::{dataset::Dataset, error::Result};

/// Something that can load a dataset.
///
/// Loading is a single blocking call. A failed load aborts the pipeline
/// before any metric is computed.
pub trait DataSource: Send + Sync {
    /// Loads the full dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be read, fetched or parsed.
    fn load(&self) -> Result<Dataset>;

    /// Short human-readable description used in logs.
    fn describe(&self) -> String;
}
