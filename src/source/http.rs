//! HTTP/HTTPS JSON data source.
//!
//! Fetches a flat JSON array of records from a Socrata-style endpoint such
//! as NYC Open Data, asking for a limited number of rows sorted by date.

use std::time::Duration;

use reqwest::{blocking::Client, Url};

use super::DataSource;
use crate::{
    config::{DEFAULT_LIMIT, DEFAULT_ORDER, DEFAULT_TIMEOUT_SECS},
    dataset::Dataset,
    error::{Error, Result},
};

/// A read-only source backed by a JSON HTTP endpoint.
///
/// Any transport failure or non-2xx response is returned as
/// [`Error::DataFetch`].
///
/// # Example
///
/// ```no_run
/// use dqdash::source::{DataSource, HttpSource};
///
/// let source = HttpSource::new("https://data.cityofnewyork.us/resource/erm2-nwe9.json")
///     .unwrap()
///     .limit(500);
/// let dataset = source.load().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: String,
    limit: usize,
    order: Option<String>,
}

impl HttpSource {
    /// Creates a source for `url` with the default limit, order and timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a source with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_timeout(url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("dqdash/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::invalid_config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self::with_client(url, client))
    }

    /// Creates a source that uses a preconfigured client.
    pub fn with_client(url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            url: url.into(),
            limit: DEFAULT_LIMIT,
            order: Some(DEFAULT_ORDER.to_string()),
        }
    }

    /// Sets the maximum number of records requested.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the sort expression; `None` leaves ordering to the server.
    #[must_use]
    pub fn order(mut self, order: Option<String>) -> Self {
        self.order = order;
        self
    }

    /// Returns the endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Builds the request URL with `$limit` and `$order` parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is malformed.
    pub fn request_url(&self) -> Result<Url> {
        let mut params = vec![("$limit", self.limit.to_string())];
        if let Some(order) = &self.order {
            params.push(("$order", order.clone()));
        }

        Url::parse_with_params(&self.url, &params)
            .map_err(|e| Error::invalid_config(format!("invalid URL '{}': {e}", self.url)))
    }
}

impl DataSource for HttpSource {
    fn load(&self) -> Result<Dataset> {
        let url = self.request_url()?;
        tracing::info!(url = %url, "fetching dataset");

        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| Error::data_fetch(url.as_str(), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(url = %url, %status, "fetch failed");
            return Err(Error::data_fetch(url.as_str(), format!("status {status}")));
        }

        let body = response
            .bytes()
            .map_err(|e| Error::data_fetch(url.as_str(), format!("reading body: {e}")))?;
        let dataset = Dataset::from_json_slice(&body)?;

        tracing::info!(records = dataset.len(), "data fetched successfully");
        Ok(dataset)
    }

    fn describe(&self) -> String {
        format!("endpoint {}", self.url)
    }
}
