//! Trait definitions for dependency injection

use crate::core::IndexResult;
use async_trait::async_trait;
use std::path::PathBuf;
use url::Url;

/// Trait for configuration access
///
/// Provides read-only access to the effective configuration.
/// Implementations should be thread-safe (Send + Sync).
pub trait ConfigProvider: Send + Sync {
    /// Releases metadata endpoint to page through
    fn api_url(&self) -> &str;

    /// Number of releases requested per page
    fn page_size(&self) -> usize;

    /// Where the index file is written
    fn output_path(&self) -> PathBuf;
}

/// Status and fully drained body of one HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Canonical reason phrase for `status` (e.g. "Not Found"), empty when unknown
    pub reason: String,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for performing HTTP GET requests
///
/// `params` replace any query string already present on `url`, so the
/// caller fully controls the query that is sent.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform exactly one GET and return the status with the complete body
    ///
    /// Only failures to obtain a response are errors here (`Transport`,
    /// `BodyRead`); non-success statuses are returned as-is.
    async fn get(&self, url: &Url, params: &[(String, String)]) -> IndexResult<HttpResponse>;
}
