//! Single-page retrieval from the releases API

use crate::core::{IndexError, IndexResult};
use crate::di::traits::HttpTransport;
use crate::releases::types::ReleaseRecord;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Query for one page of releases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// Maximum number of releases in the page
    pub limit: usize,
    /// Only return releases created before this timestamp
    pub after: Option<String>,
}

impl PageQuery {
    /// Query for the newest page
    pub fn first(limit: usize) -> Self {
        Self { limit, after: None }
    }

    /// Query for the page following `cursor`
    pub fn after(limit: usize, cursor: impl Into<String>) -> Self {
        Self {
            limit,
            after: Some(cursor.into()),
        }
    }

    /// Query string parameters, `limit` first
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("limit".to_string(), self.limit.to_string())];
        if let Some(ref after) = self.after {
            params.push(("after".to_string(), after.clone()));
        }
        params
    }
}

/// Parse the endpoint URL, failing before any request is made
pub fn parse_base_url(base_url: &str) -> IndexResult<Url> {
    Url::parse(base_url).map_err(|source| IndexError::InvalidUrl {
        url: base_url.to_string(),
        source,
    })
}

/// Decode a page body into releases, keeping the body on failure
pub fn decode_page(body: &[u8]) -> IndexResult<Vec<ReleaseRecord>> {
    serde_json::from_slice(body).map_err(|source| IndexError::Decode {
        source,
        body: String::from_utf8_lossy(body).into_owned(),
    })
}

/// Fetches one page of releases per call. Holds no state between calls.
#[derive(Clone)]
pub struct PageFetcher {
    transport: Arc<dyn HttpTransport>,
}

impl PageFetcher {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Fetch one page from `base_url`
    ///
    /// Any query already on `base_url` is replaced by `query`.
    pub async fn fetch(&self, base_url: &str, query: &PageQuery) -> IndexResult<Vec<ReleaseRecord>> {
        let url = parse_base_url(base_url)?;
        self.fetch_url(&url, query).await
    }

    /// Fetch one page from an already parsed endpoint
    pub async fn fetch_url(&self, url: &Url, query: &PageQuery) -> IndexResult<Vec<ReleaseRecord>> {
        debug!(
            url = %url,
            limit = query.limit,
            after = query.after.as_deref().unwrap_or("-"),
            "Fetching release page"
        );

        let response = self.transport.get(url, &query.to_params()).await?;

        if !response.is_success() {
            return Err(IndexError::HttpStatus {
                status: response.status,
                reason: response.reason,
            });
        }

        let records = decode_page(&response.body)?;
        debug!(count = records.len(), "Decoded release page");
        Ok(records)
    }
}
