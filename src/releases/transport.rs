//! Production HTTP transport on top of reqwest

use crate::core::{IndexError, IndexResult};
use crate::di::traits::{HttpResponse, HttpTransport};
use async_trait::async_trait;
use reqwest::{header, Client as HttpClient};
use url::Url;

const USER_AGENT: &str = concat!("release-index/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed [`HttpTransport`]
///
/// Uses reqwest's default timeouts; there is no retry.
pub struct ReqwestTransport {
    http_client: HttpClient,
}

impl ReqwestTransport {
    /// Create a new transport with a JSON `Accept` header and a fixed user agent
    pub fn new() -> IndexResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, header::HeaderValue::from_static(USER_AGENT));
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http_client = HttpClient::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| IndexError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http_client })
    }

    /// Wrap an already configured client, e.g. one with custom timeouts.
    /// No default headers are added.
    pub fn with_client(http_client: HttpClient) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url, params: &[(String, String)]) -> IndexResult<HttpResponse> {
        let mut target = url.clone();
        target.set_query(None);

        let response = self
            .http_client
            .get(target.clone())
            .query(params)
            .send()
            .await
            .map_err(|e| IndexError::Transport {
                url: target.to_string(),
                source: Box::new(e),
            })?;

        let status = response.status();

        // Drain the body whatever the status so the connection can be reused.
        let body = response.bytes().await.map_err(|e| IndexError::BodyRead {
            url: target.to_string(),
            source: Box::new(e),
        })?;

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body: body.to_vec(),
        })
    }
}
