//! Mock implementations of service traits for testing

use super::traits::{ConfigProvider, HttpResponse, HttpTransport};
use crate::core::{IndexError, IndexResult};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use url::Url;

/// Mock configuration provider for testing
///
/// # Example
///
/// ```
/// use release_index::di::mocks::MockConfigProvider;
/// use release_index::di::ConfigProvider;
///
/// let mut config = MockConfigProvider::default();
/// config.page_size = 5;
///
/// assert_eq!(config.page_size(), 5);
/// ```
#[derive(Clone)]
pub struct MockConfigProvider {
    pub api_url: String,
    pub page_size: usize,
    pub output_path: PathBuf,
}

impl Default for MockConfigProvider {
    fn default() -> Self {
        Self {
            api_url: "https://releases.test/v1/releases/tool".to_string(),
            page_size: 20,
            output_path: PathBuf::from("/tmp/release-index-test/index.json"),
        }
    }
}

impl ConfigProvider for MockConfigProvider {
    fn api_url(&self) -> &str {
        &self.api_url
    }

    fn page_size(&self) -> usize {
        self.page_size
    }

    fn output_path(&self) -> PathBuf {
        self.output_path.clone()
    }
}

/// A request seen by [`MockTransport`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: Url,
    pub params: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Value of a query parameter, if it was sent
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Mock HTTP transport for testing
///
/// Responses are served in the order they were queued and every request is
/// recorded. Once the queue is empty, further requests fail with a
/// transport error.
///
/// # Example
///
/// ```
/// use release_index::di::mocks::MockTransport;
///
/// let transport = MockTransport::new();
/// transport.push_json(200, "[]");
/// transport.push_status(500);
/// assert_eq!(transport.pending(), 2);
/// ```
#[derive(Clone)]
pub struct MockTransport {
    responses: Arc<Mutex<VecDeque<IndexResult<HttpResponse>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockTransport {
    /// Create a new mock transport with nothing queued
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a raw response
    pub fn push_response(&self, response: HttpResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue a response with the given status and body text
    pub fn push_json(&self, status: u16, body: impl Into<String>) {
        self.push_response(HttpResponse {
            status,
            reason: reason_phrase(status).to_string(),
            body: body.into().into_bytes(),
        });
    }

    /// Queue a JSON page of releases
    pub fn push_page(&self, records: &[serde_json::Value]) {
        self.push_json(200, serde_json::Value::from(records.to_vec()).to_string());
    }

    /// Queue an empty-bodied response with the given status
    pub fn push_status(&self, status: u16) {
        self.push_json(status, "");
    }

    /// Queue a failure that the transport itself reports
    pub fn push_error(&self, error: IndexError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Requests made so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests made so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Number of queued responses not yet served
    pub fn pending(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, url: &Url, params: &[(String, String)]) -> IndexResult<HttpResponse> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.clone(),
            params: params.to_vec(),
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(IndexError::Transport {
                    url: url.to_string(),
                    source: "no scripted response left".into(),
                })
            })
    }
}

fn reason_phrase(status: u16) -> &'static str {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_transport_fills_reason_from_status() {
        let transport = MockTransport::new();
        transport.push_status(418);
        transport.push_status(599);

        let url = Url::parse("https://releases.test/v1/releases/tool").unwrap();
        let teapot = transport.get(&url, &[]).await.unwrap();
        assert_eq!(teapot.reason, "I'm a teapot");
        let unknown = transport.get(&url, &[]).await.unwrap();
        assert_eq!(unknown.reason, "");
        assert_eq!(transport.request_count(), 2);
    }
}
