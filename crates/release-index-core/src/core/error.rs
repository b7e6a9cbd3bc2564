use thiserror::Error;

pub type IndexResult<T> = Result<T, IndexError>;

/// Boxed cause carried by transport and body-read failures.
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum IndexError {
    /// The base URL could not be parsed. No request was attempted.
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Connection, DNS or TLS failure before a response was received.
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxedCause,
    },

    /// The server answered with a non-success status.
    #[error("Non-success response code during request: {status} {reason}")]
    HttpStatus { status: u16, reason: String },

    /// The response body could not be read to completion.
    #[error("Failed to read response body from {url}: {source}")]
    BodyRead {
        url: String,
        #[source]
        source: BoxedCause,
    },

    /// The page body was not a valid release list. The raw body is kept for diagnosis.
    #[error("Failed to decode release page: {source}: {body}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// A page did not list releases newest-first, so the cursor cannot be trusted.
    #[error(
        "Release page {page} is not ordered by creation time: record {position} created at {current} follows {previous}"
    )]
    OrderingViolation {
        page: usize,
        position: usize,
        previous: String,
        current: String,
    },

    /// A full page ended on the same cursor as the previous one; the API is not advancing.
    #[error("Release pagination stalled at cursor {cursor}")]
    CursorStalled { cursor: String },

    #[error("Version error: {0}")]
    Version(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Path error: {0}")]
    Path(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IndexError {
    /// Whether this error came out of fetching a page (as opposed to local setup or output).
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            IndexError::InvalidUrl { .. }
                | IndexError::Transport { .. }
                | IndexError::HttpStatus { .. }
                | IndexError::BodyRead { .. }
                | IndexError::Decode { .. }
                | IndexError::OrderingViolation { .. }
                | IndexError::CursorStalled { .. }
        )
    }

    /// HTTP status code, when the server rejected the request.
    pub fn status(&self) -> Option<u16> {
        match self {
            IndexError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_message() {
        let err = IndexError::HttpStatus {
            status: 503,
            reason: "Service Unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Non-success response code during request: 503 Service Unavailable"
        );
        assert_eq!(err.status(), Some(503));
        assert!(err.is_fetch_error());
    }

    #[test]
    fn test_decode_error_keeps_body() {
        let source = serde_json::from_str::<Vec<u8>>("{\"oops\"").unwrap_err();
        let err = IndexError::Decode {
            source,
            body: "{\"oops\"".to_string(),
        };
        assert!(err.to_string().contains("{\"oops\""));
    }

    #[test]
    fn test_invalid_url_is_fetch_error() {
        let source = url::Url::parse("not a url").unwrap_err();
        let err = IndexError::InvalidUrl {
            url: "not a url".to_string(),
            source,
        };
        assert!(err.is_fetch_error());
        assert!(err.to_string().starts_with("Invalid URL 'not a url'"));
    }

    #[test]
    fn test_config_error_is_not_fetch_error() {
        let err = IndexError::Config("page_size must be greater than zero".to_string());
        assert!(!err.is_fetch_error());
        assert_eq!(err.status(), None);
    }
}
