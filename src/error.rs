use std::time::Duration;

use serde::Serialize;

/// Failure taxonomy for a single backend call
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// No response reached the client
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// Non-2xx status, with the backend's `detail` field when it sent one
    #[error("Request failed with status code {status}")]
    HttpStatus { status: u16, detail: Option<String> },

    /// Response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Which branch of [`TransportError`] produced an [`ApiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Network,
    Timeout,
    HttpStatus,
    Decode,
}

/// Normalized error handed to services, state machines and views.
///
/// Every transport failure collapses into this one shape before it leaves
/// [`crate::transport::ApiClient`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    pub status: Option<u16>,
    pub detail: Option<String>,
}

impl ApiError {
    pub fn is_timeout(&self) -> bool {
        self.kind == ErrorKind::Timeout
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        let message = err.to_string();
        match err {
            TransportError::Network(_) => ApiError {
                kind: ErrorKind::Network,
                message,
                status: None,
                detail: None,
            },
            TransportError::Timeout(_) => ApiError {
                kind: ErrorKind::Timeout,
                message,
                status: None,
                detail: None,
            },
            TransportError::HttpStatus { status, detail } => ApiError {
                kind: ErrorKind::HttpStatus,
                message,
                status: Some(status),
                detail,
            },
            TransportError::Decode(_) => ApiError {
                kind: ErrorKind::Decode,
                message,
                status: None,
                detail: None,
            },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        // The request deadline is enforced by `ApiClient`, which reports `Timeout`
        // with its configured limit. A timeout inside reqwest is a connection failure.
        let transport = if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            TransportError::HttpStatus {
                status: status.as_u16(),
                detail: None,
            }
        } else {
            TransportError::Network(err.to_string())
        };
        transport.into()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Decode(err.to_string()).into()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_keeps_code_and_detail() {
        let err: ApiError = TransportError::HttpStatus {
            status: 500,
            detail: Some("vector index unavailable".to_string()),
        }
        .into();

        assert_eq!(err.kind, ErrorKind::HttpStatus);
        assert_eq!(err.status, Some(500));
        assert_eq!(err.detail.as_deref(), Some("vector index unavailable"));
        assert_eq!(err.message, "Request failed with status code 500");
    }

    #[test]
    fn test_timeout_message() {
        let err: ApiError = TransportError::Timeout(Duration::from_secs(30)).into();
        assert!(err.is_timeout());
        assert_eq!(err.status, None);
        assert_eq!(err.to_string(), "Request timed out after 30s");
    }

    #[test]
    fn test_decode_from_serde_error() {
        let serde_err = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        let err: ApiError = serde_err.into();
        assert_eq!(err.kind, ErrorKind::Decode);
        assert!(err.message.starts_with("Failed to decode response"));
    }

    #[tokio::test]
    async fn test_reqwest_timeout_is_network_error() {
        // Accepts the connection but never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap();
        let reqwest_err = client
            .get(format!("http://{}/health", addr))
            .send()
            .await
            .unwrap_err();
        assert!(reqwest_err.is_timeout());

        let err: ApiError = reqwest_err.into();
        assert_eq!(err.kind, ErrorKind::Network);
        assert!(err.message.starts_with("Network error"));
        server.abort();
    }

    #[test]
    fn test_error_kind_serialization() {
        let json = serde_json::to_string(&ErrorKind::HttpStatus).unwrap();
        assert_eq!(json, "\"http_status\"");
    }
}
