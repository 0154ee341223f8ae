//! Transport Client
//!
//! `Transport` is the raw execution seam (reqwest in production, scripted fakes
//! in tests). `ApiClient` wraps any transport with the fixed timeout and the
//! response interceptor that turns every failure into an `ApiError`.
use std::{sync::Arc, time::Duration};

use serde::{de::DeserializeOwned, Serialize};
use tracing::Instrument;

use crate::{
    config::Config,
    error::{ApiError, ApiResult, TransportError},
};

pub mod http;
pub mod request_id;

pub use http::HttpTransport;
pub use request_id::RequestId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// One outbound call, path relative to the backend base URL
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub request_id: RequestId,
}

impl HttpRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: Vec::new(),
            body: None,
            request_id: RequestId::new(),
        }
    }

    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
            request_id: RequestId::new(),
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Looks up a query parameter by name
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Raw status and body as received from the backend
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes a single HTTP exchange
///
/// Implementations report only failures where no response arrived (network,
/// timeout). Any received status, 2xx or not, comes back as `Ok(HttpResponse)`.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> ApiResult<HttpResponse>;
}

/// Shared client used by every domain service
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    /// Builds a reqwest-backed client from configuration
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let transport = HttpTransport::new(config.api_base_url.clone())?;

        tracing::info!(
            base_url = %config.api_base_url,
            timeout_secs = config.api_timeout_secs,
            "API client configured"
        );

        Ok(Self::new(Arc::new(transport), config.timeout()))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> ApiResult<T> {
        self.dispatch(HttpRequest::get(path).with_query(query)).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let body = serde_json::to_value(body)?;
        self.dispatch(HttpRequest::post(path, body)).await
    }

    /// Runs a request through timeout, status check and decode
    pub async fn dispatch<T: DeserializeOwned>(&self, request: HttpRequest) -> ApiResult<T> {
        let span = request_id::make_request_span(
            request.method.as_str(),
            &request.path,
            &request.request_id,
        );

        async move {
            let result = self.exchange(request).await;
            result.map_err(intercept)
        }
        .instrument(span)
        .await
    }

    async fn exchange<T: DeserializeOwned>(&self, request: HttpRequest) -> ApiResult<T> {
        let response = tokio::time::timeout(self.timeout, self.transport.execute(request))
            .await
            .map_err(|_| ApiError::from(TransportError::Timeout(self.timeout)))??;

        if !response.is_success() {
            return Err(TransportError::HttpStatus {
                status: response.status,
                detail: extract_detail(&response.body),
            }
            .into());
        }

        serde_json::from_str(&response.body).map_err(|e| {
            tracing::error!(error = %e, body = %response.body, "Failed to decode response");
            ApiError::from(TransportError::Decode(e.to_string()))
        })
    }
}

/// Pulls the backend's `detail` field out of an error body
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::Null => None,
        serde_json::Value::String(detail) => Some(detail.clone()),
        other => Some(other.to_string()),
    }
}

/// Diagnostic logging for failures; the error passes through unchanged
fn intercept(err: ApiError) -> ApiError {
    match err.status {
        Some(401) => tracing::error!("Unauthorized access"),
        Some(500) => tracing::error!(detail = ?err.detail, "Server error"),
        _ => tracing::debug!(error = %err, kind = ?err.kind, "Request failed"),
    }
    err
}
