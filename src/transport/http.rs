//! reqwest-backed transport
//!
//! Joins request paths onto the configured base URL, sends JSON bodies and
//! returns the raw status and body. Status interpretation and decoding happen
//! in `ApiClient`.
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client as HttpClient,
};

use crate::{
    error::ApiResult,
    transport::{request_id::REQUEST_ID_HEADER, HttpRequest, HttpResponse, Method, Transport},
};

#[derive(Clone)]
pub struct HttpTransport {
    http_client: HttpClient,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = HttpClient::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let url = self.url_for(&request.path);

        let mut builder = match request.method {
            Method::Get => self.http_client.get(&url),
            Method::Post => self.http_client.post(&url),
        };

        builder = builder
            .query(&request.query)
            .header(REQUEST_ID_HEADER, request.request_id.to_string());

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_joins_single_slash() {
        let transport = HttpTransport::new("http://localhost:8000/").unwrap();
        assert_eq!(
            transport.url_for("/api/v1/genres"),
            "http://localhost:8000/api/v1/genres"
        );
    }

    #[test]
    fn test_url_for_without_slashes() {
        let transport = HttpTransport::new("http://localhost:8000").unwrap();
        assert_eq!(transport.url_for("health"), "http://localhost:8000/health");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        // Port 9 (discard) is closed on test hosts
        let transport = HttpTransport::new("http://127.0.0.1:9").unwrap();
        let err = transport
            .execute(HttpRequest::get("/health"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Network);
        assert_eq!(err.status, None);
    }
}
