#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use cinemood_client::{
    error::ApiResult,
    transport::{HttpRequest, HttpResponse, Transport},
    ApiClient,
};

type Responder = dyn Fn(&HttpRequest) -> (Duration, ApiResult<HttpResponse>) + Send + Sync;

/// Transport that answers from a closure after a per-request delay
/// and records every request it sees
#[derive(Clone)]
pub struct ScriptedTransport {
    responder: Arc<Responder>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&HttpRequest) -> (Duration, ApiResult<HttpResponse>) + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(responder),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always returns `body` with status 200, immediately
    pub fn always_ok(body: &'static str) -> Self {
        Self::new(move |_| (Duration::ZERO, Ok(HttpResponse::ok(body))))
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn client(&self, timeout: Duration) -> ApiClient {
        ApiClient::new(Arc::new(self.clone()), timeout)
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let (delay, response) = (self.responder)(&request);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        response
    }
}

pub fn list_body(page: u32, titles: &[&str]) -> String {
    let movies: Vec<serde_json::Value> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| serde_json::json!({"id": format!("p{}-{}", page, i), "title": title}))
        .collect();
    serde_json::json!({
        "movies": movies,
        "total": 100,
        "page": page,
        "page_size": titles.len(),
    })
    .to_string()
}
