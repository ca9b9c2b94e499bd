//! Mock transport for unit testing
//!
//! [`MockTransport`] answers requests from canned responses registered per
//! method and path, and records every request it sees, so code built on
//! [`LibreNmsClient`](crate::LibreNmsClient) can be tested without a running
//! LibreNMS instance.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use url::Url;

use crate::client::API_PATH;
use crate::common::transport::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::error::BoxError;

#[derive(Debug, Clone)]
enum Reply {
    Response(HttpResponse),
    Failure(String),
}

#[derive(Debug, Default)]
struct MockState {
    replies: HashMap<(HttpMethod, String), Reply>,
    requests: Vec<HttpRequest>,
}

/// In-memory [`Transport`]
///
/// Paths are relative to the API root, e.g. `devices/web01`. Unregistered
/// routes answer 404 with a LibreNMS error envelope.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Mock with no routes
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Answer `method path` with `response`
    pub fn on(&self, method: HttpMethod, path: &str, response: HttpResponse) -> &Self {
        self.state()
            .replies
            .insert((method, route(path)), Reply::Response(response));
        self
    }

    /// Answer `method path` with status 200 and `body` serialized as JSON
    pub fn on_json(&self, method: HttpMethod, path: &str, body: &serde_json::Value) -> &Self {
        let response = HttpResponse::new(200, body.to_string())
            .with_header("content-type", "application/json");
        self.on(method, path, response)
    }

    /// Fail `method path` at the transport level with `message`
    pub fn fail(&self, method: HttpMethod, path: &str, message: impl Into<String>) -> &Self {
        self.state()
            .replies
            .insert((method, route(path)), Reply::Failure(message.into()));
        self
    }

    /// Every request received so far, oldest first
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state().requests.clone()
    }

    /// Most recent request
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.state().requests.last().cloned()
    }

    /// Number of requests received
    pub fn request_count(&self) -> usize {
        self.state().requests.len()
    }
}

fn route(path: &str) -> String {
    format!("/{API_PATH}{}", path.trim_start_matches('/'))
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        let path = Url::parse(&request.url)?.path().to_owned();
        let key = (request.method, path);

        let mut state = self.state();
        state.requests.push(request);
        match state.replies.get(&key) {
            Some(Reply::Response(response)) => Ok(response.clone()),
            Some(Reply::Failure(message)) => Err(message.clone().into()),
            None => Ok(HttpResponse::new(
                404,
                serde_json::json!({
                    "status": "error",
                    "message": format!("no mock response for {} {}", key.0, key.1),
                })
                .to_string(),
            )),
        }
    }
}
