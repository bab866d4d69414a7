use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

use signal_relay::{build_router, AppState, InMemoryMessageRepository};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

/// A relay router backed by a real in-memory store the test can inspect directly
pub struct TestRelay {
    pub router: Router,
    pub repository: Arc<InMemoryMessageRepository>,
}

/// Status, headers and (possibly empty) body of a relay response
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl TestRelay {
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryMessageRepository::new());
        let router = build_router(AppState::new(repository.clone()));
        Self { router, repository }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Body) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(body)
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            None
        } else {
            Some(serde_json::from_slice(&bytes).unwrap())
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn send(&self, room: &str, message: Value) -> TestResponse {
        let body = serde_json::json!({ "room": room, "message": message }).to_string();
        self.request("POST", "/send", Body::from(body)).await
    }

    pub async fn send_raw(&self, body: &'static str) -> TestResponse {
        self.request("POST", "/send", Body::from(body)).await
    }

    pub async fn poll(&self, room: &str, since: f64) -> TestResponse {
        self.request("GET", &format!("/poll?room={room}&since={since}"), Body::empty())
            .await
    }

    pub async fn status(&self) -> TestResponse {
        self.request("GET", "/status", Body::empty()).await
    }
}

impl TestResponse {
    pub fn json(&self) -> &Value {
        self.body.as_ref().expect("response has a JSON body")
    }

    pub fn messages(&self) -> &Vec<Value> {
        self.json()["messages"]
            .as_array()
            .expect("poll response has a messages array")
    }

    pub fn timestamp(&self) -> f64 {
        self.json()["timestamp"]
            .as_f64()
            .expect("response has a float timestamp")
    }
}
