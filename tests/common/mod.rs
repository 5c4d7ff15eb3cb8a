//! Common test utilities for API client tests
//!
//! Provides a throwaway HTTP server that records every request it receives
//! and answers with a configurable status and body.

#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use content_platform_client::{ApiClient, TokenProvider};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// A request as seen by the server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }
}

#[derive(Clone)]
struct Recorder {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    reply: Arc<Mutex<(StatusCode, String)>>,
}

pub struct TestServer {
    pub base_url: String,
    recorder: Recorder,
}

impl TestServer {
    /// Answer every following request with `status` and `body`
    pub fn reply_with(&self, status: StatusCode, body: &str) {
        *self.recorder.reply.lock().unwrap() = (status, body.to_string());
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.recorder.requests.lock().unwrap().clone()
    }

    /// The single request received so far
    pub fn only_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::builder()
            .base_url(&self.base_url)
            .build()
            .expect("Failed to build client")
    }

    pub fn client_with<P: TokenProvider + 'static>(&self, provider: P) -> ApiClient {
        ApiClient::builder()
            .base_url(&self.base_url)
            .token_provider(provider)
            .build()
            .expect("Failed to build client")
    }
}

/// Start a recording server on a random local port; base URL ends in `/api/v1`
pub async fn spawn_server() -> TestServer {
    let recorder = Recorder {
        requests: Arc::new(Mutex::new(Vec::new())),
        reply: Arc::new(Mutex::new((StatusCode::OK, r#"{"ok":true}"#.to_string()))),
    };

    let app = Router::new()
        .fallback(record)
        .with_state(recorder.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{}/api/v1", addr),
        recorder,
    }
}

async fn record(
    State(recorder): State<Recorder>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    recorder.requests.lock().unwrap().push(RecordedRequest {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    });

    let (status, body) = recorder.reply.lock().unwrap().clone();
    (status, [(CONTENT_TYPE, "application/json")], body)
}
