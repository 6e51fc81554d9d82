//! # saiv-testkit
//!
//! A fake SAIV backend for integration tests. It binds to `127.0.0.1:0`,
//! answers with canned responses registered per method and path, and
//! records every request it receives so tests can assert on the exact
//! calls a client issued (or did not issue).

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use dashmap::DashMap;
use percent_encoding::percent_decode_str;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// API prefix stripped from recorded paths.
pub const API_PREFIX: &str = "/api/v1";

/// A request received by the fake backend.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// HTTP method.
    pub method: String,
    /// Path with the API prefix removed.
    pub path: String,
    /// Raw query string.
    pub query: Option<String>,
    /// `Authorization` header value.
    pub authorization: Option<String>,
    /// JSON body, if one was sent.
    pub body: Option<Value>,
}

impl RecordedCall {
    /// Value of one query parameter.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.query.as_deref().and_then(|q| {
            q.split('&').find_map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (key == name).then(|| {
                    percent_decode_str(&value.replace('+', " "))
                        .decode_utf8_lossy()
                        .into_owned()
                })
            })
        })
    }
}

#[derive(Debug, Clone)]
struct CannedResponse {
    status: StatusCode,
    content_type: &'static str,
    body: Bytes,
}

#[derive(Default)]
struct FakeState {
    routes: DashMap<(String, String), CannedResponse>,
    calls: Mutex<Vec<RecordedCall>>,
}

/// A running fake backend.
pub struct FakeBackend {
    addr: SocketAddr,
    state: Arc<FakeState>,
    handle: JoinHandle<()>,
}

impl FakeBackend {
    /// Start the server on an ephemeral port.
    pub async fn start() -> Self {
        let state = Arc::new(FakeState::default());
        let router = Router::new()
            .fallback(handle_any)
            .with_state(Arc::clone(&state));
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake backend");
        let addr = listener.local_addr().expect("fake backend address");
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        Self {
            addr,
            state,
            handle,
        }
    }

    /// Base URL without the API prefix, e.g. `http://127.0.0.1:40123`.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Answer `method path` with a JSON body.
    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        self.insert(
            method,
            path,
            CannedResponse {
                status: StatusCode::from_u16(status).expect("valid status"),
                content_type: "application/json",
                body: Bytes::from(body.to_string()),
            },
        );
    }

    /// Answer `method path` with an empty body.
    pub fn respond_empty(&self, method: &str, path: &str, status: u16) {
        self.insert(
            method,
            path,
            CannedResponse {
                status: StatusCode::from_u16(status).expect("valid status"),
                content_type: "application/json",
                body: Bytes::new(),
            },
        );
    }

    /// Answer `method path` with raw bytes.
    pub fn respond_bytes(&self, method: &str, path: &str, content_type: &'static str, data: &[u8]) {
        self.insert(
            method,
            path,
            CannedResponse {
                status: StatusCode::OK,
                content_type,
                body: Bytes::copy_from_slice(data),
            },
        );
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().expect("calls lock").clone()
    }

    /// Calls matching `method path`.
    pub fn calls_to(&self, method: &str, path: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == method && c.path == path)
            .collect()
    }

    /// Calls whose method is not `GET`.
    pub fn mutations(&self) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.method != "GET")
            .collect()
    }

    fn insert(&self, method: &str, path: &str, response: CannedResponse) {
        self.state
            .routes
            .insert((method.to_uppercase(), path.to_string()), response);
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle_any(
    State(state): State<Arc<FakeState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri
        .path()
        .strip_prefix(API_PREFIX)
        .unwrap_or(uri.path())
        .to_string();
    let call = RecordedCall {
        method: method.as_str().to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    };
    state.calls.lock().expect("calls lock").push(call);

    let canned = state
        .routes
        .get(&(method.as_str().to_string(), path))
        .map(|entry| entry.value().clone());
    match canned {
        Some(canned) => (
            canned.status,
            [(header::CONTENT_TYPE, canned.content_type)],
            canned.body,
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({"detail": "Not Found"})),
        )
            .into_response(),
    }
}
