//! Shared test helpers for dashboard integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use percent_encoding::percent_decode_str;
use serde_json::{Value, json};
use tower::ServiceExt;

use saiv_core::config::AppConfig;
use saiv_testkit::FakeBackend;
use saiv_web::{AppState, build_app};

/// Test application context
pub struct TestApp {
    /// The Axum app for making test requests
    pub router: Router,
    /// Fake backend the dashboard talks to
    pub fake: FakeBackend,
    /// Application state, for inspecting the session store
    pub state: AppState,
}

impl TestApp {
    /// Create a dashboard wired to a fresh fake backend
    pub async fn new() -> Self {
        let fake = FakeBackend::start().await;
        let mut config = AppConfig::default();
        config.backend.url = fake.url();
        config.backend.timeout_seconds = 5;
        let state = AppState::new(config).expect("Failed to build state");
        let router = build_app(state.clone());
        Self {
            router,
            fake,
            state,
        }
    }

    /// Sign in as an instructor and return the session cookie pair
    pub async fn login(&self) -> String {
        self.fake.respond(
            "POST",
            "/auth/login",
            200,
            json!({
                "access_token": "tok-abc",
                "token_type": "bearer",
                "user": {"id": "u1", "email": "prof@uni.edu", "full_name": "Prof X", "role": "instructor"}
            }),
        );
        let response = self
            .request("POST", "/login", Some("email=prof%40uni.edu&password=secret"), None)
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "Login failed: {}", response.body);
        let set_cookie = response
            .header(header::SET_COOKIE.as_str())
            .expect("No session cookie after login");
        set_cookie
            .split(';')
            .next()
            .expect("cookie pair")
            .to_string()
    }

    /// Make an HTTP request to the test app; `form` is an urlencoded body
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        form: Option<&str>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);
        if form.is_some() {
            req = req.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        }
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }
        let req = req
            .body(Body::from(form.unwrap_or_default().to_string()))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 4 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&body_bytes).to_string(),
        }
    }

    /// A scheduled/active/closed session `s1` of course `c1`
    pub fn with_session(&self, status: &str) {
        self.fake.respond(
            "GET",
            "/sessions/",
            200,
            json!([{
                "id": "s1",
                "course_id": "c1",
                "course_code": "CS101",
                "name": "Week 1",
                "session_type": "lecture",
                "status": status
            }]),
        );
    }

    /// Active course list; pass `false` to simulate a deleted `c1`
    pub fn with_course_active(&self, active: bool) {
        let courses: Value = if active {
            json!([{"id": "c1", "code": "CS101", "name": "Intro", "is_active": true}])
        } else {
            json!([])
        };
        self.fake.respond("GET", "/courses/", 200, courses);
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Body as text
    pub body: String,
}

impl TestResponse {
    /// First value of a header
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Decoded `Location` header
    pub fn location(&self) -> String {
        decode(self.header("location").unwrap_or_default())
    }
}

/// Reverses query-string encoding for assertions.
pub fn decode(raw: &str) -> String {
    percent_decode_str(&raw.replace('+', " "))
        .decode_utf8_lossy()
        .into_owned()
}
