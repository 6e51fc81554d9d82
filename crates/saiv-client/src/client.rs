//! HTTP transport for the SAIV backend.

use std::time::{Duration, Instant};

use reqwest::{Method, Response, Url};
use saiv_core::config::backend::BackendConfig;
use saiv_core::{AppError, AppResult};
use saiv_entity::user::{LoginRequest, LoginResponse};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error;
use crate::session::ClientSession;

/// Shown when a user without dashboard access signs in.
pub const MSG_ROLE_DENIED: &str =
    "Access denied. Only instructors, TAs, and admins can access this dashboard.";

/// Unauthenticated handle on the backend.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client from configuration.
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.api_base_url(),
        })
    }

    /// Base URL including the API prefix.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sign in with email and password.
    ///
    /// Roles other than instructor, TA and admin are refused even when the
    /// backend accepts the credentials. A response without a user carries no
    /// role and is refused as well.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<ClientSession> {
        let body = serde_json::to_value(LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        let response: LoginResponse = self
            .json(Method::POST, "/auth/login", &[], None, Some(body))
            .await?;

        let Some(user) = &response.user else {
            warn!(email = %email, "Dashboard login refused: backend returned no user");
            return Err(AppError::authorization(MSG_ROLE_DENIED));
        };
        if !user.role.can_access_dashboard() {
            warn!(email = %email, role = %user.role, "Dashboard login refused for role");
            return Err(AppError::authorization(MSG_ROLE_DENIED));
        }

        debug!(email = %email, "Backend login succeeded");
        Ok(ClientSession::new(
            self.clone(),
            response.access_token,
            response.user,
        ))
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> AppResult<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| AppError::configuration(format!("Invalid backend URL: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// Issue a request and return the response if its status is a success.
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        token: Option<&str>,
        body: Option<Value>,
    ) -> AppResult<Response> {
        let url = self.url(path, query)?;
        let mut request = self.http.request(method.clone(), url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let started = Instant::now();
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(method = %method, path = %path, error = %e, "Backend request failed");
                return Err(error::from_transport(e));
            }
        };
        let status = response.status();
        debug!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Backend call"
        );

        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let err = error::from_response(status.as_u16(), &body);
        warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            detail = %err.message,
            "Backend rejected request"
        );
        Err(err)
    }

    /// Issue a request and decode the JSON body.
    pub(crate) async fn json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        token: Option<&str>,
        body: Option<Value>,
    ) -> AppResult<T> {
        let response = self.send(method, path, query, token, body).await?;
        let bytes = response.bytes().await.map_err(error::from_transport)?;
        serde_json::from_slice(&bytes).map_err(|e| {
            AppError::serialization(format!("Unexpected response from {path}: {e}"))
        })
    }

    /// Issue a request whose response body is ignored.
    pub(crate) async fn empty(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> AppResult<()> {
        self.send(method, path, &[], token, body).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let client = BackendClient::new(&BackendConfig {
            url: "http://backend:8000/".into(),
            ..BackendConfig::default()
        })
        .unwrap();
        assert_eq!(client.base_url(), "http://backend:8000/api/v1");
        let url = client
            .url("/courses/", &[("limit", "50".into()), ("is_active", "true".into())])
            .unwrap();
        assert_eq!(url.as_str(), "http://backend:8000/api/v1/courses/?limit=50&is_active=true");
        let url = client.url("/stats/sessions/s1", &[]).unwrap();
        assert_eq!(url.as_str(), "http://backend:8000/api/v1/stats/sessions/s1");
    }
}
