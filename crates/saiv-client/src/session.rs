//! The signed-in client session.

use std::fmt;

use chrono::{DateTime, Utc};
use reqwest::{Method, Response};
use saiv_core::AppResult;
use saiv_entity::user::User;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::BackendClient;

/// Bearer token plus the signed-in user.
///
/// Created by [`BackendClient::login`] and dropped at logout or when the
/// backend answers 401. Every authenticated endpoint lives on this type.
#[derive(Clone)]
pub struct ClientSession {
    backend: BackendClient,
    token: String,
    user: Option<User>,
    created_at: DateTime<Utc>,
}

impl ClientSession {
    /// Wrap an access token obtained from the backend.
    pub fn new(backend: BackendClient, token: String, user: Option<User>) -> Self {
        Self {
            backend,
            token,
            user,
            created_at: Utc::now(),
        }
    }

    /// The signed-in user, if the backend returned one.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// When the session was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The unauthenticated client this session was created from.
    pub fn backend(&self) -> &BackendClient {
        &self.backend
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        self.backend
            .json(Method::GET, path, query, Some(&self.token), None)
            .await
    }

    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Value,
    ) -> AppResult<T> {
        self.backend
            .json(method, path, &[], Some(&self.token), Some(body))
            .await
    }

    pub(crate) async fn call_empty(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> AppResult<()> {
        self.backend
            .empty(method, path, Some(&self.token), body)
            .await
    }

    pub(crate) async fn get_raw(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<Response> {
        self.backend
            .send(Method::GET, path, query, Some(&self.token), None)
            .await
    }
}

impl fmt::Debug for ClientSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSession")
            .field("user", &self.user.as_ref().map(|u| &u.email))
            .field("created_at", &self.created_at)
            .field("token", &"<redacted>")
            .finish()
    }
}
