//! `CurrentSession` extractor: resolves the session cookie to a signed-in
//! backend session or redirects to the login page.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use tracing::info;
use uuid::Uuid;

use saiv_client::ClientSession;
use saiv_core::AppResult;
use saiv_core::error::MSG_AUTHENTICATION;
use saiv_entity::user::User;

use crate::extractors::flash::redirect_err;
use crate::state::AppState;
use crate::store::SessionStore;

/// Cookie carrying a freshly issued session id.
pub fn session_cookie(name: &str, id: Uuid, secure: bool) -> Cookie<'static> {
    Cookie::build((name.to_string(), id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Cookie that clears the session id in the browser.
pub fn removal_cookie(name: &str) -> Cookie<'static> {
    Cookie::build((name.to_string(), String::new()))
        .path("/")
        .build()
}

/// The signed-in backend session for this request.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    /// Session cookie id.
    pub id: Uuid,
    client: ClientSession,
    store: Arc<SessionStore>,
    cookie_name: String,
}

impl CurrentSession {
    /// The backend session.
    pub fn client(&self) -> &ClientSession {
        &self.client
    }

    /// The signed-in user, if the backend returned one at login.
    pub fn user(&self) -> Option<&User> {
        self.client.user()
    }

    /// Passes a backend result through, unless it says the token expired.
    ///
    /// On a 401 the stored session is discarded and the browser is sent to
    /// the login page with its cookie cleared.
    pub fn check<T>(&self, result: AppResult<T>) -> Result<AppResult<T>, Response> {
        match result {
            Err(err) if err.is_session_expired() => Err(self.expire()),
            other => Ok(other),
        }
    }

    /// Drops the session and redirects to the login prompt.
    pub fn expire(&self) -> Response {
        self.store.remove(&self.id);
        info!(session_id = %self.id, "Backend rejected token; dashboard session discarded");
        let jar = CookieJar::new().remove(removal_cookie(&self.cookie_name));
        (jar, redirect_err("/login", MSG_AUTHENTICATION)).into_response()
    }
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(cookie) = jar.get(state.cookie_name()) else {
            return Err(Redirect::to("/login").into_response());
        };

        let client = Uuid::parse_str(cookie.value())
            .ok()
            .and_then(|id| state.sessions.get(&id).map(|client| (id, client)));

        match client {
            Some((id, client)) => Ok(Self {
                id,
                client,
                store: Arc::clone(&state.sessions),
                cookie_name: state.cookie_name().to_string(),
            }),
            None => {
                let jar = jar.remove(removal_cookie(state.cookie_name()));
                Err((jar, redirect_err("/login", MSG_AUTHENTICATION)).into_response())
            }
        }
    }
}
