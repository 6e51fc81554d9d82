//! Login and logout.

use axum::Form;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::forms::{LoginForm, validation_message};
use crate::error::status_for;
use crate::extractors::session::{removal_cookie, session_cookie};
use crate::extractors::{Flash, redirect_msg};
use crate::render::layout;
use crate::state::AppState;

/// GET /login
pub async fn login_page(Query(flash): Query<Flash>) -> Html<String> {
    layout::login_page(&flash, "")
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    if let Err(errors) = form.validate() {
        let flash = Flash::error(validation_message(&errors));
        return (
            axum::http::StatusCode::BAD_REQUEST,
            layout::login_page(&flash, &form.email),
        )
            .into_response();
    }

    match state.backend.login(form.email.trim(), &form.password).await {
        Ok(client) => {
            let role = client.user().map(|u| u.role.as_str()).unwrap_or("unknown");
            info!(email = %form.email, role = %role, "Dashboard login");
            let id = state.sessions.insert(client);
            let cookie = session_cookie(
                state.cookie_name(),
                id,
                state.config.session.secure_cookie,
            );
            (jar.add(cookie), Redirect::to("/")).into_response()
        }
        Err(err) => {
            warn!(email = %form.email, error = %err, "Dashboard login failed");
            let flash = Flash::error(err.user_message());
            (status_for(&err), layout::login_page(&flash, &form.email)).into_response()
        }
    }
}

/// GET /logout
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(id) = jar
        .get(state.cookie_name())
        .and_then(|c| Uuid::parse_str(c.value()).ok())
    {
        if state.sessions.remove(&id) {
            info!(session_id = %id, "Dashboard logout");
        }
    }
    let jar = jar.remove(removal_cookie(state.cookie_name()));
    (jar, redirect_msg("/login", "You have been logged out.")).into_response()
}
