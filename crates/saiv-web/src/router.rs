//! Route definitions for the SAIV dashboard.
//!
//! Pages are plain GET routes; every form posts to its own route and
//! answers with a redirect carrying a flash message.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;

    Router::new()
        .merge(auth_routes())
        .merge(page_routes())
        .merge(report_routes())
        .merge(manage_routes())
        .merge(health_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Login and logout
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/login",
            get(handlers::auth::login_page).post(handlers::auth::login),
        )
        .route("/logout", get(handlers::auth::logout))
}

/// Read-only dashboard pages plus check-in review
fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::home::home))
        .route("/overview", get(handlers::overview::overview))
        .route("/courses", get(handlers::courses::courses))
        .route("/sessions", get(handlers::sessions::sessions))
        .route("/audit", get(handlers::audit::audit))
        .route(
            "/checkins/{id}/review",
            post(handlers::sessions::review_checkin),
        )
}

/// Reports page and export downloads
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/reports", get(handlers::reports::reports))
        .route(
            "/reports/course/{id}/download",
            get(handlers::reports::download_course),
        )
        .route(
            "/reports/session/{id}/download",
            get(handlers::reports::download_session),
        )
}

/// Manage page and its form actions
fn manage_routes() -> Router<AppState> {
    Router::new()
        .route("/manage", get(handlers::manage::manage))
        .route("/manage/courses", post(handlers::manage::create_course))
        .route(
            "/manage/courses/{id}/delete",
            post(handlers::manage::delete_course),
        )
        .route(
            "/manage/courses/{id}/restore",
            post(handlers::manage::restore_course),
        )
        .route("/manage/sessions", post(handlers::manage::create_session))
        .route(
            "/manage/sessions/{id}/status",
            post(handlers::manage::change_status),
        )
        .route(
            "/manage/sessions/{id}/delete",
            post(handlers::manage::delete_session),
        )
        .route("/manage/enrollments", post(handlers::manage::enroll))
        .route(
            "/manage/enrollments/bulk",
            post(handlers::manage::bulk_enroll),
        )
}

/// Liveness probe
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
