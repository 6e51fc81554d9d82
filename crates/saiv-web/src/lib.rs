//! # saiv-web
//!
//! Instructor dashboard for SAIV built on Axum.
//!
//! Every page authenticates against the backend through a
//! [`saiv_client::ClientSession`] kept in an in-memory [`SessionStore`]
//! keyed by a cookie, fetches what it needs, and renders HTML with inline
//! SVG charts. Status changes on the Manage page pass through the session
//! lifecycle guard before any request leaves the process.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod render;
pub mod router;
pub mod state;
pub mod store;

pub use app::{build_app, run_server};
pub use state::AppState;
pub use store::SessionStore;
