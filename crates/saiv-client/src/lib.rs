//! # saiv-client
//!
//! Typed client for the SAIV backend REST API.
//!
//! [`BackendClient`] performs the unauthenticated login call and yields a
//! [`ClientSession`], which carries the bearer token and signed-in user and
//! exposes every authenticated endpoint. Failures are classified into
//! [`saiv_core::AppError`] so that callers can render them per panel.

pub mod api;
pub mod client;
pub mod error;
pub mod session;

pub use api::export::{ExportFile, ExportFormat};
pub use client::BackendClient;
pub use session::ClientSession;
