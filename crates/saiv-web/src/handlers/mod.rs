//! Page and form handlers.
//!
//! Page handlers fetch each panel independently: a failing backend call
//! renders its own message and leaves the other panels intact. A 401 from
//! any call ends the dashboard session (see [`CurrentSession::check`]).
//!
//! [`CurrentSession::check`]: crate::extractors::CurrentSession::check

pub mod audit;
pub mod auth;
pub mod courses;
pub mod health;
pub mod home;
pub mod manage;
pub mod overview;
pub mod reports;
pub mod sessions;

/// Upper bound for selector lists fetched from the backend.
pub const LIST_LIMIT: u32 = 500;
