//! User and authentication entities.

pub mod auth;
pub mod model;
pub mod role;

pub use auth::{LoginRequest, LoginResponse};
pub use model::User;
pub use role::UserRole;
