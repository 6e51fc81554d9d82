//! Custom Axum extractors.

pub mod flash;
pub mod session;

pub use flash::{Flash, redirect_err, redirect_msg};
pub use session::CurrentSession;
