//! One-shot status messages carried across redirects in the query string.

use axum::response::Redirect;
use serde::Deserialize;

use crate::render::html::url_encode;

/// `?msg=` / `?err=` parameters shown once at the top of a page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Flash {
    /// Success message.
    #[serde(default)]
    pub msg: Option<String>,
    /// Error message.
    #[serde(default)]
    pub err: Option<String>,
}

impl Flash {
    /// Flash with only an error.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            msg: None,
            err: Some(message.into()),
        }
    }
}

fn redirect_with(path: &str, key: &str, message: &str) -> Redirect {
    let separator = if path.contains('?') { '&' } else { '?' };
    Redirect::to(&format!("{path}{separator}{key}={}", url_encode(message)))
}

/// Redirects to `path` with a success message.
pub fn redirect_msg(path: &str, message: &str) -> Redirect {
    redirect_with(path, "msg", message)
}

/// Redirects to `path` with an error message.
pub fn redirect_err(path: &str, message: &str) -> Redirect {
    redirect_with(path, "err", message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::LOCATION;
    use axum::response::IntoResponse;

    fn location(redirect: Redirect) -> String {
        redirect
            .into_response()
            .headers()
            .get(LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_redirect_targets() {
        assert_eq!(
            location(redirect_msg("/manage?tab=status", "Session activated")),
            "/manage?tab=status&msg=Session+activated"
        );
        assert_eq!(location(redirect_err("/login", "no")), "/login?err=no");
    }
}
