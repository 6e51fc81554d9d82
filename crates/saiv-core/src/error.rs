//! Unified application error types for SAIV.
//!
//! Every failure the dashboard can surface (a backend call that did not
//! succeed, a local validation rejection, a configuration problem) is mapped
//! into [`AppError`] so that it propagates through the `?` operator and can
//! be rendered as a contextual inline message.

use std::fmt;
use thiserror::Error;

/// Message shown when the backend answers 401.
pub const MSG_AUTHENTICATION: &str = "Authentication failed. Please login again.";
/// Message shown when the backend answers 403.
pub const MSG_AUTHORIZATION: &str = "Access denied. Insufficient permissions.";
/// Message shown when the backend answers 404.
pub const MSG_NOT_FOUND: &str = "Resource not found.";

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The backend could not be reached (connection refused, DNS, timeout).
    Transport,
    /// The bearer token is missing, invalid, or expired (HTTP 401).
    Authentication,
    /// The caller's role is not allowed to perform the action (HTTP 403).
    Authorization,
    /// The requested resource does not exist (HTTP 404).
    NotFound,
    /// The request body was malformed or the action is illegal (HTTP 400/422).
    Validation,
    /// The backend reported a conflicting state (HTTP 409).
    Conflict,
    /// The backend failed while handling the request (HTTP 5xx).
    Upstream,
    /// A response body could not be decoded.
    Serialization,
    /// A configuration error occurred.
    Configuration,
    /// An unexpected local error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => write!(f, "TRANSPORT"),
            Self::Authentication => write!(f, "AUTHENTICATION"),
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Upstream => write!(f, "UPSTREAM"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout SAIV.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message (the backend `detail` when one was sent).
    pub message: String,
    /// HTTP status returned by the backend, if the error came from a response.
    pub status: Option<u16>,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            source: Some(Box::new(source)),
        }
    }

    /// Classify a non-success HTTP status returned by the backend.
    ///
    /// `detail` is the message extracted from the response body, if any.
    pub fn from_status(status: u16, detail: Option<String>) -> Self {
        let kind = match status {
            401 => ErrorKind::Authentication,
            403 => ErrorKind::Authorization,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            400..=499 => ErrorKind::Validation,
            _ => ErrorKind::Upstream,
        };
        let message = detail.unwrap_or_else(|| format!("Error {status}"));
        Self {
            kind,
            message,
            status: Some(status),
            source: None,
        }
    }

    /// Create a transport (connection/timeout) error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Create an authorization error.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an upstream (backend 5xx) error.
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Upstream, message)
    }

    /// Create a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether the error means the stored token must be discarded.
    pub fn is_session_expired(&self) -> bool {
        self.kind == ErrorKind::Authentication
    }

    /// The contextual message displayed next to the affected panel.
    ///
    /// Authentication, authorization and not-found failures use fixed texts;
    /// validation and server failures show the backend's own detail string.
    pub fn user_message(&self) -> String {
        match self.kind {
            ErrorKind::Authentication => MSG_AUTHENTICATION.to_string(),
            ErrorKind::Authorization if self.status.is_some() => MSG_AUTHORIZATION.to_string(),
            ErrorKind::NotFound if self.status.is_some() => MSG_NOT_FOUND.to_string(),
            ErrorKind::Transport => format!("Connection error: {}", self.message),
            _ => self.message.clone(),
        }
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            status: self.status,
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(AppError::from_status(401, None).kind, ErrorKind::Authentication);
        assert_eq!(AppError::from_status(403, None).kind, ErrorKind::Authorization);
        assert_eq!(AppError::from_status(404, None).kind, ErrorKind::NotFound);
        assert_eq!(AppError::from_status(409, None).kind, ErrorKind::Conflict);
        assert_eq!(AppError::from_status(422, None).kind, ErrorKind::Validation);
        assert_eq!(AppError::from_status(400, None).kind, ErrorKind::Validation);
        assert_eq!(AppError::from_status(502, None).kind, ErrorKind::Upstream);
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            AppError::from_status(401, Some("Token expired".into())).user_message(),
            "Authentication failed. Please login again."
        );
        assert_eq!(
            AppError::from_status(403, None).user_message(),
            "Access denied. Insufficient permissions."
        );
        assert_eq!(
            AppError::from_status(404, None).user_message(),
            "Resource not found."
        );
        assert_eq!(
            AppError::from_status(400, Some("Course code already exists".into())).user_message(),
            "Course code already exists"
        );
        assert!(AppError::from_status(500, None).user_message().contains("500"));
    }

    #[test]
    fn test_local_authorization_keeps_message() {
        let err = AppError::authorization("Only instructors may sign in");
        assert_eq!(err.user_message(), "Only instructors may sign in");
        assert!(!err.is_session_expired());
    }

    #[test]
    fn test_transport_message() {
        let err = AppError::transport("operation timed out");
        assert_eq!(err.user_message(), "Connection error: operation timed out");
    }
}
