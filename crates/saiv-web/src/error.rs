//! Maps `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use saiv_core::error::{AppError, ErrorKind};

/// Standard JSON error body for the non-HTML surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// `AppError` rendered as a JSON response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// HTTP status the dashboard answers with for an error.
pub fn status_for(err: &AppError) -> StatusCode {
    match err.kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
        ErrorKind::Authorization => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Transport | ErrorKind::Upstream | ErrorKind::Serialization => {
            StatusCode::BAD_GATEWAY
        }
        ErrorKind::Configuration | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            tracing::error!(kind = %self.0.kind, error = %self.0.message, "Request failed");
        }
        let body = ApiErrorResponse {
            error: self.0.kind.to_string(),
            message: self.0.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&AppError::from_status(401, None)), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(&AppError::validation("bad")), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&AppError::transport("down")), StatusCode::BAD_GATEWAY);
        assert_eq!(status_for(&AppError::from_status(503, None)), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status_for(&AppError::internal("oops")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
