//! Convenience result type alias for SAIV.

use crate::error::AppError;

/// A specialized `Result` type for SAIV operations.
pub type AppResult<T> = Result<T, AppError>;
