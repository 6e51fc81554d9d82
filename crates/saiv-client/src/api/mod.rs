//! Authenticated endpoints, grouped by backend resource.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use saiv_core::{AppError, AppResult};

pub mod audit;
pub mod checkins;
pub mod courses;
pub mod enrollments;
pub mod export;
pub mod sessions;
pub mod stats;
pub mod users;

/// Characters left as-is in a path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Encode a record id as exactly one path segment.
///
/// Empty and dot-only ids are refused; URL parsing would drop or resolve them.
pub(crate) fn segment(id: &str) -> AppResult<String> {
    if matches!(id, "" | "." | "..") {
        return Err(AppError::validation(format!("Invalid identifier: '{id}'")));
    }
    Ok(utf8_percent_encode(id, SEGMENT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use saiv_core::error::ErrorKind;

    #[test]
    fn test_segment_encodes_separators() {
        assert_eq!(segment("c1").unwrap(), "c1");
        assert_eq!(segment("3f2a-9b.x").unwrap(), "3f2a-9b.x");
        assert_eq!(segment("../../admin/x").unwrap(), "..%2F..%2Fadmin%2Fx");
        assert_eq!(segment("a?b#c%d").unwrap(), "a%3Fb%23c%25d");
    }

    #[test]
    fn test_segment_refuses_dot_segments() {
        for id in ["", ".", ".."] {
            assert_eq!(segment(id).unwrap_err().kind, ErrorKind::Validation);
        }
    }
}
