//! Mapping of transport failures and error bodies into [`AppError`].

use saiv_core::AppError;
use serde_json::Value;

/// Classify a `reqwest` failure that produced no HTTP response.
pub fn from_transport(err: reqwest::Error) -> AppError {
    let message = if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        "backend unreachable".to_string()
    } else {
        err.to_string()
    };
    AppError::with_source(saiv_core::error::ErrorKind::Transport, message, err)
}

/// Pull a human-readable message out of an error body.
///
/// Accepts `{"detail": "..."}`, validation lists of the form
/// `{"detail": [{"msg": "..."}]}`, and `{"error": ...}` / `{"message": ...}`.
pub fn extract_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let object = value.as_object()?;
    for key in ["detail", "error", "message"] {
        match object.get(key) {
            Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(Value::Array(items)) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                if !messages.is_empty() {
                    return Some(messages.join("; "));
                }
            }
            _ => {}
        }
    }
    None
}

/// Build the error for a non-success response.
pub fn from_response(status: u16, body: &[u8]) -> AppError {
    AppError::from_status(status, extract_detail(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use saiv_core::error::ErrorKind;

    #[test]
    fn test_detail_string() {
        assert_eq!(
            extract_detail(br#"{"detail": "Course code already exists"}"#).as_deref(),
            Some("Course code already exists")
        );
    }

    #[test]
    fn test_detail_list() {
        let body = br#"{"detail": [{"loc": ["body", "name"], "msg": "field required"},
                                   {"loc": ["body", "code"], "msg": "too long"}]}"#;
        assert_eq!(extract_detail(body).as_deref(), Some("field required; too long"));
    }

    #[test]
    fn test_error_and_message_keys() {
        assert_eq!(extract_detail(br#"{"error": "bad"}"#).as_deref(), Some("bad"));
        assert_eq!(extract_detail(br#"{"message": "nope"}"#).as_deref(), Some("nope"));
        assert_eq!(extract_detail(b"<html>502</html>"), None);
    }

    #[test]
    fn test_from_response_fallback_message() {
        let err = from_response(503, b"");
        assert_eq!(err.kind, ErrorKind::Upstream);
        assert_eq!(err.message, "Error 503");
    }
}
