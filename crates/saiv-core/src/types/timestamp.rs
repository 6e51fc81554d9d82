//! Lenient timestamp deserialization.
//!
//! The backend emits RFC 3339 strings, but older records carry naive
//! datetimes without an offset. Naive values are read as UTC. Anything that
//! does not parse becomes `None` instead of failing the whole record.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Parse a backend timestamp string.
pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let normalized = raw.trim_end_matches('Z');
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(normalized, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(normalized, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `#[serde(deserialize_with = "lenient")]` for `Option<DateTime<Utc>>` fields.
pub fn lenient<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => parse(&s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_rfc3339_with_offset() {
        let dt = parse("2024-03-01T10:30:00+02:00").unwrap();
        assert_eq!(dt.hour(), 8);
    }

    #[test]
    fn test_naive_is_utc() {
        let dt = parse("2024-03-01T10:30:00.123456").unwrap();
        assert_eq!(dt.hour(), 10);
        assert_eq!(dt.day(), 1);
        assert!(parse("2024-03-01 10:30:00").is_some());
        assert!(parse("2024-03-01").is_some());
    }

    #[test]
    fn test_garbage_is_none() {
        assert!(parse("not a date").is_none());
        assert!(parse("").is_none());
    }

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "lenient")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_field_fallbacks() {
        let row: Row = serde_json::from_str(r#"{"at": "garbage"}"#).unwrap();
        assert!(row.at.is_none());
        let row: Row = serde_json::from_str(r#"{"at": null}"#).unwrap();
        assert!(row.at.is_none());
        let row: Row = serde_json::from_str("{}").unwrap();
        assert!(row.at.is_none());
        let row: Row = serde_json::from_str(r#"{"at": "2024-01-02T03:04:05Z"}"#).unwrap();
        assert_eq!(row.at.unwrap().year(), 2024);
    }
}
