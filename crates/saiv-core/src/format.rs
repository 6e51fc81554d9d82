//! Display formatting helpers.
//!
//! Every function here is total: missing input renders as `"N/A"` and
//! unparseable timestamps fall back to the raw string.

use chrono::{DateTime, Utc};

use crate::types::timestamp;

/// Placeholder for absent values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Default full datetime pattern.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Date-only pattern.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Time-only pattern.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Format a backend timestamp string with `pattern`.
pub fn format_datetime_str(raw: Option<&str>, pattern: &str) -> String {
    match raw {
        None | Some("") => NOT_AVAILABLE.to_string(),
        Some(s) => match timestamp::parse(s) {
            Some(dt) => dt.format(pattern).to_string(),
            None => s.to_string(),
        },
    }
}

/// Format a parsed timestamp with `pattern`.
pub fn format_datetime(dt: Option<&DateTime<Utc>>, pattern: &str) -> String {
    dt.map(|d| d.format(pattern).to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// `YYYY-MM-DD HH:MM:SS`
pub fn format_timestamp(dt: Option<&DateTime<Utc>>) -> String {
    format_datetime(dt, DATETIME_FORMAT)
}

/// `YYYY-MM-DD`
pub fn format_date(dt: Option<&DateTime<Utc>>) -> String {
    format_datetime(dt, DATE_FORMAT)
}

/// `HH:MM:SS`
pub fn format_time(dt: Option<&DateTime<Utc>>) -> String {
    format_datetime(dt, TIME_FORMAT)
}

/// Relative time such as `"2 hours ago"`, measured against now.
pub fn format_relative(dt: Option<&DateTime<Utc>>) -> String {
    format_relative_at(dt, Utc::now())
}

/// Relative time measured against an explicit `now`.
pub fn format_relative_at(dt: Option<&DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(dt) = dt else {
        return NOT_AVAILABLE.to_string();
    };
    let seconds = (now - *dt).num_seconds();
    if seconds < 60 {
        return "Just now".to_string();
    }
    let (n, unit) = if seconds < 3_600 {
        (seconds / 60, "minute")
    } else if seconds < 86_400 {
        (seconds / 3_600, "hour")
    } else {
        (seconds / 86_400, "day")
    };
    format!("{n} {unit}{} ago", if n == 1 { "" } else { "s" })
}

/// `85.5` -> `"85.5%"`.
pub fn format_percentage(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}%"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Metres below one kilometre, kilometres with two decimals above.
pub fn format_distance(meters: Option<f64>) -> String {
    match meters {
        None => NOT_AVAILABLE.to_string(),
        Some(m) if m < 1000.0 => format!("{m:.0}m"),
        Some(m) => format!("{:.2}km", m / 1000.0),
    }
}

/// Risk score with two decimals.
pub fn format_risk_score(score: Option<f64>) -> String {
    match score {
        Some(s) => format!("{s:.2}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// `45s`, `2m 5s`, `1h 2m`.
pub fn format_duration(seconds: Option<u64>) -> String {
    match seconds {
        None => NOT_AVAILABLE.to_string(),
        Some(s) if s < 60 => format!("{s}s"),
        Some(s) if s < 3_600 => format!("{}m {}s", s / 60, s % 60),
        Some(s) => format!("{}h {}m", s / 3_600, (s % 3_600) / 60),
    }
}

/// Number with thousands separators; `decimals == 0` truncates.
pub fn format_number(value: Option<f64>, decimals: usize) -> String {
    let Some(v) = value else {
        return NOT_AVAILABLE.to_string();
    };
    let raw = if decimals == 0 {
        format!("{}", v.trunc() as i64)
    } else {
        format!("{v:.decimals$}")
    };
    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Truncate to `max_len` characters including the trailing `"..."`.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    const SUFFIX: &str = "...";
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let keep = max_len.saturating_sub(SUFFIX.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(SUFFIX);
    out
}

/// Human-readable byte count.
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    match bytes {
        b if b < KB => format!("{b} B"),
        b if b < MB => format!("{:.1} KB", b as f64 / KB as f64),
        b if b < GB => format!("{:.1} MB", b as f64 / MB as f64),
        b => format!("{:.1} GB", b as f64 / GB as f64),
    }
}

/// `Yes` / `No` / `N/A`.
pub fn format_boolean(value: Option<bool>) -> String {
    match value {
        Some(true) => "Yes".to_string(),
        Some(false) => "No".to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Join at most `max_items` entries, summarising the rest.
pub fn format_list<T: std::fmt::Display>(items: &[T], max_items: usize) -> String {
    if items.is_empty() {
        return "None".to_string();
    }
    let shown = items
        .iter()
        .take(max_items)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    if items.len() <= max_items {
        shown
    } else {
        format!("{shown} and {} more", items.len() - max_items)
    }
}

/// Icon for a check-in or session status; empty for unknown statuses.
pub fn status_icon(status: &str) -> &'static str {
    match status.to_ascii_lowercase().as_str() {
        "approved" => "✅",
        "pending" | "in_progress" => "⏳",
        "rejected" => "❌",
        "flagged" => "🚩",
        "active" => "🟢",
        "inactive" => "⚪",
        "completed" => "✓",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_datetime_strings() {
        let raw = Some("2024-01-15T10:30:00");
        assert_eq!(format_datetime_str(raw, DATETIME_FORMAT), "2024-01-15 10:30:00");
        assert_eq!(format_datetime_str(raw, DATE_FORMAT), "2024-01-15");
        assert_eq!(format_datetime_str(raw, TIME_FORMAT), "10:30:00");
        assert_eq!(format_datetime_str(None, DATE_FORMAT), "N/A");
        assert_eq!(format_datetime_str(Some("not-a-date"), DATE_FORMAT), "not-a-date");
    }

    #[test]
    fn test_relative() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let ago = |secs: i64| now - Duration::seconds(secs);
        assert_eq!(format_relative_at(Some(&ago(30)), now), "Just now");
        assert_eq!(format_relative_at(Some(&ago(60)), now), "1 minute ago");
        assert_eq!(format_relative_at(Some(&ago(120)), now), "2 minutes ago");
        assert_eq!(format_relative_at(Some(&ago(7_200)), now), "2 hours ago");
        assert_eq!(format_relative_at(Some(&ago(172_800)), now), "2 days ago");
        assert_eq!(format_relative_at(None, now), "N/A");
    }

    #[test]
    fn test_percentages_and_scores() {
        assert_eq!(format_percentage(Some(85.5), 1), "85.5%");
        assert_eq!(format_percentage(Some(85.0), 0), "85%");
        assert_eq!(format_percentage(None, 1), "N/A");
        assert_eq!(format_risk_score(Some(0.45)), "0.45");
        assert_eq!(format_risk_score(None), "N/A");
    }

    #[test]
    fn test_distance() {
        assert_eq!(format_distance(Some(500.0)), "500m");
        assert_eq!(format_distance(Some(1500.0)), "1.50km");
        assert_eq!(format_distance(None), "N/A");
    }

    #[test]
    fn test_duration() {
        assert_eq!(format_duration(Some(45)), "45s");
        assert_eq!(format_duration(Some(125)), "2m 5s");
        assert_eq!(format_duration(Some(3_725)), "1h 2m");
    }

    #[test]
    fn test_number() {
        assert_eq!(format_number(Some(1_234_567.0), 0), "1,234,567");
        assert_eq!(format_number(Some(1_234.56), 2), "1,234.56");
        assert_eq!(format_number(Some(999.0), 0), "999");
        assert_eq!(format_number(Some(-1_000.0), 0), "-1,000");
        assert_eq!(format_number(None, 0), "N/A");
    }

    #[test]
    fn test_truncate() {
        let out = truncate_text("This is a very long text that needs to be truncated", 20);
        assert_eq!(out.chars().count(), 20);
        assert!(out.ends_with("..."));
        assert_eq!(truncate_text("Short text", 50), "Short text");
    }

    #[test]
    fn test_file_size() {
        assert_eq!(format_file_size(500), "500 B");
        assert_eq!(format_file_size(1_536), "1.5 KB");
        assert_eq!(format_file_size(1_572_864), "1.5 MB");
    }

    #[test]
    fn test_boolean_and_list() {
        assert_eq!(format_boolean(Some(true)), "Yes");
        assert_eq!(format_boolean(Some(false)), "No");
        assert_eq!(format_boolean(None), "N/A");
        assert_eq!(format_list(&["item1", "item2", "item3"], 5), "item1, item2, item3");
        assert!(format_list(&["a", "b", "c", "d", "e", "f", "g"], 5).ends_with("and 2 more"));
        assert_eq!(format_list::<&str>(&[], 5), "None");
    }

    #[test]
    fn test_status_icons() {
        assert_eq!(status_icon("approved"), "✅");
        assert_eq!(status_icon("PENDING"), "⏳");
        assert_eq!(status_icon("rejected"), "❌");
        assert_eq!(status_icon("flagged"), "🚩");
        assert_eq!(status_icon("mystery"), "");
    }
}
