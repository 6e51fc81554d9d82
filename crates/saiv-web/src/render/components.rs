//! Reusable widgets.

use std::fmt::Write;

use saiv_core::AppError;
use saiv_entity::checkin::{CheckInStatus, RiskLevel};
use saiv_entity::session::SessionStatus;

use super::NO_DATA;
use super::html::escape;

/// Alert severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Info,
    Warning,
    Error,
}

impl AlertKind {
    fn class(self) -> &'static str {
        match self {
            Self::Success => "alert alert-success",
            Self::Info => "alert alert-info",
            Self::Warning => "alert alert-warning",
            Self::Error => "alert alert-error",
        }
    }
}

/// A message box.
pub fn alert(kind: AlertKind, message: &str) -> String {
    format!(r#"<div class="{}">{}</div>"#, kind.class(), escape(message))
}

/// The contextual message for a panel whose backend call failed.
pub fn error_panel(err: &AppError) -> String {
    alert(AlertKind::Error, &err.user_message())
}

/// Placeholder for an empty widget.
pub fn empty_state() -> String {
    format!(r#"<p class="empty">{NO_DATA}</p>"#)
}

fn badge(class: &str, label: &str) -> String {
    format!(r#"<span class="badge {class}">{}</span>"#, escape(label))
}

/// Badge for a session status.
pub fn session_status_badge(status: SessionStatus) -> String {
    let class = match status {
        SessionStatus::Scheduled => "badge-info",
        SessionStatus::Active => "badge-success",
        SessionStatus::Closed => "badge-secondary",
        SessionStatus::Cancelled => "badge-danger",
        SessionStatus::Unknown => return badge("badge-secondary", "❓ Unknown"),
    };
    badge(class, status.label())
}

/// Badge for a check-in status.
pub fn checkin_status_badge(status: CheckInStatus) -> String {
    badge(status.badge_class(), status.as_str())
}

/// Badge for a risk score, or `N/A`.
pub fn risk_badge(score: Option<f64>) -> String {
    match score {
        Some(score) => {
            let level = RiskLevel::from_score(score);
            badge(
                level.badge_class(),
                &format!("{} ({score:.2})", level.as_str()),
            )
        }
        None => badge("badge-secondary", saiv_core::format::NOT_AVAILABLE),
    }
}

/// One metric tile.
pub fn metric(label: &str, value: &str) -> String {
    format!(
        r#"<div class="metric"><div class="metric-label">{}</div><div class="metric-value">{}</div></div>"#,
        escape(label),
        escape(value)
    )
}

/// A row of metric tiles.
pub fn metric_row(tiles: &[(&str, String)]) -> String {
    let mut out = String::from(r#"<div class="metrics">"#);
    for (label, value) in tiles {
        out.push_str(&metric(label, value));
    }
    out.push_str("</div>");
    out
}

/// A table. Header labels are escaped; cells are inserted as-is and must
/// already be escaped HTML.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return empty_state();
    }
    let mut out = String::from(r#"<table class="data"><thead><tr>"#);
    for header in headers {
        let _ = write!(out, "<th>{}</th>", escape(header));
    }
    out.push_str("</tr></thead><tbody>");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            let _ = write!(out, "<td>{cell}</td>");
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    out
}

/// A `<select>` with `(value, label)` options.
pub fn select(name: &str, options: &[(String, String)], selected: Option<&str>) -> String {
    let mut out = format!(r#"<select name="{}">"#, escape(name));
    for (value, label) in options {
        let attr = if selected == Some(value.as_str()) {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            out,
            r#"<option value="{}"{attr}>{}</option>"#,
            escape(value),
            escape(label)
        );
    }
    out.push_str("</select>");
    out
}

/// A hidden form input.
pub fn hidden(name: &str, value: &str) -> String {
    format!(
        r#"<input type="hidden" name="{}" value="{}">"#,
        escape(name),
        escape(value)
    )
}

/// A labelled text-like input.
pub fn input(label: &str, kind: &str, name: &str, value: &str, required: bool) -> String {
    format!(
        r#"<label>{}<input type="{kind}" name="{}" value="{}"{}></label>"#,
        escape(label),
        escape(name),
        escape(value),
        if required { " required" } else { "" }
    )
}

/// A labelled checkbox.
pub fn checkbox(label: &str, name: &str, checked: bool) -> String {
    format!(
        r#"<label class="check"><input type="checkbox" name="{}"{}> {}</label>"#,
        escape(name),
        if checked { " checked" } else { "" },
        escape(label)
    )
}

/// A submit button; a disabled button carries its reason as a tooltip.
pub fn button(label: &str, class: &str, enabled: bool, disabled_reason: Option<&str>) -> String {
    if enabled {
        format!(
            r#"<button type="submit" class="btn {class}">{}</button>"#,
            escape(label)
        )
    } else {
        format!(
            r#"<button type="submit" class="btn {class}" disabled title="{}">{}</button>"#,
            escape(disabled_reason.unwrap_or("")),
            escape(label)
        )
    }
}

/// A link styled as a button.
pub fn link_button(label: &str, href: &str) -> String {
    format!(
        r#"<a class="btn btn-link" href="{}">{}</a>"#,
        escape(href),
        escape(label)
    )
}

/// A titled section.
pub fn section(title: &str, body: &str) -> String {
    format!(
        r#"<section class="panel"><h2>{}</h2>{body}</section>"#,
        escape(title)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_escapes_headers_and_handles_empty() {
        assert_eq!(table(&["Name"], &[]), empty_state());
        let html = table(&["<Name>"], &[vec!["<b>x</b>".to_string()]]);
        assert!(html.contains("<th>&lt;Name&gt;</th>"));
        assert!(html.contains("<td><b>x</b></td>"));
    }

    #[test]
    fn test_risk_badge() {
        assert!(risk_badge(Some(0.75)).contains("HIGH (0.75)"));
        assert!(risk_badge(Some(0.45)).contains("MEDIUM"));
        assert!(risk_badge(Some(0.2)).contains("LOW"));
        assert!(risk_badge(None).contains("N/A"));
    }

    #[test]
    fn test_unknown_session_status_badge() {
        let html = session_status_badge(SessionStatus::Unknown);
        assert!(html.contains("badge-secondary"));
        assert!(html.contains("❓ Unknown"));
        assert!(session_status_badge(SessionStatus::Active).contains("badge-success"));
    }

    #[test]
    fn test_disabled_button_has_reason() {
        let html = button("Activate", "btn-primary", false, Some("Course deleted"));
        assert!(html.contains("disabled"));
        assert!(html.contains(r#"title="Course deleted""#));
        assert!(!button("Close", "btn-warning", true, None).contains("disabled"));
    }

    #[test]
    fn test_select_marks_selected() {
        let options = vec![
            ("a".to_string(), "A".to_string()),
            ("b".to_string(), "B".to_string()),
        ];
        let html = select("x", &options, Some("b"));
        assert!(html.contains(r#"<option value="b" selected>B</option>"#));
        assert!(html.contains(r#"<option value="a">A</option>"#));
    }

    #[test]
    fn test_error_panel_uses_user_message() {
        let html = error_panel(&AppError::from_status(404, None));
        assert!(html.contains("Resource not found."));
        assert!(html.contains("alert-error"));
    }
}
