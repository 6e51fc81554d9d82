//! Record-specific fragments shared by several pages.

use std::fmt::Write;

use saiv_core::format;
use saiv_entity::checkin::CheckIn;
use saiv_entity::course::Course;
use saiv_entity::session::Session;

use super::components::{button, checkin_status_badge, hidden, risk_badge, select, table};
use super::html::escape;

/// Selector options for courses, labelled `CODE - name`.
pub fn course_options(courses: &[Course]) -> Vec<(String, String)> {
    courses
        .iter()
        .map(|c| (c.id.clone(), c.display_label()))
        .collect()
}

/// Selector options for sessions, labelled `CODE - name (status)`.
pub fn session_options(sessions: &[Session]) -> Vec<(String, String)> {
    sessions
        .iter()
        .map(|s| (s.id.clone(), s.display_label()))
        .collect()
}

/// A GET form that reloads `action` with one selected value.
///
/// `keep` lists extra parameters carried over as hidden inputs.
pub fn selector_form(
    action: &str,
    label: &str,
    name: &str,
    options: &[(String, String)],
    selected: Option<&str>,
    keep: &[(&str, &str)],
) -> String {
    let mut out = format!(
        r#"<form method="get" action="{}" class="selector"><label>{} {}</label>"#,
        escape(action),
        escape(label),
        select(name, options, selected)
    );
    for (key, value) in keep {
        out.push_str(&hidden(key, value));
    }
    out.push_str(r#"<button type="submit" class="btn">Show</button></form>"#);
    out
}

/// Table of check-ins.
pub fn checkin_table(checkins: &[CheckIn]) -> String {
    let rows: Vec<Vec<String>> = checkins
        .iter()
        .map(|c| {
            vec![
                escape(c.student_name.as_deref().unwrap_or(format::NOT_AVAILABLE)),
                escape(c.student_email.as_deref().unwrap_or(format::NOT_AVAILABLE)),
                checkin_status_badge(c.status),
                escape(&format::format_timestamp(c.checked_in_at.as_ref())),
                risk_badge(c.risk_score),
                escape(&format::format_distance(c.distance_from_venue_meters)),
                escape(&format::format_boolean(c.liveness_passed)),
            ]
        })
        .collect();
    table(
        &["Student", "Email", "Status", "Checked In", "Risk", "Distance", "Liveness"],
        &rows,
    )
}

/// Detail card of a flagged check-in with approve/reject forms.
pub fn review_card(checkin: &CheckIn, return_to: &str) -> String {
    let mut out = format!(
        r#"<div class="review-card"><h3>{} - {}</h3><p>{} {} | Risk {} | Distance {}</p>"#,
        escape(checkin.student_label()),
        escape(checkin.session_name.as_deref().unwrap_or(format::NOT_AVAILABLE)),
        checkin_status_badge(checkin.status),
        escape(&format::format_relative(checkin.checked_in_at.as_ref())),
        risk_badge(checkin.risk_score),
        escape(&format::format_distance(checkin.distance_from_venue_meters)),
    );
    if !checkin.flag_reasons.is_empty() {
        let _ = write!(
            out,
            "<p>Flag reasons: {}</p>",
            escape(&format::format_list(&checkin.flag_reasons, 5))
        );
    }
    if !checkin.risk_factors.is_empty() {
        let factors: Vec<String> = checkin
            .risk_factors
            .iter()
            .map(|f| format!("{} ({:.2})", f.kind, f.weight))
            .collect();
        let _ = write!(
            out,
            "<p>Risk factors: {}</p>",
            escape(&format::format_list(&factors, 5))
        );
    }
    if let Some(reason) = checkin.appeal_reason.as_deref() {
        let _ = write!(out, "<p>Appeal: {}</p>", escape(reason));
    }
    if checkin.status.is_reviewable() {
        for (decision, label, class) in [
            ("approve", "Approve", "btn-success"),
            ("reject", "Reject", "btn-danger"),
        ] {
            let _ = write!(
                out,
                r#"<form method="post" action="/checkins/{}/review" class="inline">{}{}<input type="text" name="notes" placeholder="Review notes">{}</form>"#,
                escape(&checkin.id),
                hidden("decision", decision),
                hidden("return_to", return_to),
                button(label, class, true, None)
            );
        }
    }
    out.push_str("</div>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn checkin(status: &str) -> CheckIn {
        serde_json::from_value(json!({
            "id": "k1",
            "student_name": "Ann <Lee>",
            "student_email": "ann@uni.edu",
            "status": status,
            "risk_score": 0.8,
            "flag_reasons": ["far from venue"],
        }))
        .unwrap()
    }

    #[test]
    fn test_checkin_table_row() {
        let html = checkin_table(&[checkin("approved")]);
        assert!(html.contains("Ann &lt;Lee&gt;"));
        assert!(html.contains("HIGH (0.80)"));
        assert!(html.contains("N/A"));
    }

    #[test]
    fn test_review_card_forms_only_when_reviewable() {
        let html = review_card(&checkin("flagged"), "/sessions?session_id=s1");
        assert!(html.contains(r#"action="/checkins/k1/review""#));
        assert!(html.contains(r#"value="approve""#));
        assert!(html.contains("far from venue"));

        let html = review_card(&checkin("approved"), "/sessions");
        assert!(!html.contains("<form"));
    }

    #[test]
    fn test_selector_form_keeps_params() {
        let options = vec![("c1".to_string(), "CS101 - Intro".to_string())];
        let html = selector_form("/manage", "Course", "course_id", &options, Some("c1"), &[("tab", "status")]);
        assert!(html.contains(r#"name="tab" value="status""#));
        assert!(html.contains("selected"));
    }
}
