//! Session monitoring: details, statistics, the check-in table and review
//! of flagged check-ins.

use std::fmt::Write;

use axum::Form;
use axum::extract::{Path, Query};
use axum::response::{Html, IntoResponse, Response};
use tracing::info;

use saiv_client::api::sessions::SessionQuery as SessionFilter;
use saiv_core::AppResult;
use saiv_core::format::{format_boolean, format_distance, format_percentage, format_risk_score, format_timestamp};
use saiv_entity::checkin::{CheckIn, CheckInStatus, ReviewDecision};
use saiv_entity::session::Session;
use saiv_entity::stats::SessionStats;

use super::LIST_LIMIT;
use crate::dto::forms::ReviewForm;
use crate::dto::query::SessionsQuery;
use crate::extractors::{CurrentSession, Flash, redirect_err, redirect_msg};
use crate::render::charts::{self, Datum, PRIMARY};
use crate::render::components::{
    alert, error_panel, link_button, metric_row, section, select, session_status_badge, AlertKind,
};
use crate::render::escape;
use crate::render::html::url_encode;
use crate::render::layout;
use crate::render::views::{checkin_table, review_card, selector_form, session_options};

fn details(session: &Session) -> String {
    let mut out = String::from("<dl class=\"details\">");
    let rows = [
        ("Course", escape(session.course_code.as_deref().unwrap_or(saiv_core::format::NOT_AVAILABLE))),
        ("Name", escape(&session.name)),
        ("Type", escape(session.session_type.as_str())),
        ("Status", session_status_badge(session.status)),
        ("Start", escape(&format_timestamp(session.scheduled_start.as_ref()))),
        ("End", escape(&format_timestamp(session.scheduled_end.as_ref()))),
        ("Check-in Opens", escape(&format_timestamp(session.checkin_opens_at.as_ref()))),
        ("Check-in Closes", escape(&format_timestamp(session.checkin_closes_at.as_ref()))),
        ("Venue", escape(session.venue_name.as_deref().unwrap_or(saiv_core::format::NOT_AVAILABLE))),
        ("Geofence", escape(&format_distance(session.geofence_radius_meters))),
        ("Liveness Required", escape(&format_boolean(Some(session.require_liveness_check)))),
        ("Face Match Required", escape(&format_boolean(Some(session.require_face_match)))),
    ];
    for (label, value) in rows {
        let _ = write!(out, "<dt>{label}</dt><dd>{value}</dd>");
    }
    out.push_str("</dl>");
    out
}

fn stats_panel(stats: &SessionStats, checkins: &AppResult<Vec<CheckIn>>) -> String {
    let mut out = metric_row(&[
        ("Enrolled", stats.total_enrolled.to_string()),
        ("Checked In", stats.checked_in.to_string()),
        ("Attendance", format_percentage(Some(stats.attendance_percent()), 1)),
        ("Avg Risk", format_risk_score(Some(stats.average_risk_score))),
    ]);
    let status: Vec<Datum> = stats
        .by_status
        .iter()
        .map(|(label, count)| {
            let color = match label.as_str() {
                "approved" => "#2ca02c",
                "pending" => "#ffbf00",
                "rejected" => "#d62728",
                "appealed" => "#9467bd",
                _ => "#ff7f0e",
            };
            Datum::new(label.clone(), *count as f64, color)
        })
        .collect();
    let risk = &stats.risk_distribution;
    let risk_bars = if risk.total() == 0 {
        Vec::new()
    } else {
        vec![
            Datum::new("Low", risk.low as f64, "green"),
            Datum::new("Medium", risk.medium as f64, "orange"),
            Datum::new("High", risk.high as f64, "red"),
        ]
    };
    let timeline: Vec<(String, f64)> = stats
        .checkin_timeline
        .iter()
        .map(|p| (format!("{}m", p.minute), p.count as f64))
        .collect();
    let scores: Vec<f64> = checkins
        .as_ref()
        .map(|list| list.iter().filter_map(|c| c.risk_score).collect())
        .unwrap_or_default();

    out.push_str(&charts::pie_chart("Check-in Status", &status));
    out.push_str(&charts::bar_chart("Risk Distribution", &risk_bars));
    out.push_str(&charts::line_chart("Check-in Timeline (minutes from start)", &timeline, PRIMARY));
    out.push_str(&charts::histogram("Risk Score Histogram", &scores, 10, 0.0, 1.0, PRIMARY));
    out
}

fn filter_form(session_id: &str, query: &SessionsQuery) -> String {
    let mut options = vec![("all".to_string(), "All".to_string())];
    options.extend(
        CheckInStatus::FILTERABLE
            .iter()
            .map(|s| (s.as_str().to_string(), s.as_str().to_string())),
    );
    format!(
        r#"<form method="get" action="/sessions" class="filters"><input type="hidden" name="session_id" value="{}"><label>Status {}</label><label>Search <input type="text" name="search" value="{}" placeholder="Name or email"></label><button type="submit" class="btn">Filter</button></form>"#,
        escape(session_id),
        select("status", &options, Some(query.status_filter().unwrap_or("all"))),
        escape(query.search_term().unwrap_or(""))
    )
}

/// Applies the status filter and search term.
pub fn filter_checkins<'a>(checkins: &'a [CheckIn], query: &SessionsQuery) -> Vec<&'a CheckIn> {
    let status = query
        .status_filter()
        .and_then(|s| s.parse::<CheckInStatus>().ok());
    checkins
        .iter()
        .filter(|c| status.is_none_or(|s| c.status == s))
        .filter(|c| query.search_term().is_none_or(|term| c.matches_search(term)))
        .collect()
}

fn export_links(session_id: &str) -> String {
    ["csv", "json"]
        .iter()
        .map(|format| {
            link_button(
                &format!("Export {}", format.to_uppercase()),
                &format!(
                    "/reports/session/{}/download?format={format}",
                    url_encode(session_id)
                ),
            )
        })
        .collect()
}

/// GET /sessions
pub async fn sessions(
    current: CurrentSession,
    Query(flash): Query<Flash>,
    Query(query): Query<SessionsQuery>,
) -> Result<Html<String>, Response> {
    let client = current.client();
    let sessions = match current.check(client.list_sessions(&SessionFilter::limit(LIST_LIMIT)).await)? {
        Ok(sessions) => sessions,
        Err(err) => {
            return Ok(layout::page("Session Monitor", "/sessions", current.user(), &flash, &error_panel(&err)));
        }
    };
    if sessions.is_empty() {
        let body = alert(AlertKind::Info, "No sessions yet. Create one on the Manage page.");
        return Ok(layout::page("Session Monitor", "/sessions", current.user(), &flash, &body));
    }

    let session = query
        .selected()
        .and_then(|id| sessions.iter().find(|s| s.id == id))
        .unwrap_or(&sessions[0]);
    let stats = current.check(client.session_stats(&session.id).await)?;
    let checkins = current.check(client.session_checkins(&session.id).await)?;
    let flagged = current.check(client.flagged_checkins(LIST_LIMIT).await)?;

    let mut body = selector_form(
        "/sessions",
        "Session",
        "session_id",
        &session_options(&sessions),
        Some(&session.id),
        &[],
    );
    body.push_str(&section("Session Details", &details(session)));
    body.push_str(&section(
        "Session Statistics",
        &match &stats {
            Ok(stats) => stats_panel(stats, &checkins),
            Err(err) => error_panel(err),
        },
    ));

    let checkin_body = match &checkins {
        Ok(list) => {
            let shown = filter_checkins(list, &query);
            let owned: Vec<CheckIn> = shown.into_iter().cloned().collect();
            format!(
                "{}<p>Showing {} of {} check-ins</p>{}",
                filter_form(&session.id, &query),
                owned.len(),
                list.len(),
                checkin_table(&owned)
            )
        }
        Err(err) => error_panel(err),
    };
    body.push_str(&section("Check-ins", &checkin_body));

    let return_to = format!("/sessions?session_id={}", url_encode(&session.id));
    let flagged_body = match &flagged {
        Ok(list) => {
            let cards: String = list
                .iter()
                .filter(|c| c.is_for_session(&session.id))
                .map(|c| review_card(c, &return_to))
                .collect();
            if cards.is_empty() {
                alert(AlertKind::Success, "No flagged check-ins for this session.")
            } else {
                cards
            }
        }
        Err(err) => error_panel(err),
    };
    body.push_str(&section("Flagged Check-ins", &flagged_body));
    body.push_str(&section("Export", &export_links(&session.id)));

    Ok(layout::page("Session Monitor", "/sessions", current.user(), &flash, &body))
}

/// POST /checkins/{id}/review
pub async fn review_checkin(
    current: CurrentSession,
    Path(checkin_id): Path<String>,
    Form(form): Form<ReviewForm>,
) -> Response {
    let back = form.return_path().to_string();
    let decision = match form.decision.parse::<ReviewDecision>() {
        Ok(decision) => decision,
        Err(err) => return redirect_err(&back, &err.message).into_response(),
    };
    let result = current
        .client()
        .review_checkin(&checkin_id, decision, form.notes.trim())
        .await;
    match current.check(result) {
        Err(expired) => expired,
        Ok(Ok(())) => {
            info!(checkin_id = %checkin_id, decision = %decision.as_str(), "Check-in reviewed");
            let message = match decision {
                ReviewDecision::Approved => "Check-in approved",
                ReviewDecision::Rejected => "Check-in rejected",
            };
            redirect_msg(&back, message).into_response()
        }
        Ok(Err(err)) => redirect_err(&back, &err.user_message()).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_checkins() {
        let checkins: Vec<CheckIn> = serde_json::from_value(json!([
            {"id": "1", "student_name": "Ann Lee", "status": "approved"},
            {"id": "2", "student_name": "Bob Tan", "student_email": "bob@uni.edu", "status": "flagged"},
            {"id": "3", "student_name": "Ann Wong", "status": "flagged"}
        ]))
        .unwrap();

        let all = SessionsQuery::default();
        assert_eq!(filter_checkins(&checkins, &all).len(), 3);

        let flagged = SessionsQuery { status: Some("flagged".into()), ..SessionsQuery::default() };
        assert_eq!(filter_checkins(&checkins, &flagged).len(), 2);

        let ann_flagged = SessionsQuery {
            status: Some("flagged".into()),
            search: Some("ann".into()),
            ..SessionsQuery::default()
        };
        let hits = filter_checkins(&checkins, &ann_flagged);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "3");
    }
}
