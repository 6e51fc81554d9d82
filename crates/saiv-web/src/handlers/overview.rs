//! System overview: key metrics, activity charts and flagged check-ins.

use axum::extract::{Query, State};
use axum::response::{Html, Response};
use chrono::{Datelike, Timelike};

use saiv_core::AppResult;
use saiv_core::format::{format_percentage, format_relative};
use saiv_entity::checkin::CheckIn;
use saiv_entity::stats::{HealthIndicator, OverviewStats};

use crate::dto::query::DaysQuery;
use crate::extractors::{CurrentSession, Flash};
use crate::render::charts::{self, Datum, PRIMARY};
use crate::render::components::{alert, empty_state, error_panel, metric_row, section, AlertKind};
use crate::render::escape;
use crate::render::layout;
use crate::render::views::{review_card, selector_form};
use crate::state::AppState;

/// Window choices offered by the selector.
pub const DAY_CHOICES: [u32; 4] = [7, 14, 30, 90];

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

fn status_color(label: &str) -> &'static str {
    match label {
        "Approved" => "#2ca02c",
        "Pending" => "#ffbf00",
        "Rejected" => "#d62728",
        _ => "#ff7f0e",
    }
}

fn risk_color(label: &str) -> &'static str {
    match label {
        "Low" => "green",
        "Medium" => "orange",
        _ => "red",
    }
}

/// Weekday × hour counts of check-in timestamps.
pub fn activity_matrix(checkins: &[CheckIn]) -> Vec<Vec<f64>> {
    let mut cells = vec![vec![0.0; 24]; 7];
    for at in checkins.iter().filter_map(|c| c.checked_in_at) {
        cells[at.weekday().num_days_from_monday() as usize][at.hour() as usize] += 1.0;
    }
    cells
}

fn metrics(stats: &OverviewStats) -> String {
    metric_row(&[
        ("Total Sessions", stats.total_sessions.to_string()),
        ("Active Sessions", stats.active_sessions.to_string()),
        ("Total Check-ins", stats.total_checkins.to_string()),
        ("Check-ins Today", stats.total_checkins_today.to_string()),
        ("Total Students", stats.total_students.to_string()),
        ("Total Courses", stats.total_courses.to_string()),
        ("Approval Rate", format_percentage(Some(stats.approval_rate), 1)),
        (
            "Avg Attendance",
            format_percentage(Some(stats.average_attendance_rate), 1),
        ),
    ])
}

fn charts(stats: &OverviewStats) -> String {
    let daily: Vec<(String, f64)> = stats
        .daily_trends
        .iter()
        .map(|d| (d.date.format("%m-%d").to_string(), d.checkins as f64))
        .collect();
    let status: Vec<Datum> = stats
        .status_breakdown()
        .into_iter()
        .map(|(label, count)| Datum::new(label, count as f64, status_color(label)))
        .collect();
    let risk: Vec<Datum> = stats
        .risk_breakdown()
        .into_iter()
        .map(|(label, count)| Datum::new(label, count as f64, risk_color(label)))
        .collect();
    let rows: Vec<String> = WEEKDAYS.iter().map(|d| d.to_string()).collect();
    let hours: Vec<String> = (0..24).map(|h| h.to_string()).collect();

    [
        charts::line_chart("Daily Check-ins", &daily, PRIMARY),
        charts::pie_chart("Check-in Status", &status),
        charts::pie_chart("Risk Distribution", &risk),
        charts::heatmap(
            "Check-in Activity (weekday x hour)",
            &rows,
            &hours,
            &activity_matrix(&stats.recent_checkins),
        ),
    ]
    .concat()
}

fn recent_activity(stats: &OverviewStats) -> String {
    if stats.recent_checkins.is_empty() {
        return empty_state();
    }
    let items: String = stats
        .recent_checkins
        .iter()
        .take(10)
        .map(|c| {
            format!(
                "<li>{} checked in to {} ({}) {}</li>",
                escape(c.student_label()),
                escape(c.session_name.as_deref().unwrap_or("a session")),
                escape(c.status.as_str()),
                escape(&format_relative(c.checked_in_at.as_ref()))
            )
        })
        .collect();
    format!("<ul>{items}</ul>")
}

fn health(stats: &OverviewStats) -> String {
    HealthIndicator::for_overview(stats)
        .iter()
        .map(|h| {
            let kind = match h.level {
                saiv_entity::stats::HealthLevel::Success => AlertKind::Success,
                saiv_entity::stats::HealthLevel::Info => AlertKind::Info,
                saiv_entity::stats::HealthLevel::Warning => AlertKind::Warning,
            };
            alert(kind, &h.message)
        })
        .collect()
}

fn flagged_panel(flagged: &AppResult<Vec<CheckIn>>) -> String {
    match flagged {
        Ok(list) if list.is_empty() => alert(AlertKind::Success, "No flagged check-ins need review."),
        Ok(list) => list.iter().map(|c| review_card(c, "/overview")).collect(),
        Err(err) => error_panel(err),
    }
}

/// GET /overview
pub async fn overview(
    State(state): State<AppState>,
    current: CurrentSession,
    Query(flash): Query<Flash>,
    Query(query): Query<DaysQuery>,
) -> Result<Html<String>, Response> {
    let days = query.days.unwrap_or(state.config.backend.overview_days);
    let stats = current.check(current.client().overview_stats(days).await)?;
    let flagged = current.check(
        current
            .client()
            .flagged_checkins(state.config.backend.flagged_limit)
            .await,
    )?;

    let options: Vec<(String, String)> = DAY_CHOICES
        .iter()
        .map(|d| (d.to_string(), format!("Last {d} days")))
        .collect();
    let mut body = selector_form("/overview", "Window", "days", &options, Some(&days.to_string()), &[]);

    match &stats {
        Ok(stats) => {
            body.push_str(&section("Key Metrics", &metrics(stats)));
            body.push_str(&section("Activity", &charts(stats)));
            body.push_str(&section("Recent Activity", &recent_activity(stats)));
            body.push_str(&section("System Health", &health(stats)));
        }
        Err(err) => body.push_str(&section("Key Metrics", &error_panel(err))),
    }
    body.push_str(&section("Flagged Check-ins", &flagged_panel(&flagged)));

    Ok(layout::page("System Overview", "/overview", current.user(), &flash, &body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_activity_matrix() {
        let checkins: Vec<CheckIn> = serde_json::from_value(json!([
            {"id": "1", "checked_in_at": "2024-03-04T09:15:00Z"},
            {"id": "2", "checked_in_at": "2024-03-04T09:45:00Z"},
            {"id": "3", "checked_in_at": "2024-03-10T23:00:00Z"},
            {"id": "4"}
        ]))
        .unwrap();
        let cells = activity_matrix(&checkins);
        assert_eq!(cells[0][9], 2.0);
        assert_eq!(cells[6][23], 1.0);
        assert_eq!(cells.iter().flatten().sum::<f64>(), 3.0);
    }
}
