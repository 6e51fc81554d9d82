//! Landing page.

use axum::extract::{Query, State};
use axum::response::{Html, Response};

use saiv_core::format::format_percentage;

use crate::extractors::{CurrentSession, Flash};
use crate::render::components::{error_panel, metric_row, section};
use crate::render::escape;
use crate::render::layout;
use crate::state::AppState;

const QUICK_START: &str = "<ol>\
<li>Create a course on the <a href=\"/manage?tab=course\">Manage</a> page.</li>\
<li>Enroll students in the course.</li>\
<li>Create a session and activate it when check-in should open.</li>\
<li>Watch check-ins arrive on the <a href=\"/sessions\">Sessions</a> page and review flagged ones.</li>\
<li>Close the session and export attendance from <a href=\"/reports\">Reports</a>.</li>\
</ol>";

/// GET /
pub async fn home(
    State(state): State<AppState>,
    current: CurrentSession,
    Query(flash): Query<Flash>,
) -> Result<Html<String>, Response> {
    let days = state.config.backend.overview_days;
    let stats = current.check(current.client().overview_stats(days).await)?;

    let name = current.user().map(|u| u.display_name()).unwrap_or("Instructor");
    let mut body = format!("<p>Welcome, {}.</p>", escape(name));

    let quick = match stats {
        Ok(stats) => metric_row(&[
            ("Total Sessions", stats.total_sessions.to_string()),
            ("Active Sessions", stats.active_sessions.to_string()),
            ("Check-ins Today", stats.total_checkins_today.to_string()),
            (
                "Avg Attendance",
                format_percentage(Some(stats.average_attendance_rate), 1),
            ),
        ]),
        Err(err) => error_panel(&err),
    };
    body.push_str(&section(&format!("Quick Stats (last {days} days)"), &quick));
    body.push_str(&section("Quick Start", QUICK_START));

    Ok(layout::page("Home", "/", current.user(), &flash, &body))
}
