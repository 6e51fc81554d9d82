//! Course analytics: metrics, trends, per-session attendance and the
//! student roster.

use axum::extract::Query;
use axum::response::{Html, Response};

use saiv_client::api::courses::CourseQuery as CourseFilter;
use saiv_core::format::{format_date, format_percentage, format_timestamp};
use saiv_entity::course::Course;
use saiv_entity::enrollment::CourseEnrollments;
use saiv_entity::stats::CourseStats;

use super::LIST_LIMIT;
use crate::dto::query::CourseQuery;
use crate::extractors::{CurrentSession, Flash};
use crate::render::charts::{self, PRIMARY, SECONDARY, Series};
use crate::render::components::{
    alert, error_panel, link_button, metric_row, section, table, AlertKind,
};
use crate::render::escape;
use crate::render::html::url_encode;
use crate::render::layout;
use crate::render::views::{course_options, selector_form};

fn metrics(stats: &CourseStats) -> String {
    metric_row(&[
        ("Total Students", stats.total_students.to_string()),
        ("Total Sessions", stats.total_sessions.to_string()),
        ("Total Check-ins", stats.total_checkins.to_string()),
        (
            "Avg Attendance",
            format_percentage(Some(stats.average_attendance_rate), 1),
        ),
        ("Completed Sessions", stats.completed_sessions.to_string()),
        ("Upcoming Sessions", stats.upcoming_sessions.to_string()),
        ("Low Attendance", stats.students_low_attendance.to_string()),
        ("Perfect Attendance", stats.students_perfect_attendance.to_string()),
    ])
}

fn trend_charts(stats: &CourseStats) -> String {
    let trend: Vec<(String, f64)> = stats
        .session_trends
        .iter()
        .map(|t| (t.date.format("%m-%d").to_string(), t.attendance_rate))
        .collect();
    let labels: Vec<String> = stats.sessions.iter().map(|s| s.name.clone()).collect();
    let series = vec![
        Series {
            name: "Expected".to_string(),
            color: PRIMARY,
            values: vec![stats.total_students as f64; labels.len()],
        },
        Series {
            name: "Actual".to_string(),
            color: SECONDARY,
            values: stats.sessions.iter().map(|s| s.checked_in as f64).collect(),
        },
    ];
    let mut out = charts::line_chart("Attendance Trend (%)", &trend, PRIMARY);
    out.push_str(&charts::grouped_bar_chart("Expected vs Actual Attendance", &labels, &series));
    out
}

fn session_table(stats: &CourseStats) -> String {
    let rows: Vec<Vec<String>> = stats
        .sessions
        .iter()
        .map(|s| {
            vec![
                escape(&s.name),
                escape(s.date.as_deref().unwrap_or(saiv_core::format::NOT_AVAILABLE)),
                s.checked_in.to_string(),
                escape(&format_percentage(Some(s.attendance_rate), 1)),
            ]
        })
        .collect();
    table(&["Session", "Date", "Checked In", "Attendance"], &rows)
}

/// Roster table with low-attendance students highlighted.
pub fn roster_table(enrollments: &CourseEnrollments) -> String {
    let rows: Vec<Vec<String>> = enrollments
        .students
        .iter()
        .map(|s| {
            let rate = format_percentage(Some(s.attendance_rate), 1);
            let rate = if s.is_low_attendance() {
                format!(r#"<span class="badge badge-danger">{}</span>"#, escape(&rate))
            } else {
                escape(&rate)
            };
            vec![
                escape(s.name()),
                escape(s.email()),
                s.sessions_attended.to_string(),
                rate,
                escape(&format_timestamp(s.last_checkin.as_ref())),
                escape(&saiv_core::format::format_boolean(Some(s.face_enrolled))),
            ]
        })
        .collect();
    table(
        &["Student", "Email", "Attended", "Attendance", "Last Check-in", "Face Enrolled"],
        &rows,
    )
}

fn at_risk(enrollments: &CourseEnrollments) -> String {
    let items: Vec<String> = enrollments
        .at_risk()
        .map(|s| {
            format!(
                "<li>{} ({}) - {}</li>",
                escape(s.name()),
                escape(s.email()),
                escape(&format_percentage(Some(s.attendance_rate), 1))
            )
        })
        .collect();
    if items.is_empty() {
        alert(AlertKind::Success, "No students below 75% attendance.")
    } else {
        format!("<ul>{}</ul>", items.concat())
    }
}

/// Download links for a course's attendance export.
pub fn course_export_links(course: &Course) -> String {
    ["csv", "json", "xlsx"]
        .iter()
        .map(|format| {
            link_button(
                &format!("Download {}", format.to_uppercase()),
                &format!(
                    "/reports/course/{}/download?format={format}&code={}",
                    url_encode(&course.id),
                    url_encode(&course.code)
                ),
            )
        })
        .collect()
}

/// GET /courses
pub async fn courses(
    current: CurrentSession,
    Query(flash): Query<Flash>,
    Query(query): Query<CourseQuery>,
) -> Result<Html<String>, Response> {
    let client = current.client();
    let courses = match current.check(client.list_courses(CourseFilter::active(LIST_LIMIT)).await)? {
        Ok(courses) => courses,
        Err(err) => {
            let body = error_panel(&err);
            return Ok(layout::page("Course Analytics", "/courses", current.user(), &flash, &body));
        }
    };
    if courses.is_empty() {
        let body = alert(
            AlertKind::Info,
            "No courses yet. Create one on the Manage page.",
        );
        return Ok(layout::page("Course Analytics", "/courses", current.user(), &flash, &body));
    }

    let course = query
        .selected()
        .and_then(|id| courses.iter().find(|c| c.id == id))
        .unwrap_or(&courses[0]);
    let stats = current.check(client.course_stats(&course.id).await)?;
    let enrollments = current.check(client.course_enrollments(&course.id).await)?;

    let mut body = selector_form(
        "/courses",
        "Course",
        "course_id",
        &course_options(&courses),
        Some(&course.id),
        &[],
    );
    body.push_str(&format!(
        "<p>Semester: {} | Venue: {}</p>",
        escape(course.semester.as_deref().unwrap_or(saiv_core::format::NOT_AVAILABLE)),
        escape(course.venue_name.as_deref().unwrap_or(saiv_core::format::NOT_AVAILABLE)),
    ));

    match &stats {
        Ok(stats) => {
            body.push_str(&section("Course Metrics", &metrics(stats)));
            body.push_str(&section("Attendance Trends", &trend_charts(stats)));
            body.push_str(&section("Sessions", &session_table(stats)));
        }
        Err(err) => body.push_str(&section("Course Metrics", &error_panel(err))),
    }
    match &enrollments {
        Ok(enrollments) => {
            body.push_str(&section(
                &format!("Student Attendance ({} enrolled)", enrollments.total()),
                &roster_table(enrollments),
            ));
            body.push_str(&section("At-Risk Students", &at_risk(enrollments)));
        }
        Err(err) => body.push_str(&section("Student Attendance", &error_panel(err))),
    }
    body.push_str(&section("Export", &course_export_links(course)));
    body.push_str(&format!(
        "<p class=\"muted\">Generated {}</p>",
        escape(&format_date(Some(&chrono::Utc::now())))
    ));

    Ok(layout::page("Course Analytics", "/courses", current.user(), &flash, &body))
}
