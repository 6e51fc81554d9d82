//! Manage page: course and session creation, enrollments, session status
//! changes and course recovery.
//!
//! Every status change and session deletion is checked against the
//! lifecycle guard before the backend is called. A change the guard refuses
//! never leaves this process.

use axum::Form;
use axum::extract::{Path, Query};
use axum::response::{Html, IntoResponse, Response};
use chrono::Utc;
use tracing::{info, warn};

use saiv_client::api::courses::CourseQuery as CourseFilter;
use saiv_client::api::sessions::{SessionContext, SessionQuery as SessionFilter};
use saiv_core::AppResult;
use saiv_core::format::{format_timestamp, NOT_AVAILABLE};
use saiv_entity::course::Course;
use saiv_entity::course::model::{DEFAULT_GEOFENCE_RADIUS, DEFAULT_RISK_THRESHOLD};
use saiv_entity::session::lifecycle::DELETE_BLOCKED_MESSAGE;
use saiv_entity::session::{
    Session, SessionActions, SessionSchedule, SessionStatus, SessionType, validate_transition,
};
use saiv_entity::user::UserRole;

use super::LIST_LIMIT;
use super::courses::roster_table;
use crate::dto::forms::{
    BulkEnrollForm, CourseForm, EnrollForm, SessionForm, SessionRefForm, StatusForm,
};
use crate::dto::query::ManageQuery;
use crate::extractors::{CurrentSession, Flash, redirect_err, redirect_msg};
use crate::render::components::{
    alert, button, checkbox, error_panel, hidden, input, link_button, section, select,
    session_status_badge, table, AlertKind,
};
use crate::render::escape;
use crate::render::html::{query_string, url_encode};
use crate::render::layout;
use crate::render::views::{course_options, selector_form};

/// Tab keys and titles, in display order.
pub const TABS: [(&str, &str); 5] = [
    ("course", "Create Course"),
    ("session", "Create Session"),
    ("enroll", "Enrollments"),
    ("status", "Session Status"),
    ("recovery", "Recovery"),
];

/// Appended to the label of sessions whose course is inactive.
pub const COURSE_DELETED_MARKER: &str = "[COURSE DELETED]";

const DATETIME_LOCAL: &str = "%Y-%m-%dT%H:%M";

/// Link to one tab of the Manage page.
pub fn manage_href(tab: &str, course_id: Option<&str>, session_id: Option<&str>) -> String {
    format!(
        "/manage{}",
        query_string(&[
            ("tab", tab),
            ("course_id", course_id.unwrap_or("")),
            ("session_id", session_id.unwrap_or("")),
        ])
    )
}

fn tab_bar(active: &str) -> String {
    let links: String = TABS
        .iter()
        .map(|(key, title)| {
            let class = if *key == active { "tab active" } else { "tab" };
            format!(
                r#"<a class="{class}" href="{}">{}</a>"#,
                escape(&manage_href(key, None, None)),
                escape(title)
            )
        })
        .collect();
    format!(r#"<nav class="tabs">{links}</nav>"#)
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

/// Label for the status-tab selector.
pub fn status_label(session: &Session, course_is_active: bool) -> String {
    if course_is_active {
        session.display_label()
    } else {
        format!("{} {COURSE_DELETED_MARKER}", session.display_label())
    }
}

/// Status buttons, explanation and danger zone for one session.
pub fn status_controls(session: &Session, course_is_active: bool) -> String {
    let actions = SessionActions::for_session(session.status, course_is_active);
    let mut out = format!(
        "<p>Current status: {}</p>{}",
        session_status_badge(session.status),
        alert(AlertKind::Info, actions.explanation())
    );
    if let Some(warning) = actions.course_warning() {
        out.push_str(&alert(AlertKind::Warning, warning));
    }

    let action = format!("/manage/sessions/{}/status", url_encode(&session.id));
    out.push_str(r#"<div class="actions">"#);
    for (target, label, class) in [
        (SessionStatus::Active, "Activate", "btn-primary"),
        (SessionStatus::Closed, "Close", "btn-secondary"),
        (SessionStatus::Cancelled, "Cancel", "btn-warning"),
    ] {
        let reason = validate_transition(session.status, target, course_is_active)
            .err()
            .map(|rejection| rejection.to_string());
        out.push_str(&format!(
            r#"<form method="post" action="{}" class="inline">{}{}{}</form>"#,
            escape(&action),
            hidden("status", target.as_str()),
            hidden("course_id", &session.course_id),
            button(label, class, actions.permits(target), reason.as_deref())
        ));
    }
    out.push_str(&button(
        "Schedule",
        "btn-secondary",
        actions.permits(SessionStatus::Scheduled),
        Some(actions.schedule_hint()),
    ));
    out.push_str("</div>");

    let delete = format!(
        r#"<form method="post" action="/manage/sessions/{}/delete">{}{}</form><p class="muted">{}</p>"#,
        url_encode(&session.id),
        hidden("course_id", &session.course_id),
        button(
            "Delete Session",
            "btn-danger",
            actions.can_delete,
            Some(actions.delete_message())
        ),
        escape(actions.delete_message())
    );
    out.push_str(&format!(
        r#"<div class="danger-zone"><h3>Danger Zone</h3>{delete}</div>"#
    ));
    out
}

fn course_form() -> String {
    format!(
        r#"<form method="post" action="/manage/courses" class="form">{}{}{}{}{}{}{}{}<button type="submit" class="btn btn-primary">Create Course</button></form>"#,
        input("Course Code", "text", "code", "", true),
        input("Course Name", "text", "name", "", true),
        input("Semester", "text", "semester", "", true),
        input("Venue Name", "text", "venue_name", "", false),
        input("Venue Latitude", "text", "venue_latitude", "", false),
        input("Venue Longitude", "text", "venue_longitude", "", false),
        input(
            "Geofence Radius (m, 10-1000)",
            "number",
            "geofence_radius_meters",
            &DEFAULT_GEOFENCE_RADIUS.to_string(),
            false
        ),
        input(
            "Risk Threshold (0-1)",
            "text",
            "risk_threshold",
            &DEFAULT_RISK_THRESHOLD.to_string(),
            false
        ),
    )
}

fn course_rows(courses: &[Course]) -> Vec<Vec<String>> {
    courses
        .iter()
        .map(|c| {
            vec![
                escape(&c.code),
                escape(&c.name),
                escape(c.semester.as_deref().unwrap_or(NOT_AVAILABLE)),
                escape(c.venue_name.as_deref().unwrap_or(NOT_AVAILABLE)),
                format!(
                    r#"<a href="{}">Delete</a>"#,
                    escape(&manage_href("course", Some(&c.id), None))
                ),
            ]
        })
        .collect()
}

/// Confirmation panel listing the course's open sessions.
pub fn course_delete_panel(course: &Course, sessions: &[Session]) -> String {
    let open: Vec<&Session> = sessions
        .iter()
        .filter(|s| s.course_id == course.id && s.status.is_open())
        .collect();
    let mut out = if open.is_empty() {
        alert(AlertKind::Info, "This course has no scheduled or active sessions.")
    } else {
        let items: String = open
            .iter()
            .map(|s| format!("<li>{}</li>", escape(&s.display_label())))
            .collect();
        format!(
            "{}<ul>{items}</ul>",
            alert(
                AlertKind::Warning,
                &format!(
                    "{} open session(s) belong to this course. They remain but can no longer be activated.",
                    open.len()
                )
            )
        )
    };
    out.push_str(&format!(
        r#"<form method="post" action="/manage/courses/{}/delete" class="inline"><button type="submit" class="btn btn-danger">Confirm Delete</button></form>{}"#,
        url_encode(&course.id),
        link_button("Keep Course", &manage_href("course", None, None))
    ));
    out
}

async fn course_tab(current: &CurrentSession, query: &ManageQuery) -> Result<String, Response> {
    let client = current.client();
    let mut out = section("Create Course", &course_form());
    let courses = match current.check(client.list_courses(CourseFilter::active(LIST_LIMIT)).await)? {
        Ok(courses) => courses,
        Err(err) => {
            out.push_str(&section("Active Courses", &error_panel(&err)));
            return Ok(out);
        }
    };
    if let Some(course) = query
        .course()
        .and_then(|id| courses.iter().find(|c| c.id == id))
    {
        let panel = match current.check(client.list_sessions(&SessionFilter::for_course(&course.id, LIST_LIMIT)).await)? {
            Ok(sessions) => course_delete_panel(course, &sessions),
            Err(err) => error_panel(&err),
        };
        out.push_str(&section(&format!("Delete {}", course.display_label()), &panel));
    }
    out.push_str(&section(
        "Active Courses",
        &table(&["Code", "Name", "Semester", "Venue", ""], &course_rows(&courses)),
    ));
    Ok(out)
}

fn session_form(courses: &[Course], selected: Option<&str>) -> String {
    let schedule = SessionSchedule::default_at(Utc::now());
    let types: Vec<(String, String)> = SessionType::SELECTABLE
        .iter()
        .map(|t| (t.as_str().to_string(), t.as_str().to_string()))
        .collect();
    format!(
        concat!(
            r#"<form method="post" action="/manage/sessions" class="form">"#,
            "<label>Course {}</label>{}<label>Type {}</label>{}{}{}{}",
            r#"<p class="muted">Venue, geofence and risk threshold default to the course settings when left blank.</p>"#,
            "{}{}{}{}{}{}{}",
            r#"<button type="submit" class="btn btn-primary">Create Session</button></form>"#
        ),
        select("course_id", &course_options(courses), selected),
        input("Session Name", "text", "name", "", true),
        select("session_type", &types, Some(SessionType::default().as_str())),
        input(
            "Start (UTC)",
            "datetime-local",
            "scheduled_start",
            &schedule.scheduled_start.format(DATETIME_LOCAL).to_string(),
            true
        ),
        input(
            "End (UTC)",
            "datetime-local",
            "scheduled_end",
            &schedule.scheduled_end.format(DATETIME_LOCAL).to_string(),
            true
        ),
        input(
            "Check-in opens (minutes before start)",
            "number",
            "opens_before_minutes",
            &schedule.opens_before_minutes.to_string(),
            false
        ),
        input(
            "Check-in closes (minutes after start)",
            "number",
            "closes_after_minutes",
            &schedule.closes_after_minutes.to_string(),
            false
        ),
        input("Venue Name", "text", "venue_name", "", false),
        input("Venue Latitude", "text", "venue_latitude", "", false),
        input("Venue Longitude", "text", "venue_longitude", "", false),
        input("Geofence Radius (m)", "number", "geofence_radius_meters", "", false),
        input("Risk Threshold (0-1)", "text", "risk_threshold", "", false),
        checkbox("Require liveness check", "require_liveness_check", true),
        checkbox("Require face match", "require_face_match", false),
    )
}

async fn session_tab(current: &CurrentSession, query: &ManageQuery) -> Result<String, Response> {
    let courses = match current.check(current.client().list_courses(CourseFilter::active(LIST_LIMIT)).await)? {
        Ok(courses) => courses,
        Err(err) => return Ok(error_panel(&err)),
    };
    if courses.is_empty() {
        return Ok(alert(
            AlertKind::Info,
            "No active courses. Create or restore a course before adding sessions.",
        ));
    }
    Ok(section("Create Session", &session_form(&courses, query.course())))
}

async fn enroll_tab(current: &CurrentSession, query: &ManageQuery) -> Result<String, Response> {
    let client = current.client();
    let courses = match current.check(client.list_courses(CourseFilter::active(LIST_LIMIT)).await)? {
        Ok(courses) => courses,
        Err(err) => return Ok(error_panel(&err)),
    };
    if courses.is_empty() {
        return Ok(alert(AlertKind::Info, "No active courses to enroll students in."));
    }
    let course = query
        .course()
        .and_then(|id| courses.iter().find(|c| c.id == id))
        .unwrap_or(&courses[0]);

    let mut out = selector_form(
        "/manage",
        "Course",
        "course_id",
        &course_options(&courses),
        Some(&course.id),
        &[("tab", "enroll")],
    );

    let student_field = match current.check(client.list_users(Some(UserRole::Student)).await)? {
        Ok(students) if !students.is_empty() => {
            let options: Vec<(String, String)> = students
                .iter()
                .map(|s| (s.id.clone(), format!("{} ({})", s.display_name(), s.email)))
                .collect();
            format!("<label>Student {}</label>", select("student_id", &options, None))
        }
        _ => input("Student ID", "text", "student_id", "", true),
    };
    out.push_str(&section(
        "Enroll Student",
        &format!(
            r#"<form method="post" action="/manage/enrollments" class="form">{}{student_field}<button type="submit" class="btn btn-primary">Enroll</button></form>"#,
            hidden("course_id", &course.id)
        ),
    ));
    out.push_str(&section(
        "Bulk Enroll",
        &format!(
            r#"<form method="post" action="/manage/enrollments/bulk" class="form">{}<label>Student emails (one per line)<textarea name="emails" rows="8"></textarea></label>{}<button type="submit" class="btn btn-primary">Enroll All</button></form>"#,
            hidden("course_id", &course.id),
            checkbox("Create accounts for unknown emails", "create_accounts", false)
        ),
    ));

    let roster = match current.check(client.course_enrollments(&course.id).await)? {
        Ok(enrollments) => format!(
            "<p>{} students enrolled</p>{}",
            enrollments.total(),
            roster_table(&enrollments)
        ),
        Err(err) => error_panel(&err),
    };
    out.push_str(&section("Current Roster", &roster));
    Ok(out)
}

async fn status_tab(current: &CurrentSession, query: &ManageQuery) -> Result<String, Response> {
    let client = current.client();
    let filter = match query.course() {
        Some(course_id) => SessionFilter::for_course(course_id, LIST_LIMIT),
        None => SessionFilter::limit(LIST_LIMIT),
    };
    let sessions = match current.check(client.list_sessions(&filter).await)? {
        Ok(sessions) => sessions,
        Err(err) => return Ok(error_panel(&err)),
    };
    let active = match current.check(client.list_courses(CourseFilter::active(LIST_LIMIT)).await)? {
        Ok(courses) => courses,
        Err(err) => return Ok(error_panel(&err)),
    };
    if sessions.is_empty() {
        return Ok(alert(AlertKind::Info, "No sessions found."));
    }
    let course_is_active = |session: &Session| active.iter().any(|c| c.id == session.course_id);

    let options: Vec<(String, String)> = sessions
        .iter()
        .map(|s| (s.id.clone(), status_label(s, course_is_active(s))))
        .collect();
    let session = query
        .session()
        .and_then(|id| sessions.iter().find(|s| s.id == id))
        .unwrap_or(&sessions[0]);

    let mut out = selector_form(
        "/manage",
        "Session",
        "session_id",
        &options,
        Some(&session.id),
        &[("tab", "status"), ("course_id", query.course().unwrap_or(""))],
    );
    let details = format!(
        "<p>{} | {} to {}</p>",
        escape(&status_label(session, course_is_active(session))),
        escape(&format_timestamp(session.scheduled_start.as_ref())),
        escape(&format_timestamp(session.scheduled_end.as_ref()))
    );
    out.push_str(&section(
        "Session Status",
        &format!("{details}{}", status_controls(session, course_is_active(session))),
    ));
    Ok(out)
}

async fn recovery_tab(current: &CurrentSession) -> Result<String, Response> {
    let courses = match current.check(current.client().list_courses(CourseFilter::deleted(LIST_LIMIT)).await)? {
        Ok(courses) => courses,
        Err(err) => return Ok(error_panel(&err)),
    };
    if courses.is_empty() {
        return Ok(alert(AlertKind::Success, "No deleted courses."));
    }
    let rows: Vec<Vec<String>> = courses
        .iter()
        .map(|c| {
            vec![
                escape(&c.code),
                escape(&c.name),
                escape(c.semester.as_deref().unwrap_or(NOT_AVAILABLE)),
                format!(
                    r#"<form method="post" action="/manage/courses/{}/restore" class="inline"><button type="submit" class="btn btn-primary">Restore</button></form>"#,
                    url_encode(&c.id)
                ),
            ]
        })
        .collect();
    Ok(section(
        "Deleted Courses",
        &table(&["Code", "Name", "Semester", ""], &rows),
    ))
}

/// GET /manage
pub async fn manage(
    current: CurrentSession,
    Query(flash): Query<Flash>,
    Query(query): Query<ManageQuery>,
) -> Result<Html<String>, Response> {
    let tab = query
        .tab
        .as_deref()
        .filter(|t| TABS.iter().any(|(key, _)| key == t))
        .unwrap_or("course");
    let panel = match tab {
        "session" => session_tab(&current, &query).await?,
        "enroll" => enroll_tab(&current, &query).await?,
        "status" => status_tab(&current, &query).await?,
        "recovery" => recovery_tab(&current).await?,
        _ => course_tab(&current, &query).await?,
    };
    let body = format!("{}{panel}", tab_bar(tab));
    Ok(layout::page("Manage", "/manage", current.user(), &flash, &body))
}

/// Redirects with the outcome of a backend call.
fn outcome<T>(
    current: &CurrentSession,
    result: AppResult<T>,
    back: &str,
    success: impl FnOnce(T) -> String,
) -> Response {
    match current.check(result) {
        Err(expired) => expired,
        Ok(Ok(value)) => redirect_msg(back, &success(value)).into_response(),
        Ok(Err(err)) => {
            warn!(error = %err, "Manage action failed");
            redirect_err(back, &err.user_message()).into_response()
        }
    }
}

/// POST /manage/courses
pub async fn create_course(current: CurrentSession, Form(form): Form<CourseForm>) -> Response {
    let back = manage_href("course", None, None);
    let request = match form.into_request() {
        Ok(request) => request,
        Err(message) => return redirect_err(&back, &message).into_response(),
    };
    let result = current.client().create_course(&request).await;
    outcome(&current, result, &back, |course| {
        info!(course_id = %course.id, code = %course.code, "Course created");
        format!("Course {} created.", course.code)
    })
}

/// POST /manage/courses/{id}/delete
pub async fn delete_course(current: CurrentSession, Path(course_id): Path<String>) -> Response {
    let back = manage_href("course", None, None);
    let result = current.client().delete_course(&course_id).await;
    outcome(&current, result, &back, |()| {
        info!(course_id = %course_id, "Course deleted");
        "Course deleted. Its sessions remain and can no longer be activated. Restore it from the Recovery tab."
            .to_string()
    })
}

/// POST /manage/courses/{id}/restore
pub async fn restore_course(current: CurrentSession, Path(course_id): Path<String>) -> Response {
    let back = manage_href("recovery", None, None);
    let result = current.client().restore_course(&course_id).await;
    outcome(&current, result, &back, |course| {
        info!(course_id = %course.id, "Course restored");
        format!("Course {} restored.", course.code)
    })
}

/// POST /manage/sessions
pub async fn create_session(current: CurrentSession, Form(form): Form<SessionForm>) -> Response {
    let course_id = form.course_id.trim().to_string();
    let back = manage_href("session", non_empty(&course_id), None);
    let courses = match current.check(current.client().list_courses(CourseFilter::active(LIST_LIMIT)).await) {
        Err(expired) => return expired,
        Ok(Err(err)) => return redirect_err(&back, &err.user_message()).into_response(),
        Ok(Ok(courses)) => courses,
    };
    let Some(course) = courses.iter().find(|c| c.id == course_id) else {
        return redirect_err(
            &back,
            "Select an active course. Sessions cannot be created for deleted courses.",
        )
        .into_response();
    };
    let validated = match form.into_request(Some(course), Utc::now()) {
        Ok(validated) => validated,
        Err(message) => return redirect_err(&back, &message).into_response(),
    };
    let result = current.client().create_session(&validated.request).await;
    match current.check(result) {
        Err(expired) => expired,
        Ok(Ok(session)) => {
            info!(session_id = %session.id, course_id = %course_id, "Session created");
            let mut message = format!("Session '{}' created.", session.name);
            for warning in &validated.warnings {
                message.push(' ');
                message.push_str(warning);
            }
            let target = manage_href("status", Some(&course_id), Some(&session.id));
            redirect_msg(&target, &message).into_response()
        }
        Ok(Err(err)) => {
            warn!(error = %err, "Session creation failed");
            redirect_err(&back, &err.user_message()).into_response()
        }
    }
}

/// Resolves the session for a guarded action, or the response to send instead.
async fn guarded_session(
    current: &CurrentSession,
    session_id: &str,
    course_id: Option<&str>,
    back: &str,
) -> Result<SessionContext, Response> {
    match current.check(current.client().session_context(session_id, course_id).await)? {
        Ok(Some(context)) => Ok(context),
        Ok(None) => Err(redirect_err(back, "Session not found.").into_response()),
        Err(err) => Err(redirect_err(back, &err.user_message()).into_response()),
    }
}

/// POST /manage/sessions/{id}/status
pub async fn change_status(
    current: CurrentSession,
    Path(session_id): Path<String>,
    Form(form): Form<StatusForm>,
) -> Response {
    let course_id = non_empty(&form.course_id);
    let back = manage_href("status", course_id, Some(&session_id));
    let target = match form.status.parse::<SessionStatus>() {
        Ok(target) => target,
        Err(err) => return redirect_err(&back, &err.message).into_response(),
    };
    let context = match guarded_session(&current, &session_id, course_id, &back).await {
        Ok(context) => context,
        Err(response) => return response,
    };

    let mut session = context.session;
    let current_status = session.status;
    let previous = match session.transition_to(target, context.course_is_active) {
        Ok(previous) => previous,
        Err(rejection) => {
            info!(
                session_id = %session_id,
                from = %current_status,
                to = %target,
                reason = rejection.reason(),
                "Status change refused by lifecycle guard"
            );
            return redirect_err(&back, &rejection.to_string()).into_response();
        }
    };

    let result = current
        .client()
        .update_session_status(&session_id, target)
        .await;
    outcome(&current, result, &back, |()| {
        info!(session_id = %session_id, from = %previous, to = %target, "Session status changed");
        format!(
            "Session status changed from {} to {}.",
            previous.label(),
            target.label()
        )
    })
}

/// POST /manage/sessions/{id}/delete
pub async fn delete_session(
    current: CurrentSession,
    Path(session_id): Path<String>,
    Form(form): Form<SessionRefForm>,
) -> Response {
    let course_id = non_empty(&form.course_id);
    let back = manage_href("status", course_id, Some(&session_id));
    let context = match guarded_session(&current, &session_id, course_id, &back).await {
        Ok(context) => context,
        Err(response) => return response,
    };
    if !context.session.can_delete() {
        info!(
            session_id = %session_id,
            status = %context.session.status,
            "Session delete refused by lifecycle guard"
        );
        return redirect_err(&back, DELETE_BLOCKED_MESSAGE).into_response();
    }

    let result = current.client().delete_session(&session_id).await;
    let done = manage_href("status", course_id, None);
    outcome(&current, result, &done, |()| {
        info!(session_id = %session_id, "Session deleted");
        format!("Session '{}' deleted.", context.session.name)
    })
}

/// POST /manage/enrollments
pub async fn enroll(current: CurrentSession, Form(form): Form<EnrollForm>) -> Response {
    let back = manage_href("enroll", non_empty(&form.course_id), None);
    let request = match form.into_request() {
        Ok(request) => request,
        Err(message) => return redirect_err(&back, &message).into_response(),
    };
    let result = current.client().enroll_student(&request).await;
    outcome(&current, result, &back, |()| {
        info!(course_id = %request.course_id, student_id = %request.student_id, "Student enrolled");
        "Student enrolled.".to_string()
    })
}

/// POST /manage/enrollments/bulk
pub async fn bulk_enroll(current: CurrentSession, Form(form): Form<BulkEnrollForm>) -> Response {
    let back = manage_href("enroll", non_empty(&form.course_id), None);
    let request = match form.into_request() {
        Ok(request) => request,
        Err(message) => return redirect_err(&back, &message).into_response(),
    };
    let result = current.client().bulk_enroll(&request).await;
    outcome(&current, result, &back, |summary| {
        info!(course_id = %request.course_id, emails = request.student_emails.len(), "Bulk enrollment finished");
        summary.summary()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session(status: &str) -> Session {
        serde_json::from_value(json!({
            "id": "s1",
            "course_id": "c1",
            "course_code": "CS101",
            "name": "Week 1",
            "status": status
        }))
        .unwrap()
    }

    #[test]
    fn test_manage_href() {
        assert_eq!(manage_href("status", None, None), "/manage?tab=status");
        assert_eq!(
            manage_href("status", Some("c1"), Some("s1")),
            "/manage?tab=status&course_id=c1&session_id=s1"
        );
    }

    #[test]
    fn test_status_label_marks_deleted_course() {
        let s = session("scheduled");
        assert!(!status_label(&s, true).contains(COURSE_DELETED_MARKER));
        assert!(status_label(&s, false).ends_with(COURSE_DELETED_MARKER));
    }

    #[test]
    fn test_scheduled_session_controls() {
        let html = status_controls(&session("scheduled"), true);
        assert!(html.contains(r#"class="btn btn-primary">Activate</button>"#));
        assert!(html.contains(r#"class="btn btn-warning">Cancel</button>"#));
        assert!(html.contains("disabled title=\"Cannot change session status from scheduled to closed.\""));
        assert!(html.contains("Sessions cannot be moved back to scheduled status"));
        assert!(html.contains(r#"class="btn btn-danger">Delete Session</button>"#));
    }

    #[test]
    fn test_closed_session_controls_are_all_disabled() {
        let html = status_controls(&session("closed"), true);
        assert!(!html.contains(r#"class="btn btn-primary">Activate"#));
        assert!(!html.contains(r#"class="btn btn-secondary">Close"#));
        assert!(!html.contains(r#"class="btn btn-warning">Cancel"#));
        assert!(html.contains("This session is closed. No further status changes are allowed."));
        assert!(html.contains("cannot be deleted because it has/had active check-ins"));
    }

    #[test]
    fn test_deleted_course_blocks_activation() {
        let html = status_controls(&session("scheduled"), false);
        assert!(!html.contains(r#"class="btn btn-primary">Activate"#));
        assert!(html.contains("The course for this session has been deleted."));
        assert!(html.contains("This session belongs to a deleted course."));
        assert!(html.contains(r#"class="btn btn-warning">Cancel</button>"#));
    }

    #[test]
    fn test_course_delete_panel_lists_open_sessions() {
        let course: Course = serde_json::from_value(json!({
            "id": "c1", "code": "CS101", "name": "Intro", "is_active": true
        }))
        .unwrap();
        let sessions = vec![session("scheduled"), session("closed")];
        let html = course_delete_panel(&course, &sessions);
        assert!(html.contains("1 open session(s)"));
        assert!(html.contains("CS101 - Week 1 (scheduled)"));
        assert!(!html.contains("(closed)"));
    }
}
