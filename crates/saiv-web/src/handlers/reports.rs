//! Reports page and export downloads.

use axum::extract::{Path, Query};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{Html, IntoResponse, Response};
use tracing::{info, warn};

use saiv_client::api::courses::CourseQuery as CourseFilter;
use saiv_client::api::export::{ExportFile, ExportFormat};
use saiv_client::api::sessions::SessionQuery as SessionFilter;
use saiv_core::AppResult;
use saiv_core::format::format_percentage;
use saiv_entity::checkin::CheckIn;

use super::LIST_LIMIT;
use super::courses::course_export_links;
use crate::dto::query::{ExportQuery, ReportsQuery};
use crate::extractors::{CurrentSession, Flash, redirect_err};
use crate::render::components::{alert, error_panel, link_button, metric_row, section, AlertKind};
use crate::render::html::{query_string, url_encode};
use crate::render::layout;
use crate::render::views::{checkin_table, course_options, selector_form, session_options};

/// Rows shown in the check-in preview.
const PREVIEW_ROWS: usize = 20;

fn download(file: ExportFile) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", file.filename);
    (
        [(CONTENT_TYPE, file.content_type), (CONTENT_DISPOSITION, disposition)],
        file.data,
    )
        .into_response()
}

fn parse_format(query: &ExportQuery) -> AppResult<ExportFormat> {
    match query.format.as_deref().map(str::trim).filter(|f| !f.is_empty()) {
        Some(raw) => raw.parse(),
        None => Ok(ExportFormat::default()),
    }
}

fn finish(current: &CurrentSession, result: AppResult<ExportFile>, back: &str) -> Response {
    match current.check(result) {
        Err(expired) => expired,
        Ok(Ok(file)) => {
            info!(filename = %file.filename, bytes = file.data.len(), "Export downloaded");
            download(file)
        }
        Ok(Err(err)) => {
            warn!(error = %err, "Export failed");
            redirect_err(back, &format!("Export failed: {}", err.user_message())).into_response()
        }
    }
}

/// GET /reports/course/{id}/download
pub async fn download_course(
    current: CurrentSession,
    Path(course_id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Response {
    let back = format!("/reports{}", query_string(&[("course_id", &course_id)]));
    let format = match parse_format(&query) {
        Ok(format) => format,
        Err(err) => return redirect_err(&back, &err.message).into_response(),
    };
    let code = query.code.as_deref().unwrap_or("");
    let result = current
        .client()
        .export_course_attendance(&course_id, code, format)
        .await;
    finish(&current, result, &back)
}

/// GET /reports/session/{id}/download
pub async fn download_session(
    current: CurrentSession,
    Path(session_id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Response {
    let back = format!("/reports{}", query_string(&[("session_id", &session_id)]));
    let format = match parse_format(&query) {
        Ok(format) => format,
        Err(err) => return redirect_err(&back, &err.message).into_response(),
    };
    let result = current.client().export_session(&session_id, format).await;
    finish(&current, result, &back)
}

fn session_export_links(session_id: &str) -> String {
    ["csv", "json", "xlsx"]
        .iter()
        .map(|format| {
            link_button(
                &format!("Download {}", format.to_uppercase()),
                &format!(
                    "/reports/session/{}/download?format={format}",
                    url_encode(session_id)
                ),
            )
        })
        .collect()
}

fn checkin_preview(checkins: &[CheckIn]) -> String {
    let shown = &checkins[..checkins.len().min(PREVIEW_ROWS)];
    format!(
        "<p>Showing {} of {} check-ins</p>{}",
        shown.len(),
        checkins.len(),
        checkin_table(shown)
    )
}

/// GET /reports
pub async fn reports(
    current: CurrentSession,
    Query(flash): Query<Flash>,
    Query(query): Query<ReportsQuery>,
) -> Result<Html<String>, Response> {
    let client = current.client();
    let courses = current.check(client.list_courses(CourseFilter::active(LIST_LIMIT)).await)?;
    let sessions = current.check(client.list_sessions(&SessionFilter::limit(LIST_LIMIT)).await)?;

    let mut course_body = String::new();
    match &courses {
        Err(err) => course_body.push_str(&error_panel(err)),
        Ok(list) if list.is_empty() => {
            course_body.push_str(&alert(AlertKind::Info, "No active courses to export."))
        }
        Ok(list) => {
            let course = query
                .course()
                .and_then(|id| list.iter().find(|c| c.id == id))
                .unwrap_or(&list[0]);
            course_body.push_str(&selector_form(
                "/reports",
                "Course",
                "course_id",
                &course_options(list),
                Some(&course.id),
                &[("session_id", query.session().unwrap_or(""))],
            ));
            course_body.push_str(&course_export_links(course));
            match current.check(client.course_stats(&course.id).await)? {
                Ok(stats) => course_body.push_str(&metric_row(&[
                    ("Students", stats.total_students.to_string()),
                    ("Sessions", stats.total_sessions.to_string()),
                    ("Check-ins", stats.total_checkins.to_string()),
                    (
                        "Avg Attendance",
                        format_percentage(Some(stats.average_attendance_rate), 1),
                    ),
                ])),
                Err(err) => course_body.push_str(&error_panel(&err)),
            }
        }
    }

    let mut session_body = String::new();
    match &sessions {
        Err(err) => session_body.push_str(&error_panel(err)),
        Ok(list) if list.is_empty() => {
            session_body.push_str(&alert(AlertKind::Info, "No sessions to export."))
        }
        Ok(list) => {
            let session = query
                .session()
                .and_then(|id| list.iter().find(|s| s.id == id))
                .unwrap_or(&list[0]);
            session_body.push_str(&selector_form(
                "/reports",
                "Session",
                "session_id",
                &session_options(list),
                Some(&session.id),
                &[("course_id", query.course().unwrap_or(""))],
            ));
            session_body.push_str(&session_export_links(&session.id));
            match current.check(client.session_checkins(&session.id).await)? {
                Ok(checkins) => session_body.push_str(&checkin_preview(&checkins)),
                Err(err) => session_body.push_str(&error_panel(&err)),
            }
        }
    }

    let mut body = section("Course Attendance Report", &course_body);
    body.push_str(&section("Session Report", &session_body));
    Ok(layout::page("Reports", "/reports", current.user(), &flash, &body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format_defaults_to_csv() {
        assert_eq!(parse_format(&ExportQuery::default()).unwrap(), ExportFormat::Csv);
        let xlsx = ExportQuery { format: Some("XLSX".into()), code: None };
        assert_eq!(parse_format(&xlsx).unwrap(), ExportFormat::Xlsx);
        let bad = ExportQuery { format: Some("pdf".into()), code: None };
        assert!(parse_format(&bad).is_err());
    }

    #[test]
    fn test_download_headers() {
        let response = download(ExportFile {
            filename: "CS1_attendance_20240101.csv".into(),
            content_type: "text/csv".into(),
            data: bytes::Bytes::from_static(b"a,b\n"),
        });
        assert_eq!(response.headers()[CONTENT_TYPE], "text/csv");
        assert_eq!(
            response.headers()[CONTENT_DISPOSITION],
            "attachment; filename=\"CS1_attendance_20240101.csv\""
        );
    }
}
