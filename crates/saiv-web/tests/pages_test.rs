//! Integration tests for dashboard pages, review and exports.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

fn checkins() -> serde_json::Value {
    json!([
        {"id": "k1", "session_id": "s1", "student_name": "Ann Lee", "student_email": "ann@uni.edu",
         "status": "approved", "risk_score": 0.1},
        {"id": "k2", "session_id": "s1", "student_name": "Bob Tan", "student_email": "bob@uni.edu",
         "status": "flagged", "risk_score": 0.8, "flag_reasons": ["Outside geofence"]}
    ])
}

#[tokio::test]
async fn test_overview_renders_each_panel() {
    let app = helpers::TestApp::new().await;
    let cookie = app.login().await;
    app.fake.respond(
        "GET",
        "/stats/overview",
        200,
        json!({
            "total_sessions": 12, "active_sessions": 1, "total_checkins": 340,
            "approval_rate": 92.5, "approved_checkins": 300, "flagged_checkins": 4,
            "daily_trends": [{"date": "2024-03-01", "checkins": 40, "sessions": 2}]
        }),
    );
    app.fake
        .respond("GET", "/checkins/flagged", 500, json!({"detail": "boom"}));

    let response = app.request("GET", "/overview?days=30", None, Some(&cookie)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("340"));
    assert!(response.body.contains("Excellent"));
    assert!(response.body.contains("<svg"));
    assert!(response.body.contains("boom"));
    let stats = app.fake.calls_to("GET", "/stats/overview");
    assert_eq!(stats[0].query_param("days").as_deref(), Some("30"));
}

#[tokio::test]
async fn test_sessions_page_filters_checkins() {
    let app = helpers::TestApp::new().await;
    let cookie = app.login().await;
    app.with_session("active");
    app.fake.respond(
        "GET",
        "/stats/sessions/s1",
        200,
        json!({"total_enrolled": 2, "checked_in": 2, "attendance_rate": 1.0}),
    );
    app.fake.respond("GET", "/checkins/session/s1", 200, checkins());
    app.fake.respond("GET", "/checkins/flagged", 200, json!([]));

    let response = app
        .request(
            "GET",
            "/sessions?session_id=s1&status=flagged&search=bob",
            None,
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Showing 1 of 2 check-ins"));
    assert!(response.body.contains("Bob Tan"));
    assert!(response.body.contains("100.0%"));
    assert!(response.body.contains("/reports/session/s1/download?format=csv"));
}

#[tokio::test]
async fn test_review_checkin_redirects_back() {
    let app = helpers::TestApp::new().await;
    let cookie = app.login().await;
    app.fake.respond_empty("POST", "/checkins/k2/review", 204);

    let response = app
        .request(
            "POST",
            "/checkins/k2/review",
            Some("decision=rejected&notes=Spoofed+location&return_to=%2Fsessions%3Fsession_id%3Ds1"),
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(
        response.location(),
        "/sessions?session_id=s1&msg=Check-in rejected"
    );
    let calls = app.fake.calls_to("POST", "/checkins/k2/review");
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].body,
        Some(json!({"status": "rejected", "review_notes": "Spoofed location"}))
    );
}

#[tokio::test]
async fn test_review_rejects_offsite_return_path() {
    let app = helpers::TestApp::new().await;
    let cookie = app.login().await;
    app.fake.respond_empty("POST", "/checkins/k2/review", 204);

    let response = app
        .request(
            "POST",
            "/checkins/k2/review",
            Some("decision=approved&return_to=https%3A%2F%2Fevil.example"),
            Some(&cookie),
        )
        .await;

    assert_eq!(response.location(), "/sessions?msg=Check-in approved");
}

#[tokio::test]
async fn test_session_export_download() {
    let app = helpers::TestApp::new().await;
    let cookie = app.login().await;
    app.fake
        .respond_bytes("GET", "/export/session/s1", "text/csv", b"student,status\nAnn,approved\n");

    let response = app
        .request(
            "GET",
            "/reports/session/s1/download?format=csv",
            None,
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("content-type"), Some("text/csv"));
    let disposition = response.header("content-disposition").expect("disposition");
    assert!(disposition.starts_with("attachment; filename=\"session_s1_"));
    assert!(disposition.ends_with(".csv\""));
    assert_eq!(response.body, "student,status\nAnn,approved\n");
    let calls = app.fake.calls_to("GET", "/export/session/s1");
    assert_eq!(calls[0].query_param("format").as_deref(), Some("csv"));
}

#[tokio::test]
async fn test_export_with_unknown_format_stays_local() {
    let app = helpers::TestApp::new().await;
    let cookie = app.login().await;

    let response = app
        .request(
            "GET",
            "/reports/course/c1/download?format=pdf&code=CS101",
            None,
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert!(response.location().starts_with("/reports?course_id=c1&err=Invalid export format"));
    assert!(app.fake.calls_to("GET", "/export/attendance/c1").is_empty());
}

#[tokio::test]
async fn test_audit_page_lists_entries() {
    let app = helpers::TestApp::new().await;
    let cookie = app.login().await;
    app.fake.respond(
        "GET",
        "/audit/",
        200,
        json!({"items": [
            {"action": "login_success", "user_email": "prof@uni.edu", "success": true},
            {"action": "login_failed", "user_email": "kid@uni.edu", "success": false}
        ], "total": 2}),
    );

    let response = app
        .request("GET", "/audit?user=prof&page_size=25", None, Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("login_success"));
    assert!(!response.body.contains("kid@uni.edu"));
    let calls = app.fake.calls_to("GET", "/audit/");
    assert_eq!(calls[0].query_param("limit").as_deref(), Some("25"));
}
