//! Integration tests for the backend client against an in-process fake.

use saiv_client::api::courses::CourseQuery;
use saiv_client::api::sessions::SessionQuery;
use saiv_client::client::MSG_ROLE_DENIED;
use saiv_client::{BackendClient, ClientSession, ExportFormat};
use saiv_core::config::backend::BackendConfig;
use saiv_core::error::ErrorKind;
use saiv_entity::audit::AuditFilter;
use saiv_entity::checkin::ReviewDecision;
use saiv_entity::session::SessionStatus;
use saiv_testkit::FakeBackend;
use serde_json::json;

fn client_for(url: String) -> BackendClient {
    BackendClient::new(&BackendConfig {
        url,
        timeout_seconds: 5,
        ..BackendConfig::default()
    })
    .expect("client")
}

async fn signed_in(fake: &FakeBackend) -> ClientSession {
    fake.respond(
        "POST",
        "/auth/login",
        200,
        json!({
            "access_token": "tok-123",
            "token_type": "bearer",
            "user": {"id": "u1", "email": "prof@uni.edu", "full_name": "Prof X", "role": "instructor"}
        }),
    );
    client_for(fake.url())
        .login("prof@uni.edu", "secret")
        .await
        .expect("login")
}

#[tokio::test]
async fn test_login_success() {
    let fake = FakeBackend::start().await;
    let session = signed_in(&fake).await;

    assert_eq!(session.token(), "tok-123");
    assert_eq!(session.user().map(|u| u.email.as_str()), Some("prof@uni.edu"));

    let calls = fake.calls_to("POST", "/auth/login");
    assert_eq!(calls.len(), 1);
    let body = calls[0].body.clone().expect("login body");
    assert_eq!(body["email"], "prof@uni.edu");
    assert_eq!(body["password"], "secret");
    assert!(calls[0].authorization.is_none());
}

#[tokio::test]
async fn test_login_refuses_student_role() {
    let fake = FakeBackend::start().await;
    fake.respond(
        "POST",
        "/auth/login",
        200,
        json!({
            "access_token": "tok-student",
            "user": {"id": "u2", "email": "kid@uni.edu", "full_name": "Kid", "role": "student"}
        }),
    );

    let err = client_for(fake.url())
        .login("kid@uni.edu", "pw")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
    assert_eq!(err.user_message(), MSG_ROLE_DENIED);
}

#[tokio::test]
async fn test_login_refuses_response_without_user() {
    let fake = FakeBackend::start().await;
    fake.respond("POST", "/auth/login", 200, json!({"access_token": "tok-x"}));

    let err = client_for(fake.url())
        .login("someone@uni.edu", "pw")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
    assert_eq!(err.user_message(), MSG_ROLE_DENIED);
}

#[tokio::test]
async fn test_login_bad_credentials() {
    let fake = FakeBackend::start().await;
    fake.respond(
        "POST",
        "/auth/login",
        401,
        json!({"detail": "Incorrect email or password"}),
    );

    let err = client_for(fake.url())
        .login("prof@uni.edu", "wrong")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
    assert_eq!(err.status, Some(401));
    assert_eq!(err.message, "Incorrect email or password");
}

#[tokio::test]
async fn test_bearer_token_and_list_shapes() {
    let fake = FakeBackend::start().await;
    let session = signed_in(&fake).await;

    fake.respond(
        "GET",
        "/courses/",
        200,
        json!([{"id": "c1", "code": "CS101", "name": "Intro", "semester": "2024-S1"}]),
    );
    fake.respond(
        "GET",
        "/sessions/",
        200,
        json!({
            "items": [
                {"id": "s1", "course_id": "c1", "name": "Week 1", "status": "active"},
                {"id": "s2", "course_id": "c1", "name": "Week 2", "status": "scheduled"}
            ],
            "total": 2
        }),
    );

    let courses = session.list_courses(CourseQuery::active(100)).await.unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].code, "CS101");

    let sessions = session
        .list_sessions(&SessionQuery::for_course("c1", 50))
        .await
        .unwrap();
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0].status, SessionStatus::Active);

    let course_call = &fake.calls_to("GET", "/courses/")[0];
    assert_eq!(course_call.authorization.as_deref(), Some("Bearer tok-123"));
    assert_eq!(course_call.query_param("is_active").as_deref(), Some("true"));
    assert_eq!(course_call.query_param("limit").as_deref(), Some("100"));

    let session_call = &fake.calls_to("GET", "/sessions/")[0];
    assert_eq!(session_call.query_param("course_id").as_deref(), Some("c1"));
}

#[tokio::test]
async fn test_status_update_body() {
    let fake = FakeBackend::start().await;
    let session = signed_in(&fake).await;
    fake.respond(
        "PATCH",
        "/admin/sessions/s1/status",
        200,
        json!({"id": "s1", "status": "active"}),
    );

    session
        .update_session_status("s1", SessionStatus::Active)
        .await
        .unwrap();

    let calls = fake.calls_to("PATCH", "/admin/sessions/s1/status");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].body, Some(json!({"status": "active"})));
    assert_eq!(calls[0].authorization.as_deref(), Some("Bearer tok-123"));
}

#[tokio::test]
async fn test_ids_stay_within_one_path_segment() {
    let fake = FakeBackend::start().await;
    let session = signed_in(&fake).await;
    fake.respond_empty("DELETE", "/courses/..%2F..%2Fadmin%2Fx", 204);

    session.delete_course("../../admin/x").await.unwrap();
    assert_eq!(fake.calls_to("DELETE", "/courses/..%2F..%2Fadmin%2Fx").len(), 1);

    let err = session.delete_session("..").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    let err = session.restore_course("").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let mutations = fake.mutations();
    assert_eq!(mutations.len(), 2, "{mutations:?}");
    assert!(mutations.iter().all(|c| c.path == "/auth/login" || c.path.starts_with("/courses/")));
}

#[tokio::test]
async fn test_backend_detail_surfaces() {
    let fake = FakeBackend::start().await;
    let session = signed_in(&fake).await;
    fake.respond(
        "PATCH",
        "/admin/sessions/s9/status",
        400,
        json!({"detail": "Session already closed"}),
    );

    let err = session
        .update_session_status("s9", SessionStatus::Closed)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.user_message(), "Session already closed");
}

#[tokio::test]
async fn test_expired_token_is_authentication_error() {
    let fake = FakeBackend::start().await;
    let session = signed_in(&fake).await;
    fake.respond(
        "GET",
        "/stats/overview",
        401,
        json!({"detail": "Token expired"}),
    );

    let err = session.overview_stats(7).await.unwrap_err();
    assert!(err.is_session_expired());
    assert_eq!(err.user_message(), "Authentication failed. Please login again.");
    assert_eq!(
        fake.calls_to("GET", "/stats/overview")[0]
            .query_param("days")
            .as_deref(),
        Some("7")
    );
}

#[tokio::test]
async fn test_review_and_empty_success() {
    let fake = FakeBackend::start().await;
    let session = signed_in(&fake).await;
    fake.respond_empty("POST", "/checkins/k1/review", 204);

    session
        .review_checkin("k1", ReviewDecision::Approved, "looks fine")
        .await
        .unwrap();

    let body = fake.calls_to("POST", "/checkins/k1/review")[0]
        .body
        .clone()
        .unwrap();
    assert_eq!(body["status"], "approved");
    assert_eq!(body["review_notes"], "looks fine");
}

#[tokio::test]
async fn test_audit_query_parameters() {
    let fake = FakeBackend::start().await;
    let session = signed_in(&fake).await;
    fake.respond(
        "GET",
        "/audit/",
        200,
        json!([{"id": "a1", "action": "login", "success": true}]),
    );

    let page = session.audit_logs(&AuditFilter::default()).await.unwrap();
    assert_eq!(page.items.len(), 1);

    let call = &fake.calls_to("GET", "/audit/")[0];
    assert!(call.query_param("limit").is_some());
    assert_eq!(call.query_param("offset").as_deref(), Some("0"));
    assert!(call.query_param("action").is_none());
}

#[tokio::test]
async fn test_export_returns_bytes() {
    let fake = FakeBackend::start().await;
    let session = signed_in(&fake).await;
    fake.respond_bytes(
        "GET",
        "/export/attendance/c1",
        "text/csv",
        b"student,status\nann,approved\n",
    );

    let file = session
        .export_course_attendance("c1", "CS101", ExportFormat::Csv)
        .await
        .unwrap();
    assert_eq!(&file.data[..], b"student,status\nann,approved\n");
    assert_eq!(file.content_type, "text/csv");
    assert!(file.filename.starts_with("CS101_attendance_"));
    assert!(file.filename.ends_with(".csv"));
    assert_eq!(
        fake.calls_to("GET", "/export/attendance/c1")[0]
            .query_param("format")
            .as_deref(),
        Some("csv")
    );
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(format!("http://{addr}"))
        .login("prof@uni.edu", "secret")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Transport);
    assert!(err.user_message().starts_with("Connection error:"));
}
