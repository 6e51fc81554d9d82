//! `/sessions` endpoints and the status-change call.

use reqwest::Method;
use saiv_core::AppResult;
use saiv_core::types::ListResponse;
use saiv_entity::session::{CreateSession, Session, SessionStatus, SessionStatusUpdate};
use serde_json::Value;

use super::courses::CourseQuery;
use super::segment;
use crate::session::ClientSession;

/// Upper bound for the lookups behind [`ClientSession::session_context`].
pub const CONTEXT_LIST_LIMIT: u32 = 500;

/// A session together with whether its course is still active.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// The session as the backend reports it.
    pub session: Session,
    /// Whether the owning course appears in the active course list.
    pub course_is_active: bool,
}

/// Query for `GET /sessions/`.
#[derive(Debug, Clone, Default)]
pub struct SessionQuery {
    /// Restrict to one course.
    pub course_id: Option<String>,
    /// Maximum number of sessions.
    pub limit: Option<u32>,
}

impl SessionQuery {
    /// All sessions up to `limit`.
    pub fn limit(limit: u32) -> Self {
        Self {
            course_id: None,
            limit: Some(limit),
        }
    }

    /// Sessions of one course up to `limit`.
    pub fn for_course(course_id: impl Into<String>, limit: u32) -> Self {
        Self {
            course_id: Some(course_id.into()),
            limit: Some(limit),
        }
    }

    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(course_id) = &self.course_id {
            pairs.push(("course_id", course_id.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

impl ClientSession {
    /// `GET /sessions/`
    pub async fn list_sessions(&self, query: &SessionQuery) -> AppResult<Vec<Session>> {
        let list: ListResponse<Session> = self.get("/sessions/", &query.pairs()).await?;
        Ok(list.into_items())
    }

    /// `POST /sessions/`
    pub async fn create_session(&self, session: &CreateSession) -> AppResult<Session> {
        self.call(Method::POST, "/sessions/", serde_json::to_value(session)?)
            .await
    }

    /// `PATCH /sessions/{id}` with a partial body.
    pub async fn update_session(&self, session_id: &str, changes: Value) -> AppResult<Session> {
        self.call(Method::PATCH, &format!("/sessions/{}", segment(session_id)?), changes)
            .await
    }

    /// `PATCH /admin/sessions/{id}/status`
    ///
    /// Callers run the lifecycle guard first; the backend may still refuse.
    pub async fn update_session_status(
        &self,
        session_id: &str,
        status: SessionStatus,
    ) -> AppResult<()> {
        self.call_empty(
            Method::PATCH,
            &format!("/admin/sessions/{}/status", segment(session_id)?),
            Some(serde_json::to_value(SessionStatusUpdate { status })?),
        )
        .await
    }

    /// `DELETE /sessions/{id}`
    pub async fn delete_session(&self, session_id: &str) -> AppResult<()> {
        self.call_empty(Method::DELETE, &format!("/sessions/{}", segment(session_id)?), None)
            .await
    }

    /// Looks up one session and the active flag of its course.
    ///
    /// This is what the lifecycle guard needs before a status change or a
    /// delete. `Ok(None)` means the session is not listed.
    pub async fn session_context(
        &self,
        session_id: &str,
        course_id: Option<&str>,
    ) -> AppResult<Option<SessionContext>> {
        let query = match course_id {
            Some(course_id) => SessionQuery::for_course(course_id, CONTEXT_LIST_LIMIT),
            None => SessionQuery::limit(CONTEXT_LIST_LIMIT),
        };
        let sessions = self.list_sessions(&query).await?;
        let Some(session) = sessions.into_iter().find(|s| s.id == session_id) else {
            return Ok(None);
        };
        let active = self
            .list_courses(CourseQuery::active(CONTEXT_LIST_LIMIT))
            .await?;
        let course_is_active = active.iter().any(|c| c.id == session.course_id);
        Ok(Some(SessionContext {
            session,
            course_is_active,
        }))
    }
}
