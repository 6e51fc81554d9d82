//! `/stats` endpoints.

use saiv_core::AppResult;
use saiv_entity::stats::{CourseStats, OverviewStats, SessionStats};

use super::segment;
use crate::session::ClientSession;

impl ClientSession {
    /// `GET /stats/overview?days=N`
    pub async fn overview_stats(&self, days: u32) -> AppResult<OverviewStats> {
        self.get("/stats/overview", &[("days", days.to_string())])
            .await
    }

    /// `GET /stats/courses/{id}`
    pub async fn course_stats(&self, course_id: &str) -> AppResult<CourseStats> {
        self.get(&format!("/stats/courses/{}", segment(course_id)?), &[]).await
    }

    /// `GET /stats/sessions/{id}`
    pub async fn session_stats(&self, session_id: &str) -> AppResult<SessionStats> {
        self.get(&format!("/stats/sessions/{}", segment(session_id)?), &[]).await
    }
}
