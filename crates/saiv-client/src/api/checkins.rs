//! `/checkins` endpoints.

use reqwest::Method;
use saiv_core::AppResult;
use saiv_core::types::ListResponse;
use saiv_entity::checkin::{CheckIn, ReviewCheckIn, ReviewDecision};

use super::segment;
use crate::session::ClientSession;

impl ClientSession {
    /// `GET /checkins/session/{id}`
    pub async fn session_checkins(&self, session_id: &str) -> AppResult<Vec<CheckIn>> {
        let list: ListResponse<CheckIn> = self
            .get(&format!("/checkins/session/{}", segment(session_id)?), &[])
            .await?;
        Ok(list.into_items())
    }

    /// `GET /checkins/flagged?limit=N`
    pub async fn flagged_checkins(&self, limit: u32) -> AppResult<Vec<CheckIn>> {
        let list: ListResponse<CheckIn> = self
            .get("/checkins/flagged", &[("limit", limit.to_string())])
            .await?;
        Ok(list.into_items())
    }

    /// `POST /checkins/{id}/review`
    pub async fn review_checkin(
        &self,
        checkin_id: &str,
        decision: ReviewDecision,
        notes: &str,
    ) -> AppResult<()> {
        let body = ReviewCheckIn {
            status: decision,
            review_notes: notes.to_string(),
        };
        self.call_empty(
            Method::POST,
            &format!("/checkins/{}/review", segment(checkin_id)?),
            Some(serde_json::to_value(body)?),
        )
        .await
    }
}
