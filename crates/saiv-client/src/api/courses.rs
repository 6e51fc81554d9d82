//! `/courses` endpoints.

use reqwest::Method;
use saiv_core::AppResult;
use saiv_core::types::ListResponse;
use saiv_entity::course::{Course, CreateCourse, UpdateCourse};

use super::segment;
use crate::session::ClientSession;

/// Query for `GET /courses/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CourseQuery {
    /// Maximum number of courses.
    pub limit: Option<u32>,
    /// Filter on the soft-delete marker.
    pub is_active: Option<bool>,
}

impl CourseQuery {
    /// Active courses only.
    pub fn active(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            is_active: Some(true),
        }
    }

    /// Soft-deleted courses only.
    pub fn deleted(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            is_active: Some(false),
        }
    }

    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(active) = self.is_active {
            pairs.push(("is_active", active.to_string()));
        }
        pairs
    }
}

impl ClientSession {
    /// `GET /courses/`
    pub async fn list_courses(&self, query: CourseQuery) -> AppResult<Vec<Course>> {
        let list: ListResponse<Course> = self.get("/courses/", &query.pairs()).await?;
        Ok(list.into_items())
    }

    /// `POST /courses/`
    pub async fn create_course(&self, course: &CreateCourse) -> AppResult<Course> {
        self.call(Method::POST, "/courses/", serde_json::to_value(course)?)
            .await
    }

    /// `PUT /courses/{id}`
    pub async fn update_course(&self, course_id: &str, update: &UpdateCourse) -> AppResult<Course> {
        self.call(
            Method::PUT,
            &format!("/courses/{}", segment(course_id)?),
            serde_json::to_value(update)?,
        )
        .await
    }

    /// Reactivate a soft-deleted course.
    pub async fn restore_course(&self, course_id: &str) -> AppResult<Course> {
        self.update_course(course_id, &UpdateCourse::restore()).await
    }

    /// `DELETE /courses/{id}` (soft delete).
    pub async fn delete_course(&self, course_id: &str) -> AppResult<()> {
        self.call_empty(Method::DELETE, &format!("/courses/{}", segment(course_id)?), None)
            .await
    }
}
