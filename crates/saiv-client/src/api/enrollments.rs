//! Enrollment endpoints.

use reqwest::Method;
use saiv_core::AppResult;
use saiv_entity::enrollment::{
    BulkEnrollRequest, BulkEnrollResult, CourseEnrollments, CreateEnrollment,
};

use super::segment;
use crate::session::ClientSession;

impl ClientSession {
    /// `GET /enrollments/course/{id}`
    pub async fn course_enrollments(&self, course_id: &str) -> AppResult<CourseEnrollments> {
        self.get(&format!("/enrollments/course/{}", segment(course_id)?), &[])
            .await
    }

    /// `POST /admin/enrollments/`
    pub async fn enroll_student(&self, enrollment: &CreateEnrollment) -> AppResult<()> {
        self.call_empty(
            Method::POST,
            "/admin/enrollments/",
            Some(serde_json::to_value(enrollment)?),
        )
        .await
    }

    /// `POST /enrollments/bulk`
    pub async fn bulk_enroll(&self, request: &BulkEnrollRequest) -> AppResult<BulkEnrollResult> {
        self.call(
            Method::POST,
            "/enrollments/bulk",
            serde_json::to_value(request)?,
        )
        .await
    }
}
