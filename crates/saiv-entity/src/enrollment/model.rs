//! Enrollment entity model.

use chrono::{DateTime, Utc};
use saiv_core::types::timestamp;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Attendance percentage below which a student is considered at risk.
pub const LOW_ATTENDANCE_THRESHOLD: f64 = 75.0;

/// Nested student reference some enrollment payloads carry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentRef {
    /// Student user id.
    #[serde(default)]
    pub id: Option<String>,
    /// Full name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Email.
    #[serde(default)]
    pub email: Option<String>,
}

/// A student's membership in a course with attendance summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnrolledStudent {
    /// Student user id.
    #[serde(default)]
    pub student_id: Option<String>,
    /// Student name.
    #[serde(default)]
    pub student_name: Option<String>,
    /// Student email.
    #[serde(default, alias = "email")]
    pub student_email: Option<String>,
    /// Nested student record, when the flat fields are absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student: Option<StudentRef>,
    /// When the student was enrolled.
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub enrolled_at: Option<DateTime<Utc>>,
    /// Whether a face template is on file.
    #[serde(default)]
    pub face_enrolled: bool,
    /// Sessions attended.
    #[serde(default)]
    pub sessions_attended: u64,
    /// Attendance rate in percent.
    #[serde(default)]
    pub attendance_rate: f64,
    /// Most recent check-in.
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub last_checkin: Option<DateTime<Utc>>,
}

impl EnrolledStudent {
    /// Student id from the flat or nested record.
    pub fn id(&self) -> Option<&str> {
        self.student_id
            .as_deref()
            .or_else(|| self.student.as_ref().and_then(|s| s.id.as_deref()))
    }

    /// Student name from the flat or nested record.
    pub fn name(&self) -> &str {
        self.student_name
            .as_deref()
            .or_else(|| self.student.as_ref().and_then(|s| s.full_name.as_deref()))
            .unwrap_or("N/A")
    }

    /// Student email from the flat or nested record.
    pub fn email(&self) -> &str {
        self.student_email
            .as_deref()
            .or_else(|| self.student.as_ref().and_then(|s| s.email.as_deref()))
            .unwrap_or("N/A")
    }

    /// Attendance below [`LOW_ATTENDANCE_THRESHOLD`].
    pub fn is_low_attendance(&self) -> bool {
        self.attendance_rate < LOW_ATTENDANCE_THRESHOLD
    }
}

/// Response of `GET /enrollments/course/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseEnrollments {
    /// Course id.
    #[serde(default)]
    pub course_id: Option<String>,
    /// Enrolled students.
    #[serde(default, alias = "items")]
    pub students: Vec<EnrolledStudent>,
    /// Total enrolled, when reported.
    #[serde(default)]
    pub total_enrolled: Option<u64>,
}

impl CourseEnrollments {
    /// Total enrolled, falling back to the roster length.
    pub fn total(&self) -> u64 {
        self.total_enrolled.unwrap_or(self.students.len() as u64)
    }

    /// Students below the low-attendance threshold.
    pub fn at_risk(&self) -> impl Iterator<Item = &EnrolledStudent> {
        self.students.iter().filter(|s| s.is_low_attendance())
    }
}

/// Body of `POST /admin/enrollments/`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEnrollment {
    /// Student user id.
    #[validate(length(min = 1, message = "Please enter a student ID"))]
    pub student_id: String,
    /// Course id.
    #[validate(length(min = 1, message = "Please select a course"))]
    pub course_id: String,
}

/// Body of `POST /enrollments/bulk`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BulkEnrollRequest {
    /// Course id.
    #[validate(length(min = 1, message = "Please select a course"))]
    pub course_id: String,
    /// Student emails.
    #[validate(length(min = 1, message = "Please enter at least one email"))]
    pub student_emails: Vec<String>,
    /// Create accounts for unknown emails.
    #[serde(default)]
    pub create_accounts: bool,
}

/// Response of `POST /enrollments/bulk`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkEnrollResult {
    /// Newly enrolled.
    #[serde(default)]
    pub enrolled: u64,
    /// Already enrolled before the call.
    #[serde(default)]
    pub already_enrolled: u64,
    /// Emails with no matching account.
    #[serde(default)]
    pub not_found: u64,
    /// Per-email details.
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

impl BulkEnrollResult {
    /// `"Enrolled: 3, Already enrolled: 1, Not found: 0"`
    pub fn summary(&self) -> String {
        format!(
            "Enrolled: {}, Already enrolled: {}, Not found: {}",
            self.enrolled, self.already_enrolled, self.not_found
        )
    }
}

/// Split newline-separated input into trimmed, non-empty emails.
pub fn parse_email_lines(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_email_lines() {
        let emails = parse_email_lines("a@u.edu\n\n  b@u.edu  \r\n\t\n");
        assert_eq!(emails, vec!["a@u.edu".to_string(), "b@u.edu".to_string()]);
        assert!(parse_email_lines("   \n").is_empty());
    }

    #[test]
    fn test_nested_student_fallback() {
        let roster: CourseEnrollments = serde_json::from_str(
            r#"{"students": [
                {"student": {"id": "u1", "full_name": "Bob", "email": "bob@u.edu"},
                 "sessions_attended": 3, "attendance_rate": 60.0},
                {"student_id": "u2", "student_name": "Cat", "student_email": "cat@u.edu",
                 "attendance_rate": 100.0, "face_enrolled": true}
            ]}"#,
        )
        .unwrap();
        assert_eq!(roster.total(), 2);
        assert_eq!(roster.students[0].name(), "Bob");
        assert_eq!(roster.students[0].id(), Some("u1"));
        assert_eq!(roster.students[1].email(), "cat@u.edu");
        let at_risk: Vec<_> = roster.at_risk().map(|s| s.name()).collect();
        assert_eq!(at_risk, vec!["Bob"]);
    }

    #[test]
    fn test_bulk_validation() {
        let request = BulkEnrollRequest {
            course_id: "c1".into(),
            student_emails: vec![],
            create_accounts: false,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_bulk_summary() {
        let result: BulkEnrollResult =
            serde_json::from_str(r#"{"enrolled": 3, "already_enrolled": 1}"#).unwrap();
        assert_eq!(result.summary(), "Enrolled: 3, Already enrolled: 1, Not found: 0");
    }
}
