//! Session entity model.

use chrono::{DateTime, Utc};
use saiv_core::types::timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use super::lifecycle::{self, TransitionRejection};
use super::status::SessionStatus;

/// Kind of meeting a session represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    /// Lecture (default).
    #[default]
    Lecture,
    /// Tutorial.
    Tutorial,
    /// Laboratory.
    Lab,
    /// Examination.
    Exam,
    /// Any type this dashboard does not know about.
    #[serde(other)]
    Other,
}

impl SessionType {
    /// Types that can be chosen when creating a session.
    pub const SELECTABLE: [SessionType; 4] = [Self::Lecture, Self::Tutorial, Self::Lab, Self::Exam];

    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lecture => "lecture",
            Self::Tutorial => "tutorial",
            Self::Lab => "lab",
            Self::Exam => "exam",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SessionType {
    type Err = saiv_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lecture" => Ok(Self::Lecture),
            "tutorial" => Ok(Self::Tutorial),
            "lab" => Ok(Self::Lab),
            "exam" => Ok(Self::Exam),
            _ => Err(saiv_core::AppError::validation(format!(
                "Invalid session type: '{s}'. Expected one of: lecture, tutorial, lab, exam"
            ))),
        }
    }
}

/// One scheduled meeting of a course.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier.
    pub id: String,
    /// Owning course.
    #[serde(default)]
    pub course_id: String,
    /// Denormalized course code.
    #[serde(default)]
    pub course_code: Option<String>,
    /// Session name.
    #[serde(default, alias = "title")]
    pub name: String,
    /// Meeting type.
    #[serde(default)]
    pub session_type: SessionType,
    /// Lifecycle status.
    #[serde(default)]
    pub status: SessionStatus,

    // -- Schedule --
    /// Scheduled start.
    #[serde(default, deserialize_with = "timestamp::lenient", alias = "scheduled_time")]
    pub scheduled_start: Option<DateTime<Utc>>,
    /// Scheduled end.
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub scheduled_end: Option<DateTime<Utc>>,
    /// When check-in opens.
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub checkin_opens_at: Option<DateTime<Utc>>,
    /// When check-in closes.
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub checkin_closes_at: Option<DateTime<Utc>>,

    // -- Venue & verification --
    /// Venue name.
    #[serde(default, alias = "location")]
    pub venue_name: Option<String>,
    /// Venue latitude.
    #[serde(default)]
    pub venue_latitude: Option<f64>,
    /// Venue longitude.
    #[serde(default)]
    pub venue_longitude: Option<f64>,
    /// Geofence radius in metres.
    #[serde(default)]
    pub geofence_radius_meters: Option<f64>,
    /// Check-ins scoring above this are flagged.
    #[serde(default)]
    pub risk_threshold: Option<f64>,
    /// Liveness check required.
    #[serde(default)]
    pub require_liveness_check: bool,
    /// Face match required.
    #[serde(default)]
    pub require_face_match: bool,

    /// Number of check-ins recorded.
    #[serde(default)]
    pub checkin_count: u64,
}

impl Session {
    /// `"CS3099 - Lecture 1 (scheduled)"`
    pub fn display_label(&self) -> String {
        format!(
            "{} - {} ({})",
            self.course_code.as_deref().unwrap_or("N/A"),
            if self.name.is_empty() { "Unnamed" } else { &self.name },
            self.status
        )
    }

    /// Move to `target` if the lifecycle guard allows it.
    pub fn transition_to(
        &mut self,
        target: SessionStatus,
        course_is_active: bool,
    ) -> Result<SessionStatus, TransitionRejection> {
        lifecycle::validate_transition(self.status, target, course_is_active)?;
        let previous = self.status;
        self.status = target;
        Ok(previous)
    }

    /// Whether this session may be deleted.
    pub fn can_delete(&self) -> bool {
        lifecycle::can_delete(self.status)
    }
}

/// Body of `POST /sessions/`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSession {
    /// Owning course.
    #[validate(length(min = 1, message = "Please select a course"))]
    pub course_id: String,
    /// Session name.
    #[validate(length(min = 1, message = "Please enter a session name"))]
    pub name: String,
    /// Meeting type.
    pub session_type: SessionType,
    /// Scheduled start.
    pub scheduled_start: DateTime<Utc>,
    /// Scheduled end.
    pub scheduled_end: DateTime<Utc>,
    /// When check-in opens.
    pub checkin_opens_at: DateTime<Utc>,
    /// When check-in closes.
    pub checkin_closes_at: DateTime<Utc>,
    /// Venue name; the course default applies when absent.
    pub venue_name: Option<String>,
    /// Venue latitude.
    pub venue_latitude: Option<f64>,
    /// Venue longitude.
    pub venue_longitude: Option<f64>,
    /// Geofence radius in metres.
    #[validate(range(min = 10.0, max = 1000.0, message = "Geofence radius must be between 10 and 1000 meters"))]
    pub geofence_radius_meters: f64,
    /// Liveness check required.
    pub require_liveness_check: bool,
    /// Face match required.
    pub require_face_match: bool,
    /// Flagging threshold.
    #[validate(range(min = 0.0, max = 1.0, message = "Risk threshold must be between 0 and 1"))]
    pub risk_threshold: f64,
}

/// Body of `PATCH /admin/sessions/{id}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatusUpdate {
    /// Requested status.
    pub status: SessionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_fall_back() {
        let session: Session = serde_json::from_str(r#"{"id": "s1"}"#).unwrap();
        assert_eq!(session.status, SessionStatus::Unknown);
        assert_eq!(session.session_type, SessionType::Lecture);
        assert!(session.scheduled_start.is_none());
        assert_eq!(session.checkin_count, 0);
        assert_eq!(session.display_label(), "N/A - Unnamed (unknown)");
    }

    #[test]
    fn test_unknown_type_preserved_as_other() {
        let session: Session = serde_json::from_str(
            r#"{"id": "s1", "session_type": "seminar", "status": "active",
                "scheduled_start": "2024-02-01T09:00:00", "course_code": "CS3099", "name": "Week 3"}"#,
        )
        .unwrap();
        assert_eq!(session.session_type, SessionType::Other);
        assert_eq!(session.status, SessionStatus::Active);
        assert!(session.scheduled_start.is_some());
        assert_eq!(session.display_label(), "CS3099 - Week 3 (active)");
    }

    #[test]
    fn test_missing_and_unrecognised_status() {
        let sessions: Vec<Session> = serde_json::from_str(
            r#"[{"id": "s1", "course_id": "c1", "name": "Week 1"},
                {"id": "s2", "name": "Week 2", "status": "completed"},
                {"id": "s3", "name": "Week 3", "status": "scheduled"}]"#,
        )
        .unwrap();
        assert_eq!(sessions.len(), 3);
        assert_eq!(sessions[0].status, SessionStatus::Unknown);
        assert_eq!(sessions[1].status, SessionStatus::Unknown);
        assert_eq!(sessions[2].status, SessionStatus::Scheduled);
        assert!(!sessions[0].can_delete());
        assert_eq!(sessions[1].display_label(), "N/A - Week 2 (unknown)");
    }

    #[test]
    fn test_transition_to() {
        let mut session = Session {
            id: "s1".into(),
            status: SessionStatus::Scheduled,
            ..Session::default()
        };
        assert_eq!(
            session.transition_to(SessionStatus::Active, false),
            Err(TransitionRejection::CourseDeleted)
        );
        assert_eq!(session.status, SessionStatus::Scheduled);
        assert_eq!(
            session.transition_to(SessionStatus::Active, true),
            Ok(SessionStatus::Scheduled)
        );
        assert_eq!(session.status, SessionStatus::Active);
        assert!(!session.can_delete());
    }

    #[test]
    fn test_status_update_body() {
        let body = serde_json::to_value(SessionStatusUpdate {
            status: SessionStatus::Active,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"status": "active"}));
    }
}
