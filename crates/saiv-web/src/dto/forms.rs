//! Form DTOs with validation.
//!
//! HTML forms submit every field as text, so numeric and optional fields
//! arrive as strings and are converted into the backend request bodies
//! here. Conversion failures produce the message shown next to the form.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use saiv_core::types::timestamp;
use saiv_entity::course::model::{DEFAULT_GEOFENCE_RADIUS, DEFAULT_RISK_THRESHOLD};
use saiv_entity::course::{Course, CreateCourse};
use saiv_entity::enrollment::{BulkEnrollRequest, CreateEnrollment, parse_email_lines};
use saiv_entity::session::{CreateSession, SessionSchedule, SessionType};
use saiv_entity::session::schedule::{DEFAULT_CLOSES_AFTER_MINUTES, DEFAULT_OPENS_BEFORE_MINUTES};

/// Joins validator messages into one line, in field order.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    let messages: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {field}"))
            })
        })
        .collect();
    messages.join("; ")
}

fn checked(value: &Option<String>) -> bool {
    matches!(value.as_deref(), Some("on" | "true" | "1"))
}

fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn optional_number(value: &str, label: &str) -> Result<Option<f64>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<f64>()
        .map(Some)
        .map_err(|_| format!("{label} must be a number"))
}

fn optional_minutes(value: &str, label: &str, default: i64) -> Result<i64, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(default);
    }
    value
        .parse::<i64>()
        .map_err(|_| format!("{label} must be a whole number of minutes"))
}

fn required_time(value: &str, label: &str) -> Result<DateTime<Utc>, String> {
    timestamp::parse(value).ok_or_else(|| format!("{label} is not a valid date and time"))
}

/// `POST /login`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginForm {
    /// Email address.
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Please enter your password"))]
    pub password: String,
}

/// `POST /manage/courses`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseForm {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub semester: String,
    #[serde(default)]
    pub venue_name: String,
    #[serde(default)]
    pub venue_latitude: String,
    #[serde(default)]
    pub venue_longitude: String,
    #[serde(default)]
    pub geofence_radius_meters: String,
    #[serde(default)]
    pub risk_threshold: String,
}

impl CourseForm {
    /// Converts and validates into the backend body.
    pub fn into_request(self) -> Result<CreateCourse, String> {
        let course = CreateCourse {
            code: self.code.trim().to_string(),
            name: self.name.trim().to_string(),
            semester: self.semester.trim().to_string(),
            venue_name: optional_text(&self.venue_name),
            venue_latitude: optional_number(&self.venue_latitude, "Latitude")?,
            venue_longitude: optional_number(&self.venue_longitude, "Longitude")?,
            geofence_radius_meters: optional_number(&self.geofence_radius_meters, "Geofence radius")?
                .unwrap_or(DEFAULT_GEOFENCE_RADIUS),
            risk_threshold: optional_number(&self.risk_threshold, "Risk threshold")?
                .unwrap_or(DEFAULT_RISK_THRESHOLD),
        };
        course.validate().map_err(|e| validation_message(&e))?;
        Ok(course)
    }
}

/// `POST /manage/sessions`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionForm {
    #[serde(default)]
    pub course_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub session_type: String,
    #[serde(default)]
    pub scheduled_start: String,
    #[serde(default)]
    pub scheduled_end: String,
    #[serde(default)]
    pub opens_before_minutes: String,
    #[serde(default)]
    pub closes_after_minutes: String,
    #[serde(default)]
    pub venue_name: String,
    #[serde(default)]
    pub venue_latitude: String,
    #[serde(default)]
    pub venue_longitude: String,
    #[serde(default)]
    pub geofence_radius_meters: String,
    #[serde(default)]
    pub risk_threshold: String,
    #[serde(default)]
    pub require_liveness_check: Option<String>,
    #[serde(default)]
    pub require_face_match: Option<String>,
}

/// A session body that passed validation, with any warnings to show.
#[derive(Debug, Clone)]
pub struct ValidatedSession {
    pub request: CreateSession,
    pub warnings: Vec<String>,
}

impl SessionForm {
    /// Converts and validates into the backend body.
    ///
    /// Venue, geofence and threshold fall back to the course defaults. A
    /// start time in the past is accepted with a warning.
    pub fn into_request(self, course: Option<&Course>, now: DateTime<Utc>) -> Result<ValidatedSession, String> {
        let schedule = SessionSchedule {
            scheduled_start: required_time(&self.scheduled_start, "Start time")?,
            scheduled_end: required_time(&self.scheduled_end, "End time")?,
            opens_before_minutes: optional_minutes(
                &self.opens_before_minutes,
                "Check-in opens before",
                DEFAULT_OPENS_BEFORE_MINUTES,
            )?,
            closes_after_minutes: optional_minutes(
                &self.closes_after_minutes,
                "Check-in closes after",
                DEFAULT_CLOSES_AFTER_MINUTES,
            )?,
        };
        let check = schedule.check(&self.name, now);
        if !check.is_ok() {
            return Err(check.errors.join("; "));
        }

        let session_type = if self.session_type.trim().is_empty() {
            SessionType::default()
        } else {
            self.session_type
                .parse::<SessionType>()
                .map_err(|e| e.message)?
        };

        let request = CreateSession {
            course_id: self.course_id.trim().to_string(),
            name: self.name.trim().to_string(),
            session_type,
            scheduled_start: schedule.scheduled_start,
            scheduled_end: schedule.scheduled_end,
            checkin_opens_at: schedule.checkin_opens_at(),
            checkin_closes_at: schedule.checkin_closes_at(),
            venue_name: optional_text(&self.venue_name)
                .or_else(|| course.and_then(|c| c.venue_name.clone())),
            venue_latitude: optional_number(&self.venue_latitude, "Latitude")?
                .or_else(|| course.and_then(|c| c.venue_latitude)),
            venue_longitude: optional_number(&self.venue_longitude, "Longitude")?
                .or_else(|| course.and_then(|c| c.venue_longitude)),
            geofence_radius_meters: optional_number(&self.geofence_radius_meters, "Geofence radius")?
                .or_else(|| course.map(|c| c.geofence_radius_meters))
                .unwrap_or(DEFAULT_GEOFENCE_RADIUS),
            require_liveness_check: checked(&self.require_liveness_check),
            require_face_match: checked(&self.require_face_match),
            risk_threshold: optional_number(&self.risk_threshold, "Risk threshold")?
                .or_else(|| course.map(|c| c.risk_threshold))
                .unwrap_or(DEFAULT_RISK_THRESHOLD),
        };
        request.validate().map_err(|e| validation_message(&e))?;
        Ok(ValidatedSession {
            request,
            warnings: check.warnings,
        })
    }
}

/// `POST /manage/sessions/{id}/status`
#[derive(Debug, Clone, Deserialize)]
pub struct StatusForm {
    /// Requested status.
    pub status: String,
    /// Owning course, to narrow the session lookup.
    #[serde(default)]
    pub course_id: String,
}

/// `POST /manage/sessions/{id}/delete`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionRefForm {
    /// Owning course, to narrow the session lookup.
    #[serde(default)]
    pub course_id: String,
}

/// `POST /manage/enrollments`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrollForm {
    #[serde(default)]
    pub course_id: String,
    #[serde(default)]
    pub student_id: String,
}

impl EnrollForm {
    /// Converts and validates into the backend body.
    pub fn into_request(self) -> Result<CreateEnrollment, String> {
        let enrollment = CreateEnrollment {
            student_id: self.student_id.trim().to_string(),
            course_id: self.course_id.trim().to_string(),
        };
        enrollment.validate().map_err(|e| validation_message(&e))?;
        Ok(enrollment)
    }
}

/// `POST /manage/enrollments/bulk`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkEnrollForm {
    #[serde(default)]
    pub course_id: String,
    /// Newline-separated emails.
    #[serde(default)]
    pub emails: String,
    #[serde(default)]
    pub create_accounts: Option<String>,
}

impl BulkEnrollForm {
    /// Converts and validates into the backend body.
    pub fn into_request(self) -> Result<BulkEnrollRequest, String> {
        let request = BulkEnrollRequest {
            course_id: self.course_id.trim().to_string(),
            student_emails: parse_email_lines(&self.emails),
            create_accounts: checked(&self.create_accounts),
        };
        request.validate().map_err(|e| validation_message(&e))?;
        Ok(request)
    }
}

/// `POST /checkins/{id}/review`
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewForm {
    /// `approve` or `reject`.
    pub decision: String,
    #[serde(default)]
    pub notes: String,
    /// Page to return to.
    #[serde(default)]
    pub return_to: String,
}

impl ReviewForm {
    /// Local redirect target; anything that is not a site path falls back
    /// to the sessions page.
    pub fn return_path(&self) -> &str {
        let path = self.return_to.trim();
        if path.starts_with('/') && !path.starts_with("//") {
            path
        } else {
            "/sessions"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn session_form() -> SessionForm {
        SessionForm {
            course_id: "c1".into(),
            name: "Week 1".into(),
            session_type: "lab".into(),
            scheduled_start: "2024-03-01T10:00".into(),
            scheduled_end: "2024-03-01T12:00".into(),
            ..SessionForm::default()
        }
    }

    #[test]
    fn test_login_form_validation() {
        let ok = LoginForm { email: "prof@uni.edu".into(), password: "x".into() };
        assert!(ok.validate().is_ok());
        let bad = LoginForm { email: "nope".into(), password: String::new() };
        let message = validation_message(&bad.validate().unwrap_err());
        assert_eq!(message, "Please enter a valid email address; Please enter your password");
    }

    #[test]
    fn test_course_form_defaults_and_errors() {
        let course = CourseForm {
            code: " CS101 ".into(),
            name: "Intro".into(),
            semester: "2024-S1".into(),
            ..CourseForm::default()
        }
        .into_request()
        .unwrap();
        assert_eq!(course.code, "CS101");
        assert_eq!(course.geofence_radius_meters, DEFAULT_GEOFENCE_RADIUS);
        assert_eq!(course.risk_threshold, DEFAULT_RISK_THRESHOLD);
        assert!(course.venue_name.is_none());

        let err = CourseForm {
            code: "CS101".into(),
            name: "Intro".into(),
            semester: "S1".into(),
            geofence_radius_meters: "5".into(),
            ..CourseForm::default()
        }
        .into_request()
        .unwrap_err();
        assert!(err.contains("between 10 and 1000"));

        let err = CourseForm { venue_latitude: "north".into(), ..CourseForm::default() }
            .into_request()
            .unwrap_err();
        assert_eq!(err, "Latitude must be a number");

        let err = CourseForm::default().into_request().unwrap_err();
        assert!(err.contains("Course code is required"));
    }

    #[test]
    fn test_session_form_uses_schedule_and_course_defaults() {
        let course = Course {
            venue_name: Some("LT1".into()),
            geofence_radius_meters: 150.0,
            ..serde_json::from_str::<Course>(r#"{"id": "c1"}"#).unwrap()
        };
        let validated = session_form().into_request(Some(&course), now()).unwrap();
        let request = validated.request;
        assert_eq!(request.session_type, SessionType::Lab);
        assert_eq!(request.venue_name.as_deref(), Some("LT1"));
        assert_eq!(request.geofence_radius_meters, 150.0);
        assert_eq!(request.checkin_opens_at, Utc.with_ymd_and_hms(2024, 3, 1, 9, 45, 0).unwrap());
        assert_eq!(request.checkin_closes_at, Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap());
        assert!(validated.warnings.is_empty());
    }

    #[test]
    fn test_session_form_rejections() {
        let err = SessionForm { name: "  ".into(), ..session_form() }
            .into_request(None, now())
            .unwrap_err();
        assert!(err.contains("Please enter a session name"));

        let err = SessionForm { scheduled_end: "2024-03-01T09:30".into(), ..session_form() }
            .into_request(None, now())
            .unwrap_err();
        assert!(err.contains("End time must be after start time"));

        let err = SessionForm { scheduled_start: "tomorrow".into(), ..session_form() }
            .into_request(None, now())
            .unwrap_err();
        assert_eq!(err, "Start time is not a valid date and time");
    }

    #[test]
    fn test_past_start_is_warning() {
        let later = Utc.with_ymd_and_hms(2024, 3, 1, 11, 0, 0).unwrap();
        let validated = session_form().into_request(None, later).unwrap();
        assert!(!validated.warnings.is_empty());
    }

    #[test]
    fn test_bulk_enroll_form() {
        let request = BulkEnrollForm {
            course_id: "c1".into(),
            emails: "a@u.edu\n\nb@u.edu\n".into(),
            create_accounts: Some("on".into()),
        }
        .into_request()
        .unwrap();
        assert_eq!(request.student_emails.len(), 2);
        assert!(request.create_accounts);

        let err = BulkEnrollForm { course_id: "c1".into(), ..BulkEnrollForm::default() }
            .into_request()
            .unwrap_err();
        assert_eq!(err, "Please enter at least one email");
    }

    #[test]
    fn test_review_return_path() {
        let form = |to: &str| ReviewForm {
            decision: "approve".into(),
            notes: String::new(),
            return_to: to.into(),
        };
        assert_eq!(form("/sessions?session_id=s1").return_path(), "/sessions?session_id=s1");
        assert_eq!(form("https://evil.example").return_path(), "/sessions");
        assert_eq!(form("//evil.example").return_path(), "/sessions");
    }
}
