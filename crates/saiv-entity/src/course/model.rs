//! Course entity model.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Default geofence radius in metres.
pub const DEFAULT_GEOFENCE_RADIUS: f64 = 100.0;
/// Default flagging threshold.
pub const DEFAULT_RISK_THRESHOLD: f64 = 0.5;
/// Default venue latitude for new courses.
pub const DEFAULT_VENUE_LATITUDE: f64 = 1.2950;
/// Default venue longitude for new courses.
pub const DEFAULT_VENUE_LONGITUDE: f64 = 103.7737;

/// A course owning zero or more sessions.
///
/// Deleting a course only clears `is_active`; its sessions survive as
/// orphans and can no longer be activated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier.
    pub id: String,
    /// Course code, e.g. `CS3099`.
    #[serde(default)]
    pub code: String,
    /// Full course name.
    #[serde(default)]
    pub name: String,
    /// Academic semester.
    #[serde(default)]
    pub semester: Option<String>,
    /// Soft-delete marker.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Default venue name.
    #[serde(default)]
    pub venue_name: Option<String>,
    /// Default venue latitude.
    #[serde(default)]
    pub venue_latitude: Option<f64>,
    /// Default venue longitude.
    #[serde(default)]
    pub venue_longitude: Option<f64>,
    /// Default geofence radius in metres.
    #[serde(default = "default_geofence")]
    pub geofence_radius_meters: f64,
    /// Default flagging threshold.
    #[serde(default = "default_risk_threshold")]
    pub risk_threshold: f64,
}

impl Course {
    /// `"CS3099 - Capstone Project"`
    pub fn display_label(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

/// Body of `POST /courses/`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCourse {
    /// Course code.
    #[validate(length(min = 1, max = 32, message = "Course code is required"))]
    pub code: String,
    /// Course name.
    #[validate(length(min = 1, max = 255, message = "Course name is required"))]
    pub name: String,
    /// Academic semester.
    #[validate(length(min = 1, max = 64, message = "Semester is required"))]
    pub semester: String,
    /// Default venue name.
    pub venue_name: Option<String>,
    /// Default venue latitude.
    pub venue_latitude: Option<f64>,
    /// Default venue longitude.
    pub venue_longitude: Option<f64>,
    /// Default geofence radius in metres.
    #[validate(range(min = 10.0, max = 1000.0, message = "Geofence radius must be between 10 and 1000 meters"))]
    pub geofence_radius_meters: f64,
    /// Default flagging threshold.
    #[validate(range(min = 0.0, max = 1.0, message = "Risk threshold must be between 0 and 1"))]
    pub risk_threshold: f64,
}

/// Body of `PUT /courses/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCourse {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New semester.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
    /// New venue name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_name: Option<String>,
    /// Soft-delete marker; `Some(true)` restores a deleted course.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UpdateCourse {
    /// The body that restores a soft-deleted course.
    pub fn restore() -> Self {
        Self {
            is_active: Some(true),
            ..Self::default()
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_geofence() -> f64 {
    DEFAULT_GEOFENCE_RADIUS
}

fn default_risk_threshold() -> f64 {
    DEFAULT_RISK_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(geofence: f64, risk: f64) -> CreateCourse {
        CreateCourse {
            code: "CS3099".into(),
            name: "Capstone Project".into(),
            semester: "AY2024-25 Sem 2".into(),
            venue_name: None,
            venue_latitude: Some(DEFAULT_VENUE_LATITUDE),
            venue_longitude: Some(DEFAULT_VENUE_LONGITUDE),
            geofence_radius_meters: geofence,
            risk_threshold: risk,
        }
    }

    #[test]
    fn test_course_defaults() {
        let course: Course = serde_json::from_str(r#"{"id": "c1", "code": "CS1010"}"#).unwrap();
        assert!(course.is_active);
        assert_eq!(course.geofence_radius_meters, 100.0);
        assert_eq!(course.risk_threshold, 0.5);
        assert_eq!(course.display_label(), "CS1010 - ");
    }

    #[test]
    fn test_create_course_ranges() {
        assert!(create(100.0, 0.5).validate().is_ok());
        assert!(create(5.0, 0.5).validate().is_err());
        assert!(create(1001.0, 0.5).validate().is_err());
        assert!(create(100.0, 1.5).validate().is_err());
    }

    #[test]
    fn test_required_fields() {
        let mut course = create(100.0, 0.5);
        course.semester = String::new();
        let errors = course.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("semester"));
    }

    #[test]
    fn test_restore_body() {
        let body = serde_json::to_value(UpdateCourse::restore()).unwrap();
        assert_eq!(body, serde_json::json!({"is_active": true}));
    }
}
