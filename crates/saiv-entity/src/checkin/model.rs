//! Check-in entity model.

use chrono::{DateTime, Utc};
use saiv_core::types::timestamp;
use serde::{Deserialize, Serialize};

use super::risk::RiskLevel;
use super::status::{CheckInStatus, ReviewDecision};

/// One contribution to a check-in's risk score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskFactor {
    /// Factor name, e.g. `distance` or `device_mismatch`.
    #[serde(default, rename = "type", alias = "factor")]
    pub kind: String,
    /// Weight of the factor in the score.
    #[serde(default)]
    pub weight: f64,
}

/// A student's attendance record against a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckIn {
    /// Unique check-in identifier.
    pub id: String,
    /// Session checked into.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Student display name.
    #[serde(default)]
    pub student_name: Option<String>,
    /// Student email.
    #[serde(default)]
    pub student_email: Option<String>,
    /// Course code of the session.
    #[serde(default)]
    pub course_code: Option<String>,
    /// Name of the session.
    #[serde(default, alias = "session_title")]
    pub session_name: Option<String>,
    /// Verification status.
    #[serde(default)]
    pub status: CheckInStatus,
    /// When the student checked in.
    #[serde(default, deserialize_with = "timestamp::lenient", alias = "timestamp")]
    pub checked_in_at: Option<DateTime<Utc>>,
    /// Risk score between 0 and 1.
    #[serde(default)]
    pub risk_score: Option<f64>,
    /// Contributions to the risk score.
    #[serde(default)]
    pub risk_factors: Vec<RiskFactor>,
    /// Why the check-in was flagged.
    #[serde(default)]
    pub flag_reasons: Vec<String>,
    /// Distance from the venue in metres.
    #[serde(default, alias = "distance_from_venue")]
    pub distance_from_venue_meters: Option<f64>,
    /// Liveness check outcome.
    #[serde(default)]
    pub liveness_passed: Option<bool>,
    /// How the check-in was verified.
    #[serde(default)]
    pub verification_method: Option<String>,
    /// The student's appeal, if any.
    #[serde(default)]
    pub appeal_reason: Option<String>,
    /// Reviewer notes.
    #[serde(default)]
    pub review_notes: Option<String>,
}

impl CheckIn {
    /// Risk bucket, if a score is known.
    pub fn risk_level(&self) -> Option<RiskLevel> {
        self.risk_score.map(RiskLevel::from_score)
    }

    /// Display name, falling back to the email.
    pub fn student_label(&self) -> &str {
        self.student_name
            .as_deref()
            .or(self.student_email.as_deref())
            .unwrap_or("Unknown")
    }

    /// Case-insensitive match of `term` against name and email.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        [&self.student_name, &self.student_email]
            .into_iter()
            .flatten()
            .any(|value| value.to_lowercase().contains(&term))
    }

    /// Whether this check-in belongs to `session_id`.
    pub fn is_for_session(&self, session_id: &str) -> bool {
        self.session_id.as_deref() == Some(session_id)
    }
}

/// Body of `POST /checkins/{id}/review`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCheckIn {
    /// Decision.
    pub status: ReviewDecision,
    /// Free-text notes, empty when none were given.
    #[serde(default)]
    pub review_notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        let checkin: CheckIn = serde_json::from_str(
            r#"{"id": "k1", "timestamp": "2024-03-01T09:05:00Z", "distance_from_venue": 42.0,
                "session_title": "Lecture 2", "status": "flagged", "risk_score": 0.72,
                "risk_factors": [{"type": "distance", "weight": 0.4}]}"#,
        )
        .unwrap();
        assert!(checkin.checked_in_at.is_some());
        assert_eq!(checkin.distance_from_venue_meters, Some(42.0));
        assert_eq!(checkin.session_name.as_deref(), Some("Lecture 2"));
        assert_eq!(checkin.risk_level(), Some(RiskLevel::High));
        assert_eq!(checkin.risk_factors[0].kind, "distance");
    }

    #[test]
    fn test_search() {
        let checkin = CheckIn {
            id: "k1".into(),
            student_name: Some("Alice Tan".into()),
            student_email: Some("alice@u.edu".into()),
            ..CheckIn::default()
        };
        assert!(checkin.matches_search("ALICE"));
        assert!(checkin.matches_search("u.edu"));
        assert!(checkin.matches_search(""));
        assert!(!checkin.matches_search("bob"));
    }

    #[test]
    fn test_review_body() {
        let body = serde_json::to_value(ReviewCheckIn {
            status: ReviewDecision::Approved,
            review_notes: String::new(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"status": "approved", "review_notes": ""}));
    }
}
