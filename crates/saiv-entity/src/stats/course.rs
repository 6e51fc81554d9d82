//! Per-course statistics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Attendance of one session in a course trend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionTrend {
    /// Session date.
    pub date: NaiveDate,
    /// Attendance rate in percent.
    #[serde(default)]
    pub attendance_rate: f64,
    /// Session name.
    #[serde(default)]
    pub session_name: Option<String>,
}

/// One session row of a course export preview.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseSessionSummary {
    /// Session name.
    pub name: String,
    /// Session date.
    pub date: Option<String>,
    /// Attendance rate as a fraction.
    pub attendance_rate: f64,
    /// Students checked in.
    pub checked_in: u64,
}

/// Response of `GET /stats/courses/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseStats {
    /// Course id.
    pub course_id: Option<String>,
    /// Enrolled students.
    #[serde(alias = "total_enrolled")]
    pub total_students: u64,
    /// Sessions in the course.
    pub total_sessions: u64,
    /// Check-ins across the course.
    pub total_checkins: u64,
    /// Mean attendance, in percent.
    pub average_attendance_rate: f64,
    /// Closed sessions.
    pub completed_sessions: u64,
    /// Scheduled sessions.
    pub upcoming_sessions: u64,
    /// Students below 75 % attendance.
    pub students_low_attendance: u64,
    /// Students at 100 % attendance.
    pub students_perfect_attendance: u64,
    /// Attendance per session over time.
    pub session_trends: Vec<SessionTrend>,
    /// Sessions included in an attendance export.
    pub sessions: Vec<CourseSessionSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_enrolled_alias() {
        let stats: CourseStats = serde_json::from_str(
            r#"{"total_enrolled": 40, "session_trends": [{"date": "2024-02-01", "attendance_rate": 88.0}]}"#,
        )
        .unwrap();
        assert_eq!(stats.total_students, 40);
        assert_eq!(stats.session_trends.len(), 1);
    }
}
