//! Overview statistics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::checkin::CheckIn;

/// Check-ins and sessions on one day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyTrend {
    /// Day.
    pub date: NaiveDate,
    /// Check-ins that day.
    #[serde(default)]
    pub checkins: u64,
    /// Sessions that day.
    #[serde(default)]
    pub sessions: u64,
}

/// Response of `GET /stats/overview?days=N`.
///
/// `approval_rate` and `average_attendance_rate` are percentages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OverviewStats {
    /// Sessions across all courses.
    pub total_sessions: u64,
    /// Check-ins across all sessions.
    pub total_checkins: u64,
    /// Enrolled students.
    pub total_students: u64,
    /// Courses.
    pub total_courses: u64,
    /// Sessions currently open for check-in.
    pub active_sessions: u64,
    /// Check-ins recorded today.
    pub total_checkins_today: u64,
    /// Approved share of check-ins, in percent.
    pub approval_rate: f64,
    /// Mean attendance across courses, in percent.
    pub average_attendance_rate: f64,
    /// Approved check-ins.
    pub approved_checkins: u64,
    /// Pending check-ins.
    pub pending_checkins: u64,
    /// Rejected check-ins.
    pub rejected_checkins: u64,
    /// Flagged check-ins.
    pub flagged_checkins: u64,
    /// Check-ins scored below 0.3.
    pub low_risk_checkins: u64,
    /// Check-ins scored in `[0.3, 0.6)`.
    pub medium_risk_checkins: u64,
    /// Check-ins scored 0.6 or above.
    pub high_risk_checkins: u64,
    /// Per-day activity, when the backend includes it.
    pub daily_trends: Vec<DailyTrend>,
    /// Latest check-ins, when the backend includes them.
    pub recent_checkins: Vec<CheckIn>,
}

impl OverviewStats {
    /// `(label, count)` pairs for the status pie.
    pub fn status_breakdown(&self) -> Vec<(&'static str, u64)> {
        vec![
            ("Approved", self.approved_checkins),
            ("Pending", self.pending_checkins),
            ("Rejected", self.rejected_checkins),
            ("Flagged", self.flagged_checkins),
        ]
    }

    /// `(label, count)` pairs for the risk pie.
    pub fn risk_breakdown(&self) -> Vec<(&'static str, u64)> {
        vec![
            ("Low", self.low_risk_checkins),
            ("Medium", self.medium_risk_checkins),
            ("High", self.high_risk_checkins),
        ]
    }
}
