//! Per-session statistics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Check-in counts per risk bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskDistribution {
    /// Below 0.3.
    pub low: u64,
    /// Medium.
    pub medium: u64,
    /// High.
    pub high: u64,
}

impl RiskDistribution {
    /// Sum of all buckets.
    pub fn total(&self) -> u64 {
        self.low + self.medium + self.high
    }
}

/// Check-ins in one minute after the session start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelinePoint {
    /// Minutes after the start.
    pub minute: i64,
    /// Check-ins in that minute.
    pub count: u64,
}

/// Response of `GET /stats/sessions/{id}`.
///
/// `attendance_rate` is a fraction between 0 and 1.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionStats {
    /// Session id.
    pub session_id: Option<String>,
    /// Students enrolled in the course.
    pub total_enrolled: u64,
    /// Students who checked in.
    pub checked_in: u64,
    /// `checked_in / total_enrolled`.
    pub attendance_rate: f64,
    /// Mean risk score.
    pub average_risk_score: f64,
    /// Check-in counts keyed by status.
    pub by_status: BTreeMap<String, u64>,
    /// Check-in counts per risk bucket.
    pub risk_distribution: RiskDistribution,
    /// Check-ins per minute after the start.
    pub checkin_timeline: Vec<TimelinePoint>,
    /// Students expected.
    pub expected_attendance: u64,
    /// Students present.
    pub actual_attendance: u64,
}

impl SessionStats {
    /// Attendance as a percentage.
    pub fn attendance_percent(&self) -> f64 {
        self.attendance_rate * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_stats() {
        let stats: SessionStats = serde_json::from_str(
            r#"{"total_enrolled": 40, "checked_in": 30, "attendance_rate": 0.75,
                "by_status": {"approved": 25, "flagged": 5},
                "risk_distribution": {"low": 20, "medium": 8},
                "checkin_timeline": [{"minute": -5, "count": 3}, {"minute": 0, "count": 10}]}"#,
        )
        .unwrap();
        assert_eq!(stats.attendance_percent(), 75.0);
        assert_eq!(stats.by_status["flagged"], 5);
        assert_eq!(stats.risk_distribution.total(), 28);
        assert_eq!(stats.checkin_timeline[0].minute, -5);
    }
}
