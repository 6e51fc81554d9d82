//! System health indicators derived from overview statistics.

use serde::Serialize;

use super::overview::OverviewStats;

/// Severity of a health indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthLevel {
    /// All good.
    Success,
    /// Informational.
    Info,
    /// Needs attention.
    Warning,
}

impl HealthLevel {
    /// CSS class.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "alert-success",
            Self::Info => "alert-info",
            Self::Warning => "alert-warning",
        }
    }
}

/// One line of the system health panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthIndicator {
    /// Severity.
    pub level: HealthLevel,
    /// Text.
    pub message: String,
}

impl HealthIndicator {
    fn new(level: HealthLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Approval-rate indicator.
    pub fn approval(rate: f64) -> Self {
        if rate >= 90.0 {
            Self::new(HealthLevel::Success, "Excellent - High approval rate")
        } else if rate >= 75.0 {
            Self::new(HealthLevel::Info, "Good - Moderate approval rate")
        } else {
            Self::new(HealthLevel::Warning, "Attention Needed - Low approval rate")
        }
    }

    /// Flagged-items indicator.
    pub fn flagged(count: u64) -> Self {
        match count {
            0 => Self::new(HealthLevel::Success, "No items flagged for review"),
            n if n < 10 => Self::new(HealthLevel::Info, format!("{n} items need review")),
            n => Self::new(HealthLevel::Warning, format!("{n} items need review")),
        }
    }

    /// Active-sessions indicator.
    pub fn active_sessions(count: u64) -> Self {
        if count > 0 {
            Self::new(HealthLevel::Success, format!("{count} active session(s)"))
        } else {
            Self::new(HealthLevel::Info, "No active sessions")
        }
    }

    /// All three indicators for an overview.
    pub fn for_overview(stats: &OverviewStats) -> [Self; 3] {
        [
            Self::approval(stats.approval_rate),
            Self::flagged(stats.flagged_checkins),
            Self::active_sessions(stats.active_sessions),
        ]
    }
}
