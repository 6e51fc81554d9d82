//! Check-in status and review decision enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Verification status of a check-in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckInStatus {
    /// Awaiting automatic or manual review.
    #[default]
    Pending,
    /// Accepted.
    Approved,
    /// Held for instructor review.
    Flagged,
    /// Refused.
    Rejected,
    /// Refused and contested by the student.
    Appealed,
    /// Not understood by the dashboard.
    #[serde(other)]
    Unknown,
}

impl CheckInStatus {
    /// Statuses offered by the check-in table filter.
    pub const FILTERABLE: [CheckInStatus; 4] =
        [Self::Approved, Self::Flagged, Self::Rejected, Self::Pending];

    /// Whether an instructor may approve or reject this check-in.
    pub fn is_reviewable(&self) -> bool {
        matches!(self, Self::Pending | Self::Flagged | Self::Appealed)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Flagged => "flagged",
            Self::Rejected => "rejected",
            Self::Appealed => "appealed",
            Self::Unknown => "unknown",
        }
    }

    /// CSS badge class.
    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::Approved => "success-badge",
            Self::Pending => "warning-badge",
            Self::Rejected | Self::Flagged => "danger-badge",
            Self::Appealed => "info-badge",
            Self::Unknown => "badge-secondary",
        }
    }
}

impl fmt::Display for CheckInStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CheckInStatus {
    type Err = saiv_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "flagged" => Ok(Self::Flagged),
            "rejected" => Ok(Self::Rejected),
            "appealed" => Ok(Self::Appealed),
            _ => Err(saiv_core::AppError::validation(format!(
                "Invalid check-in status: '{s}'. Expected one of: pending, approved, flagged, rejected, appealed"
            ))),
        }
    }
}

/// Outcome of an instructor review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    /// Accept the check-in.
    Approved,
    /// Refuse the check-in.
    Rejected,
}

impl ReviewDecision {
    /// Return the decision as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ReviewDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReviewDecision {
    type Err = saiv_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "approve" | "approved" => Ok(Self::Approved),
            "reject" | "rejected" => Ok(Self::Rejected),
            _ => Err(saiv_core::AppError::validation(format!(
                "Invalid review decision: '{s}'. Expected approve or reject"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badges() {
        assert_eq!(CheckInStatus::Approved.badge_class(), "success-badge");
        assert_eq!(CheckInStatus::Pending.badge_class(), "warning-badge");
        assert_eq!(CheckInStatus::Rejected.badge_class(), "danger-badge");
        assert_eq!(CheckInStatus::Flagged.badge_class(), "danger-badge");
    }

    #[test]
    fn test_unrecognised_status() {
        let statuses: Vec<CheckInStatus> =
            serde_json::from_str(r#"["approved", "escalated"]"#).unwrap();
        assert_eq!(statuses, vec![CheckInStatus::Approved, CheckInStatus::Unknown]);
        assert!(!CheckInStatus::Unknown.is_reviewable());
        assert_eq!(CheckInStatus::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_review_decision_parse() {
        assert_eq!("approve".parse::<ReviewDecision>().unwrap(), ReviewDecision::Approved);
        assert_eq!("Rejected".parse::<ReviewDecision>().unwrap(), ReviewDecision::Rejected);
        assert!("maybe".parse::<ReviewDecision>().is_err());
    }
}
