//! Risk score buckets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound of the medium bucket.
pub const MEDIUM_RISK_FLOOR: f64 = 0.3;
/// Lower bound of the high bucket.
pub const HIGH_RISK_FLOOR: f64 = 0.6;

/// Bucket of a 0–1 risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    /// Score below 0.3.
    Low,
    /// Score in `[0.3, 0.6)`.
    Medium,
    /// Score of 0.6 or more.
    High,
}

impl RiskLevel {
    /// Bucket a score.
    pub fn from_score(score: f64) -> Self {
        if score < MEDIUM_RISK_FLOOR {
            Self::Low
        } else if score < HIGH_RISK_FLOOR {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Upper-case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    /// Colour name used by charts and text.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Low => "green",
            Self::Medium => "orange",
            Self::High => "red",
        }
    }

    /// CSS badge class.
    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::Low => "success-badge",
            Self::Medium => "warning-badge",
            Self::High => "danger-badge",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buckets() {
        assert_eq!(RiskLevel::from_score(0.75), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(0.45), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(0.2), RiskLevel::Low);
    }

    #[test]
    fn test_boundaries_are_inclusive_below() {
        assert_eq!(RiskLevel::from_score(0.3), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(0.6), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
    }

    #[test]
    fn test_colors() {
        assert_eq!(RiskLevel::Low.color(), "green");
        assert_eq!(RiskLevel::Medium.color(), "orange");
        assert_eq!(RiskLevel::High.color(), "red");
    }
}
