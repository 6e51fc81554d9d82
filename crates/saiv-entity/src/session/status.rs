//! Session status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a session.
///
/// A record with a missing or unrecognised status reads as `Unknown`, which
/// permits no status change and no deletion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Created and waiting to be opened for check-in.
    Scheduled,
    /// Students can currently check in.
    Active,
    /// Attendance has been finalized.
    Closed,
    /// Abandoned before or during the meeting.
    Cancelled,
    /// Missing or not understood by the dashboard.
    #[default]
    #[serde(other)]
    Unknown,
}

impl SessionStatus {
    /// All lifecycle statuses in order. `Unknown` is not one of them.
    pub const ALL: [SessionStatus; 4] = [
        Self::Scheduled,
        Self::Active,
        Self::Closed,
        Self::Cancelled,
    ];

    /// Check if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Cancelled)
    }

    /// Check if the session still expects attendance (scheduled or active).
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Scheduled | Self::Active)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Active => "active",
            Self::Closed => "closed",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }

    /// Capitalized label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Active => "Active",
            Self::Closed => "Closed",
            Self::Cancelled => "Cancelled",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = saiv_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scheduled" => Ok(Self::Scheduled),
            "active" => Ok(Self::Active),
            "closed" => Ok(Self::Closed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(saiv_core::AppError::validation(format!(
                "Invalid session status: '{s}'. Expected one of: scheduled, active, closed, cancelled"
            ))),
        }
    }
}
