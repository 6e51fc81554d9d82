//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles known to the SAIV backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Attends sessions and checks in.
    #[default]
    Student,
    /// Teaching assistant.
    Ta,
    /// Course instructor.
    Instructor,
    /// System administrator.
    Admin,
    /// Any role this dashboard does not know about.
    #[serde(other)]
    Other,
}

impl UserRole {
    /// Whether the role may sign in to the dashboard.
    pub fn can_access_dashboard(&self) -> bool {
        matches!(self, Self::Instructor | Self::Ta | Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Ta => "ta",
            Self::Instructor => "instructor",
            Self::Admin => "admin",
            Self::Other => "other",
        }
    }

    /// Label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Ta => "TA",
            Self::Instructor => "Instructor",
            Self::Admin => "Admin",
            Self::Other => "Unknown",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = saiv_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "ta" => Ok(Self::Ta),
            "instructor" => Ok(Self::Instructor),
            "admin" => Ok(Self::Admin),
            _ => Err(saiv_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: student, ta, instructor, admin"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_access() {
        assert!(UserRole::Instructor.can_access_dashboard());
        assert!(UserRole::Ta.can_access_dashboard());
        assert!(UserRole::Admin.can_access_dashboard());
        assert!(!UserRole::Student.can_access_dashboard());
        assert!(!UserRole::Other.can_access_dashboard());
    }

    #[test]
    fn test_unknown_role_deserializes() {
        let role: UserRole = serde_json::from_str(r#""registrar""#).unwrap();
        assert_eq!(role, UserRole::Other);
    }
}
