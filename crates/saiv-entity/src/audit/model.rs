//! Audit log entry model.

use chrono::{DateTime, Utc};
use saiv_core::types::timestamp;
use serde::{Deserialize, Serialize};

/// A single audit trail record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Unique entry identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// When the action happened.
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Acting user; absent for system actions.
    #[serde(default)]
    pub user_email: Option<String>,
    /// Action name, e.g. `login_success`.
    #[serde(default)]
    pub action: String,
    /// Type of the affected resource.
    #[serde(default)]
    pub resource_type: Option<String>,
    /// Identifier of the affected resource.
    #[serde(default)]
    pub resource_id: Option<String>,
    /// Whether the action succeeded.
    #[serde(default)]
    pub success: bool,
    /// Client IP address.
    #[serde(default)]
    pub ip_address: Option<String>,
    /// Client user agent.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Registered device identifier.
    #[serde(default)]
    pub device_id: Option<String>,
    /// Request correlation id.
    #[serde(default)]
    pub request_id: Option<String>,
    /// Failure description.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Free-form details.
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

impl AuditLogEntry {
    /// Acting user or `"System"`.
    pub fn actor(&self) -> &str {
        self.user_email.as_deref().unwrap_or("System")
    }

    /// `"Success"` or `"Failed"`.
    pub fn outcome(&self) -> &'static str {
        if self.success { "Success" } else { "Failed" }
    }

    /// Case-insensitive match of `term` against the user email.
    pub fn matches_user(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self
                .user_email
                .as_deref()
                .is_some_and(|email| email.to_lowercase().contains(&term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_actor_and_search() {
        let entry: AuditLogEntry =
            serde_json::from_str(r#"{"action": "session_created", "success": true}"#).unwrap();
        assert_eq!(entry.actor(), "System");
        assert_eq!(entry.outcome(), "Success");
        assert!(entry.matches_user(""));
        assert!(!entry.matches_user("alice"));

        let entry = AuditLogEntry {
            user_email: Some("Alice@U.edu".into()),
            ..AuditLogEntry::default()
        };
        assert!(entry.matches_user("alice"));
        assert_eq!(entry.outcome(), "Failed");
    }
}
