//! Audit log query filters.

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use saiv_core::types::PageRequest;
use serde::{Deserialize, Serialize};

/// Actions offered by the action filter.
pub const KNOWN_ACTIONS: [&str; 18] = [
    "login_success",
    "login_failed",
    "logout",
    "user_created",
    "user_updated",
    "checkin_attempted",
    "checkin_approved",
    "checkin_flagged",
    "checkin_rejected",
    "checkin_appealed",
    "checkin_reviewed",
    "session_created",
    "session_updated",
    "session_deleted",
    "enrollment_added",
    "enrollment_removed",
    "device_registered",
    "face_enrolled",
];

/// Resource types offered by the resource filter.
pub const RESOURCE_TYPES: [&str; 6] = ["user", "session", "checkin", "course", "device", "enrollment"];

/// Default look-back window when no start date is given.
pub const DEFAULT_DAYS_BACK: i64 = 7;

/// Success filter choices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuccessFilter {
    /// No filter.
    #[default]
    All,
    /// Successful actions only.
    Success,
    /// Failed actions only.
    Failed,
}

impl SuccessFilter {
    /// Query value, if any.
    pub fn as_query(&self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Success => Some("true"),
            Self::Failed => Some("false"),
        }
    }
}

/// Filters for `GET /audit/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditFilter {
    /// Action name.
    pub action: Option<String>,
    /// Resource type.
    pub resource_type: Option<String>,
    /// Success filter.
    pub success: SuccessFilter,
    /// First day included.
    pub start_date: Option<NaiveDate>,
    /// Last day included.
    pub end_date: Option<NaiveDate>,
    /// Page to fetch.
    pub page: PageRequest,
}

impl AuditFilter {
    /// Fill in the date range from a days-back window ending today.
    pub fn with_days_back(mut self, days: i64) -> Self {
        let today = Utc::now().date_naive();
        if self.end_date.is_none() {
            self.end_date = Some(today);
        }
        if self.start_date.is_none() {
            self.start_date = Some(today - Duration::days(days.clamp(1, 365)));
        }
        self
    }

    /// Query string pairs in the order the backend documents them.
    ///
    /// The start date covers the whole first day and the end date the whole
    /// last day. `"All"` or empty action/resource values are dropped.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("limit", self.page.limit().to_string()),
            ("offset", self.page.offset().to_string()),
        ];
        if let Some(action) = non_empty(self.action.as_deref()) {
            pairs.push(("action", action.to_string()));
        }
        if let Some(resource) = non_empty(self.resource_type.as_deref()) {
            pairs.push(("resource_type", resource.to_string()));
        }
        if let Some(success) = self.success.as_query() {
            pairs.push(("success", success.to_string()));
        }
        if let Some(start) = self.start_date {
            pairs.push(("start_date", start.and_time(NaiveTime::MIN).format("%Y-%m-%dT%H:%M:%S").to_string()));
        }
        if let Some(end) = self.end_date {
            let end_of_day = NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).unwrap_or(NaiveTime::MIN);
            pairs.push(("end_date", end.and_time(end_of_day).format("%Y-%m-%dT%H:%M:%S%.6f").to_string()));
        }
        pairs
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs() {
        let filter = AuditFilter {
            action: Some("login_failed".into()),
            resource_type: Some("All".into()),
            success: SuccessFilter::Failed,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 7),
            page: PageRequest::new(2, 25),
        };
        let query = filter.to_query();
        assert_eq!(
            query,
            vec![
                ("limit", "25".to_string()),
                ("offset", "25".to_string()),
                ("action", "login_failed".to_string()),
                ("success", "false".to_string()),
                ("start_date", "2024-03-01T00:00:00".to_string()),
                ("end_date", "2024-03-07T23:59:59.999999".to_string()),
            ]
        );
    }

    #[test]
    fn test_days_back_fills_missing_dates() {
        let filter = AuditFilter::default().with_days_back(7);
        let (start, end) = (filter.start_date.unwrap(), filter.end_date.unwrap());
        assert_eq!((end - start).num_days(), 7);
    }

    #[test]
    fn test_known_actions() {
        assert!(KNOWN_ACTIONS.contains(&"checkin_reviewed"));
        assert!(RESOURCE_TYPES.contains(&"course"));
    }
}
