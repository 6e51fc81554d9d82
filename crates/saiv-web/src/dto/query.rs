//! Query-string DTOs.

use chrono::NaiveDate;
use serde::Deserialize;

use saiv_core::types::PageRequest;
use saiv_entity::audit::{AuditFilter, SuccessFilter};
use saiv_entity::audit::filter::DEFAULT_DAYS_BACK;

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// `?days=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DaysQuery {
    pub days: Option<u32>,
}

/// `?course_id=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseQuery {
    pub course_id: Option<String>,
}

impl CourseQuery {
    /// Selected course id, if any.
    pub fn selected(&self) -> Option<&str> {
        non_empty(&self.course_id)
    }
}

/// Query of the Sessions page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionsQuery {
    pub session_id: Option<String>,
    /// Check-in status filter; `all` or empty means no filter.
    pub status: Option<String>,
    /// Student name or email search.
    pub search: Option<String>,
}

impl SessionsQuery {
    pub fn selected(&self) -> Option<&str> {
        non_empty(&self.session_id)
    }

    pub fn status_filter(&self) -> Option<&str> {
        non_empty(&self.status).filter(|s| !s.eq_ignore_ascii_case("all"))
    }

    pub fn search_term(&self) -> Option<&str> {
        non_empty(&self.search)
    }
}

/// Query of the Audit Logs page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditQuery {
    pub action: Option<String>,
    pub resource_type: Option<String>,
    /// `all`, `success` or `failed`.
    pub success: Option<String>,
    /// `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// `YYYY-MM-DD`.
    pub end_date: Option<String>,
    /// Window ending today, used when no explicit dates are given.
    pub days: Option<i64>,
    /// Client-side user email filter.
    pub user: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    /// Index of the entry shown in the detail view.
    pub entry: Option<usize>,
}

impl AuditQuery {
    fn date(value: &Option<String>) -> Option<NaiveDate> {
        non_empty(value).and_then(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").ok())
    }

    /// Days-back window.
    pub fn days_back(&self) -> i64 {
        self.days.unwrap_or(DEFAULT_DAYS_BACK)
    }

    /// Backend filter for this query.
    pub fn to_filter(&self) -> AuditFilter {
        let success = match non_empty(&self.success) {
            Some("success") => SuccessFilter::Success,
            Some("failed") => SuccessFilter::Failed,
            _ => SuccessFilter::All,
        };
        let filter = AuditFilter {
            action: non_empty(&self.action).map(str::to_string),
            resource_type: non_empty(&self.resource_type).map(str::to_string),
            success,
            start_date: Self::date(&self.start_date),
            end_date: Self::date(&self.end_date),
            page: PageRequest::new(
                self.page.unwrap_or(1),
                self.page_size.unwrap_or(saiv_core::types::pagination::DEFAULT_PAGE_SIZE),
            ),
        };
        filter.with_days_back(self.days_back())
    }

    /// User email search term.
    pub fn user_term(&self) -> Option<&str> {
        non_empty(&self.user)
    }
}

/// `?format=` on export downloads, plus the course code used in the file name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
    pub code: Option<String>,
}

/// Query of the Reports page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportsQuery {
    pub course_id: Option<String>,
    pub session_id: Option<String>,
}

impl ReportsQuery {
    pub fn course(&self) -> Option<&str> {
        non_empty(&self.course_id)
    }

    pub fn session(&self) -> Option<&str> {
        non_empty(&self.session_id)
    }
}

/// Query of the Manage page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManageQuery {
    pub tab: Option<String>,
    pub course_id: Option<String>,
    pub session_id: Option<String>,
}

impl ManageQuery {
    pub fn course(&self) -> Option<&str> {
        non_empty(&self.course_id)
    }

    pub fn session(&self) -> Option<&str> {
        non_empty(&self.session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_query_to_filter() {
        let query = AuditQuery {
            action: Some("session_created".into()),
            resource_type: Some("".into()),
            success: Some("failed".into()),
            start_date: Some("2024-03-01".into()),
            end_date: Some("2024-03-07".into()),
            page: Some(3),
            page_size: Some(25),
            ..AuditQuery::default()
        };
        let filter = query.to_filter();
        assert_eq!(filter.action.as_deref(), Some("session_created"));
        assert!(filter.resource_type.is_none());
        assert_eq!(filter.success, SuccessFilter::Failed);
        assert_eq!(filter.start_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(filter.page.offset(), 50);
    }

    #[test]
    fn test_audit_query_days_back_fills_dates() {
        let filter = AuditQuery { days: Some(3), ..AuditQuery::default() }.to_filter();
        let (start, end) = (filter.start_date.unwrap(), filter.end_date.unwrap());
        assert_eq!((end - start).num_days(), 3);
    }

    #[test]
    fn test_sessions_query_filters() {
        let query = SessionsQuery {
            session_id: Some(" ".into()),
            status: Some("All".into()),
            search: Some(" ann ".into()),
        };
        assert!(query.selected().is_none());
        assert!(query.status_filter().is_none());
        assert_eq!(query.search_term(), Some("ann"));
    }
}
