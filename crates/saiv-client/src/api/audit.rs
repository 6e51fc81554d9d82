//! `/audit` endpoint.

use saiv_core::AppResult;
use saiv_core::types::{ListResponse, PageResponse};
use saiv_entity::audit::{AuditFilter, AuditLogEntry};

use crate::session::ClientSession;

impl ClientSession {
    /// `GET /audit/` with the filter's query parameters.
    pub async fn audit_logs(&self, filter: &AuditFilter) -> AppResult<PageResponse<AuditLogEntry>> {
        let list: ListResponse<AuditLogEntry> = self.get("/audit/", &filter.to_query()).await?;
        Ok(PageResponse::from_list(list, filter.page))
    }
}
