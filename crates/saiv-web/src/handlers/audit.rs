//! Audit log browser.

use axum::extract::Query;
use axum::response::{Html, Response};

use saiv_core::format::{format_timestamp, truncate_text, NOT_AVAILABLE};
use saiv_core::types::pagination::{DEFAULT_PAGE_SIZE, PAGE_SIZES};
use saiv_entity::audit::{AuditLogEntry, KNOWN_ACTIONS, RESOURCE_TYPES};

use crate::dto::query::AuditQuery;
use crate::extractors::{CurrentSession, Flash};
use crate::render::components::{alert, error_panel, link_button, section, select, table, AlertKind};
use crate::render::escape;
use crate::render::html::query_string;
use crate::render::layout;

fn choices<'a>(all_label: &str, values: impl IntoIterator<Item = &'a str>) -> Vec<(String, String)> {
    let mut out = vec![(String::new(), all_label.to_string())];
    out.extend(values.into_iter().map(|v| (v.to_string(), v.to_string())));
    out
}

/// Link to the audit page with the current filters and a different page or entry.
pub fn audit_href(query: &AuditQuery, page: u64, entry: Option<usize>) -> String {
    let days = query.days.map(|d| d.to_string()).unwrap_or_default();
    let page = page.to_string();
    let page_size = query.page_size.map(|s| s.to_string()).unwrap_or_default();
    let entry = entry.map(|e| e.to_string()).unwrap_or_default();
    let pairs = [
        ("action", query.action.as_deref().unwrap_or("")),
        ("resource_type", query.resource_type.as_deref().unwrap_or("")),
        ("success", query.success.as_deref().unwrap_or("")),
        ("start_date", query.start_date.as_deref().unwrap_or("")),
        ("end_date", query.end_date.as_deref().unwrap_or("")),
        ("days", days.as_str()),
        ("user", query.user.as_deref().unwrap_or("")),
        ("page", page.as_str()),
        ("page_size", page_size.as_str()),
        ("entry", entry.as_str()),
    ];
    format!("/audit{}", query_string(&pairs))
}

fn filter_form(query: &AuditQuery) -> String {
    let success = vec![
        ("all".to_string(), "All".to_string()),
        ("success".to_string(), "Success".to_string()),
        ("failed".to_string(), "Failed".to_string()),
    ];
    let sizes: Vec<(String, String)> = PAGE_SIZES
        .iter()
        .map(|s| (s.to_string(), s.to_string()))
        .collect();
    let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE).to_string();
    format!(
        concat!(
            r#"<form method="get" action="/audit" class="filters">"#,
            "<label>Action {}</label><label>Resource {}</label><label>Result {}</label>",
            r#"<label>From <input type="date" name="start_date" value="{}"></label>"#,
            r#"<label>To <input type="date" name="end_date" value="{}"></label>"#,
            r#"<label>Days back <input type="number" name="days" min="1" max="365" value="{}"></label>"#,
            r#"<label>User email <input type="text" name="user" value="{}"></label>"#,
            "<label>Page size {}</label>",
            r#"<button type="submit" class="btn">Apply</button></form>"#
        ),
        select("action", &choices("All actions", KNOWN_ACTIONS), query.action.as_deref()),
        select("resource_type", &choices("All resources", RESOURCE_TYPES), query.resource_type.as_deref()),
        select("success", &success, Some(query.success.as_deref().unwrap_or("all"))),
        escape(query.start_date.as_deref().unwrap_or("")),
        escape(query.end_date.as_deref().unwrap_or("")),
        query.days_back(),
        escape(query.user.as_deref().unwrap_or("")),
        select("page_size", &sizes, Some(&page_size)),
    )
}

fn entry_table(entries: &[&AuditLogEntry], query: &AuditQuery, page: u64) -> String {
    let rows: Vec<Vec<String>> = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let resource = match (&entry.resource_type, &entry.resource_id) {
                (Some(kind), Some(id)) => format!("{kind}/{}", truncate_text(id, 12)),
                (Some(kind), None) => kind.clone(),
                _ => NOT_AVAILABLE.to_string(),
            };
            let outcome_class = if entry.success { "badge-success" } else { "badge-danger" };
            vec![
                escape(&format_timestamp(entry.timestamp.as_ref())),
                escape(entry.actor()),
                escape(&entry.action),
                escape(&resource),
                format!(r#"<span class="badge {outcome_class}">{}</span>"#, entry.outcome()),
                escape(entry.ip_address.as_deref().unwrap_or(NOT_AVAILABLE)),
                format!(
                    r#"<a href="{}">View</a>"#,
                    escape(&audit_href(query, page, Some(index)))
                ),
            ]
        })
        .collect();
    table(
        &["Time", "User", "Action", "Resource", "Result", "IP Address", ""],
        &rows,
    )
}

/// Every field of one entry, with details pretty-printed.
pub fn entry_detail(entry: &AuditLogEntry) -> String {
    let text = |value: &Option<String>| escape(value.as_deref().unwrap_or(NOT_AVAILABLE));
    let details = entry
        .details
        .as_ref()
        .and_then(|d| serde_json::to_string_pretty(d).ok())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let rows = [
        ("ID", text(&entry.id)),
        ("Timestamp", escape(&format_timestamp(entry.timestamp.as_ref()))),
        ("User", escape(entry.actor())),
        ("Action", escape(&entry.action)),
        ("Resource Type", text(&entry.resource_type)),
        ("Resource ID", text(&entry.resource_id)),
        ("Result", entry.outcome().to_string()),
        ("IP Address", text(&entry.ip_address)),
        ("User Agent", text(&entry.user_agent)),
        ("Device ID", text(&entry.device_id)),
        ("Request ID", text(&entry.request_id)),
        ("Error", text(&entry.error_message)),
    ];
    let mut out = String::from(r#"<dl class="details">"#);
    for (label, value) in rows {
        out.push_str(&format!("<dt>{label}</dt><dd>{value}</dd>"));
    }
    out.push_str(&format!("</dl><pre>{}</pre>", escape(&details)));
    out
}

/// GET /audit
pub async fn audit(
    current: CurrentSession,
    Query(flash): Query<Flash>,
    Query(query): Query<AuditQuery>,
) -> Result<Html<String>, Response> {
    let filter = query.to_filter();
    let mut body = section("Filters", &filter_form(&query));

    let page = match current.check(current.client().audit_logs(&filter).await)? {
        Ok(page) => page,
        Err(err) => {
            body.push_str(&error_panel(&err));
            return Ok(layout::page("Audit Logs", "/audit", current.user(), &flash, &body));
        }
    };

    let entries: Vec<&AuditLogEntry> = page
        .items
        .iter()
        .filter(|e| query.user_term().is_none_or(|term| e.matches_user(term)))
        .collect();

    if let Some(entry) = query.entry.and_then(|i| entries.get(i)) {
        let detail = format!(
            "{}{}",
            entry_detail(entry),
            link_button("Back to list", &audit_href(&query, page.page, None))
        );
        body.push_str(&section("Entry Detail", &detail));
    }

    let mut listing = format!(
        "<p>Page {} of {} ({} entries)</p>",
        page.page,
        page.total_pages.max(1),
        page.total_items
    );
    if entries.is_empty() {
        listing.push_str(&alert(AlertKind::Info, "No audit entries match these filters."));
    } else {
        listing.push_str(&entry_table(&entries, &query, page.page));
    }
    let mut nav = String::from(r#"<div class="pagination">"#);
    if page.has_previous {
        nav.push_str(&link_button("Previous", &audit_href(&query, page.page - 1, None)));
    }
    if page.has_next {
        nav.push_str(&link_button("Next", &audit_href(&query, page.page + 1, None)));
    }
    nav.push_str("</div>");
    listing.push_str(&nav);
    body.push_str(&section("Entries", &listing));

    Ok(layout::page("Audit Logs", "/audit", current.user(), &flash, &body))
}
