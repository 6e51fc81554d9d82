//! Audit log CLI commands.

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use super::Credentials;
use crate::output::{self, OutputFormat};
use saiv_core::error::AppError;
use saiv_core::format::{format_timestamp, truncate_text};
use saiv_core::types::pagination::DEFAULT_PAGE_SIZE;
use saiv_entity::audit::filter::DEFAULT_DAYS_BACK;
use saiv_entity::audit::AuditLogEntry;
use saiv_web::dto::query::AuditQuery;

/// Arguments for audit commands
#[derive(Debug, Args)]
pub struct AuditArgs {
    /// Audit subcommand
    #[command(subcommand)]
    pub command: AuditCommand,
}

/// Audit subcommands
#[derive(Debug, Subcommand)]
pub enum AuditCommand {
    /// Search audit log
    Search {
        /// Filter by action, e.g. login_failed
        #[arg(short, long)]
        action: Option<String>,
        /// Filter by resource type
        #[arg(short, long)]
        resource_type: Option<String>,
        /// all, success or failed
        #[arg(long, default_value = "all")]
        result: String,
        /// First day included (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Last day included (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Days of history when no dates are given
        #[arg(short, long, default_value_t = DEFAULT_DAYS_BACK)]
        days: i64,
        /// Filter by user email (substring)
        #[arg(short, long)]
        user: Option<String>,
        /// Page number
        #[arg(short, long, default_value = "1")]
        page: u64,
        /// Number of results per page
        #[arg(short, long, default_value_t = DEFAULT_PAGE_SIZE)]
        limit: u64,
    },
}

/// Audit display row
#[derive(Debug, Serialize, Tabled)]
struct AuditRow {
    /// Time
    time: String,
    /// User
    user: String,
    /// Action
    action: String,
    /// Resource
    resource: String,
    /// Result
    result: String,
    /// IP
    ip: String,
    /// Error
    error: String,
}

impl From<&AuditLogEntry> for AuditRow {
    fn from(e: &AuditLogEntry) -> Self {
        Self {
            time: format_timestamp(e.timestamp.as_ref()),
            user: e.actor().to_string(),
            action: e.action.clone(),
            resource: e.resource_type.clone().unwrap_or_else(|| "-".to_string()),
            result: e.outcome().to_string(),
            ip: e.ip_address.clone().unwrap_or_else(|| "-".to_string()),
            error: truncate_text(e.error_message.as_deref().unwrap_or(""), 40),
        }
    }
}

fn check_date(value: &Option<String>, label: &str) -> Result<(), AppError> {
    match value {
        Some(v) if NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").is_err() => Err(
            AppError::validation(format!("{label} must be a date in YYYY-MM-DD form")),
        ),
        _ => Ok(()),
    }
}

/// Execute audit commands
pub async fn execute(
    args: &AuditArgs,
    config_path: &str,
    creds: &Credentials,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        AuditCommand::Search {
            action,
            resource_type,
            result,
            from,
            to,
            days,
            user,
            page,
            limit,
        } => {
            check_date(from, "--from")?;
            check_date(to, "--to")?;
            if !matches!(result.as_str(), "all" | "success" | "failed") {
                return Err(AppError::validation(
                    "--result must be one of: all, success, failed",
                ));
            }

            let query = AuditQuery {
                action: action.clone(),
                resource_type: resource_type.clone(),
                success: Some(result.clone()),
                start_date: from.clone(),
                end_date: to.clone(),
                days: Some(*days),
                user: user.clone(),
                page: Some(*page),
                page_size: Some(*limit),
                entry: None,
            };
            let client = super::connect(config_path, creds).await?;
            let entries = client.audit_logs(&query.to_filter()).await?;

            let rows: Vec<AuditRow> = entries
                .items
                .iter()
                .filter(|e| query.user_term().is_none_or(|term| e.matches_user(term)))
                .map(AuditRow::from)
                .collect();
            output::print_list(&rows, format);
            if format == OutputFormat::Table {
                println!(
                    "Page {} of {} ({} entries)",
                    entries.page,
                    entries.total_pages.max(1),
                    entries.total_items
                );
            }
        }
    }

    Ok(())
}
