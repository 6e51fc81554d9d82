//! Check-in listing and review CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use super::Credentials;
use crate::output::{self, OutputFormat};
use saiv_core::error::AppError;
use saiv_core::format::{format_distance, format_risk_score, format_timestamp, truncate_text};
use saiv_entity::checkin::{CheckIn, CheckInStatus, ReviewDecision};

/// Arguments for check-in commands
#[derive(Debug, Args)]
pub struct CheckinArgs {
    /// Check-in subcommand
    #[command(subcommand)]
    pub command: CheckinCommand,
}

/// Check-in subcommands
#[derive(Debug, Subcommand)]
pub enum CheckinCommand {
    /// List the check-ins of a session
    List {
        /// Session ID
        session: String,
        /// Filter by status
        #[arg(long)]
        status: Option<String>,
        /// Filter by student name or email
        #[arg(short, long)]
        search: Option<String>,
    },
    /// List check-ins flagged for review
    Flagged {
        /// Number of results (defaults to `backend.flagged_limit`)
        #[arg(short, long)]
        limit: Option<u32>,
        /// Restrict to one session
        #[arg(long)]
        session: Option<String>,
    },
    /// Approve or reject a check-in
    Review {
        /// Check-in ID
        id: String,
        /// approve or reject
        decision: String,
        /// Review notes
        #[arg(short, long, default_value = "")]
        notes: String,
    },
}

/// Check-in display row
#[derive(Debug, Serialize, Tabled)]
struct CheckinRow {
    /// Check-in ID
    id: String,
    /// Student
    student: String,
    /// Status
    status: String,
    /// Time
    time: String,
    /// Risk
    risk: String,
    /// Distance
    distance: String,
    /// Flags
    flags: String,
}

impl From<&CheckIn> for CheckinRow {
    fn from(c: &CheckIn) -> Self {
        Self {
            id: c.id.clone(),
            student: c.student_label().to_string(),
            status: c.status.to_string(),
            time: format_timestamp(c.checked_in_at.as_ref()),
            risk: format_risk_score(c.risk_score),
            distance: format_distance(c.distance_from_venue_meters),
            flags: truncate_text(&c.flag_reasons.join(", "), 40),
        }
    }
}

/// Execute check-in commands
pub async fn execute(
    args: &CheckinArgs,
    config_path: &str,
    creds: &Credentials,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        CheckinCommand::List {
            session,
            status,
            search,
        } => {
            let status = status
                .as_deref()
                .map(str::parse::<CheckInStatus>)
                .transpose()?;
            let client = super::connect(config_path, creds).await?;
            let checkins = client.session_checkins(session).await?;
            let total = checkins.len();
            let rows: Vec<CheckinRow> = checkins
                .iter()
                .filter(|c| status.is_none_or(|wanted| c.status == wanted))
                .filter(|c| search.as_deref().is_none_or(|term| c.matches_search(term)))
                .map(CheckinRow::from)
                .collect();
            output::print_list(&rows, format);
            if format == OutputFormat::Table {
                println!("Showing {} of {} check-ins", rows.len(), total);
            }
        }
        CheckinCommand::Flagged { limit, session } => {
            let config = super::load_config(config_path).await?;
            let client = super::connect(config_path, creds).await?;
            let limit = limit.unwrap_or(config.backend.flagged_limit);
            let flagged = client.flagged_checkins(limit).await?;
            let rows: Vec<CheckinRow> = flagged
                .iter()
                .filter(|c| session.as_deref().is_none_or(|id| c.is_for_session(id)))
                .map(CheckinRow::from)
                .collect();
            output::print_list(&rows, format);
        }
        CheckinCommand::Review {
            id,
            decision,
            notes,
        } => {
            let decision: ReviewDecision = decision.parse()?;
            let client = super::connect(config_path, creds).await?;
            client.review_checkin(id, decision, notes.trim()).await?;
            tracing::info!(checkin_id = %id, decision = %decision, "Check-in reviewed");
            let verb = match decision {
                ReviewDecision::Approved => "approved",
                ReviewDecision::Rejected => "rejected",
            };
            output::print_success(&format!("Check-in {} {}", id, verb));
        }
    }

    Ok(())
}
