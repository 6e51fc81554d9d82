//! Session management CLI commands.
//!
//! `status` and `delete` consult the lifecycle guard before anything is
//! sent; a refused change never reaches the backend.

use chrono::Utc;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use super::Credentials;
use crate::output::{self, OutputFormat};
use saiv_client::api::courses::CourseQuery;
use saiv_client::api::sessions::{SessionContext, SessionQuery};
use saiv_client::ClientSession;
use saiv_core::error::AppError;
use saiv_core::format::format_timestamp;
use saiv_entity::session::lifecycle::DELETE_BLOCKED_MESSAGE;
use saiv_entity::session::{Session, SessionActions, SessionSchedule, SessionStatus};
use saiv_web::dto::forms::SessionForm;

/// Arguments for session commands
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Session subcommand
    #[command(subcommand)]
    pub command: SessionCommand,
}

/// Session subcommands
#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// List sessions
    List {
        /// Restrict to one course
        #[arg(long)]
        course: Option<String>,
        /// Restrict to one status
        #[arg(long)]
        status: Option<String>,
        /// Maximum number of sessions
        #[arg(short, long, default_value = "100")]
        limit: u32,
    },
    /// Create a session for an active course
    Create {
        /// Course ID
        #[arg(long)]
        course: String,
        /// Session name
        #[arg(long)]
        name: String,
        /// lecture, tutorial, lab or exam
        #[arg(long = "type", default_value = "lecture")]
        session_type: String,
        /// Start time, e.g. 2025-03-01T09:00 (UTC)
        #[arg(long)]
        start: Option<String>,
        /// End time (UTC)
        #[arg(long)]
        end: Option<String>,
        /// Minutes before the start that check-in opens
        #[arg(long, default_value = "")]
        opens_before: String,
        /// Minutes after the start that check-in closes
        #[arg(long, default_value = "")]
        closes_after: String,
        /// Venue name (course default when absent)
        #[arg(long, default_value = "")]
        venue: String,
        /// Venue latitude
        #[arg(long, default_value = "")]
        latitude: String,
        /// Venue longitude
        #[arg(long, default_value = "")]
        longitude: String,
        /// Geofence radius in metres
        #[arg(long, default_value = "")]
        radius: String,
        /// Risk threshold between 0 and 1
        #[arg(long, default_value = "")]
        risk_threshold: String,
        /// Do not require a liveness check
        #[arg(long)]
        no_liveness: bool,
        /// Require a face match
        #[arg(long)]
        face_match: bool,
    },
    /// Change a session's status
    Status {
        /// Session ID
        id: String,
        /// Target status: active, closed or cancelled
        status: String,
        /// Owning course, to narrow the lookup
        #[arg(long)]
        course: Option<String>,
    },
    /// Show which actions a session allows
    Actions {
        /// Session ID
        id: String,
        /// Owning course, to narrow the lookup
        #[arg(long)]
        course: Option<String>,
    },
    /// Delete a scheduled or cancelled session
    Delete {
        /// Session ID
        id: String,
        /// Owning course, to narrow the lookup
        #[arg(long)]
        course: Option<String>,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
}

/// Session display row
#[derive(Debug, Serialize, Tabled)]
struct SessionRow {
    /// Session ID
    id: String,
    /// Course
    course: String,
    /// Name
    name: String,
    /// Type
    kind: String,
    /// Status
    status: String,
    /// Start
    start: String,
    /// Check-ins
    checkins: u64,
}

impl From<&Session> for SessionRow {
    fn from(s: &Session) -> Self {
        Self {
            id: s.id.clone(),
            course: s.course_code.clone().unwrap_or_else(|| s.course_id.clone()),
            name: s.name.clone(),
            kind: s.session_type.to_string(),
            status: s.status.label().to_string(),
            start: format_timestamp(s.scheduled_start.as_ref()),
            checkins: s.checkin_count,
        }
    }
}

/// Allowed actions for one session
#[derive(Debug, Serialize)]
struct ActionsView {
    session_id: String,
    status: SessionStatus,
    course_is_active: bool,
    can_activate: bool,
    can_close: bool,
    can_cancel: bool,
    can_delete: bool,
    explanation: String,
}

/// Execute session commands
pub async fn execute(
    args: &SessionArgs,
    config_path: &str,
    creds: &Credentials,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        SessionCommand::List {
            course,
            status,
            limit,
        } => {
            let status = status
                .as_deref()
                .map(str::parse::<SessionStatus>)
                .transpose()?;
            let client = super::connect(config_path, creds).await?;
            let query = match course {
                Some(course_id) => SessionQuery::for_course(course_id, *limit),
                None => SessionQuery::limit(*limit),
            };
            let sessions = client.list_sessions(&query).await?;
            let rows: Vec<SessionRow> = sessions
                .iter()
                .filter(|s| status.is_none_or(|wanted| s.status == wanted))
                .map(SessionRow::from)
                .collect();
            output::print_list(&rows, format);
        }
        SessionCommand::Create {
            course,
            name,
            session_type,
            start,
            end,
            opens_before,
            closes_after,
            venue,
            latitude,
            longitude,
            radius,
            risk_threshold,
            no_liveness,
            face_match,
        } => {
            let now = Utc::now();
            let defaults = SessionSchedule::default_at(now);
            let form = SessionForm {
                course_id: course.clone(),
                name: name.clone(),
                session_type: session_type.clone(),
                scheduled_start: start
                    .clone()
                    .unwrap_or_else(|| defaults.scheduled_start.to_rfc3339()),
                scheduled_end: end
                    .clone()
                    .unwrap_or_else(|| defaults.scheduled_end.to_rfc3339()),
                opens_before_minutes: opens_before.clone(),
                closes_after_minutes: closes_after.clone(),
                venue_name: venue.clone(),
                venue_latitude: latitude.clone(),
                venue_longitude: longitude.clone(),
                geofence_radius_meters: radius.clone(),
                risk_threshold: risk_threshold.clone(),
                require_liveness_check: (!no_liveness).then(|| "true".to_string()),
                require_face_match: face_match.then(|| "true".to_string()),
            };

            let client = super::connect(config_path, creds).await?;
            let courses = client.list_courses(CourseQuery::active(500)).await?;
            let Some(owner) = courses.iter().find(|c| c.id == course.trim()) else {
                return Err(AppError::validation(
                    "Select an active course. Sessions cannot be created for deleted courses.",
                ));
            };
            let validated = form
                .into_request(Some(owner), now)
                .map_err(super::invalid)?;
            for warning in &validated.warnings {
                output::print_warning(warning);
            }

            let session = client.create_session(&validated.request).await?;
            output::print_success(&format!(
                "Session '{}' created ({}) for {}",
                session.name, session.id, owner.code
            ));
        }
        SessionCommand::Status { id, status, course } => {
            let target: SessionStatus = status.parse()?;
            let client = super::connect(config_path, creds).await?;
            let mut context = lookup(&client, id, course.as_deref()).await?;

            let previous = match context
                .session
                .transition_to(target, context.course_is_active)
            {
                Ok(previous) => previous,
                Err(rejection) => {
                    tracing::info!(
                        session_id = %id,
                        reason = rejection.reason(),
                        "Status change refused by lifecycle guard"
                    );
                    return Err(rejection.into());
                }
            };

            client.update_session_status(id, target).await?;
            output::print_success(&format!(
                "Session status changed from {} to {}.",
                previous.label(),
                target.label()
            ));
        }
        SessionCommand::Actions { id, course } => {
            let client = super::connect(config_path, creds).await?;
            let context = lookup(&client, id, course.as_deref()).await?;
            let actions =
                SessionActions::for_session(context.session.status, context.course_is_active);
            let view = ActionsView {
                session_id: id.clone(),
                status: actions.status,
                course_is_active: actions.course_is_active,
                can_activate: actions.can_activate,
                can_close: actions.can_close,
                can_cancel: actions.can_cancel,
                can_delete: actions.can_delete,
                explanation: actions.explanation().to_string(),
            };
            if format == OutputFormat::Json {
                output::print_json(&view);
                return Ok(());
            }

            println!("{}", context.session.display_label());
            if let Some(warning) = actions.course_warning() {
                output::print_warning(warning);
            }
            output::print_kv("Activate", &output::flag(view.can_activate));
            output::print_kv("Close", &output::flag(view.can_close));
            output::print_kv("Cancel", &output::flag(view.can_cancel));
            output::print_kv("Schedule", &output::flag(actions.can_schedule));
            output::print_kv("Delete", &output::flag(view.can_delete));
            println!();
            println!("{}", view.explanation);
            println!("{}", actions.delete_message());
        }
        SessionCommand::Delete { id, course, force } => {
            let client = super::connect(config_path, creds).await?;
            let context = lookup(&client, id, course.as_deref()).await?;
            if !context.session.can_delete() {
                tracing::info!(session_id = %id, status = %context.session.status, "Delete refused by lifecycle guard");
                return Err(AppError::validation(DELETE_BLOCKED_MESSAGE));
            }

            let prompt = format!("Delete session '{}'?", context.session.display_label());
            if !super::confirm(&prompt, *force)? {
                return Ok(());
            }
            client.delete_session(id).await?;
            output::print_success(&format!("Session '{}' deleted.", context.session.name));
        }
    }

    Ok(())
}

async fn lookup(
    client: &ClientSession,
    session_id: &str,
    course_id: Option<&str>,
) -> Result<SessionContext, AppError> {
    client
        .session_context(session_id, course_id)
        .await?
        .ok_or_else(|| AppError::not_found("Session not found."))
}
