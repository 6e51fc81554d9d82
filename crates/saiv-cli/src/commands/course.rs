//! Course management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use super::Credentials;
use crate::output::{self, OutputFormat};
use saiv_client::api::courses::CourseQuery;
use saiv_client::api::sessions::SessionQuery;
use saiv_core::error::AppError;
use saiv_entity::course::Course;
use saiv_web::dto::forms::CourseForm;

/// Arguments for course commands
#[derive(Debug, Args)]
pub struct CourseArgs {
    /// Course subcommand
    #[command(subcommand)]
    pub command: CourseCommand,
}

/// Course subcommands
#[derive(Debug, Subcommand)]
pub enum CourseCommand {
    /// List courses
    List {
        /// List soft-deleted courses instead of active ones
        #[arg(long)]
        deleted: bool,
        /// Maximum number of courses
        #[arg(short, long, default_value = "100")]
        limit: u32,
    },
    /// Create a course
    Create {
        /// Course code, e.g. CS101
        #[arg(long)]
        code: String,
        /// Course name
        #[arg(long)]
        name: String,
        /// Academic semester
        #[arg(long)]
        semester: String,
        /// Default venue name
        #[arg(long, default_value = "")]
        venue: String,
        /// Default venue latitude
        #[arg(long, default_value = "")]
        latitude: String,
        /// Default venue longitude
        #[arg(long, default_value = "")]
        longitude: String,
        /// Geofence radius in metres
        #[arg(long, default_value = "")]
        radius: String,
        /// Risk threshold between 0 and 1
        #[arg(long, default_value = "")]
        risk_threshold: String,
    },
    /// Soft-delete a course
    Delete {
        /// Course ID
        id: String,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
    /// Restore a soft-deleted course
    Restore {
        /// Course ID
        id: String,
    },
}

/// Course display row
#[derive(Debug, Serialize, Tabled)]
struct CourseRow {
    /// Course ID
    id: String,
    /// Code
    code: String,
    /// Name
    name: String,
    /// Semester
    semester: String,
    /// Venue
    venue: String,
    /// Active
    active: String,
}

impl From<&Course> for CourseRow {
    fn from(c: &Course) -> Self {
        Self {
            id: c.id.clone(),
            code: c.code.clone(),
            name: c.name.clone(),
            semester: c.semester.clone().unwrap_or_else(|| "-".to_string()),
            venue: c.venue_name.clone().unwrap_or_else(|| "-".to_string()),
            active: output::flag(c.is_active),
        }
    }
}

/// Execute course commands
pub async fn execute(
    args: &CourseArgs,
    config_path: &str,
    creds: &Credentials,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        CourseCommand::List { deleted, limit } => {
            let client = super::connect(config_path, creds).await?;
            let query = if *deleted {
                CourseQuery::deleted(*limit)
            } else {
                CourseQuery::active(*limit)
            };
            let courses = client.list_courses(query).await?;
            let rows: Vec<CourseRow> = courses.iter().map(CourseRow::from).collect();
            output::print_list(&rows, format);
        }
        CourseCommand::Create {
            code,
            name,
            semester,
            venue,
            latitude,
            longitude,
            radius,
            risk_threshold,
        } => {
            let request = CourseForm {
                code: code.clone(),
                name: name.clone(),
                semester: semester.clone(),
                venue_name: venue.clone(),
                venue_latitude: latitude.clone(),
                venue_longitude: longitude.clone(),
                geofence_radius_meters: radius.clone(),
                risk_threshold: risk_threshold.clone(),
            }
            .into_request()
            .map_err(super::invalid)?;

            let client = super::connect(config_path, creds).await?;
            let course = client.create_course(&request).await?;
            output::print_success(&format!("Course '{}' created ({})", course.code, course.id));
        }
        CourseCommand::Delete { id, force } => {
            let client = super::connect(config_path, creds).await?;
            let sessions = client.list_sessions(&SessionQuery::for_course(id, 500)).await?;
            let open: Vec<_> = sessions.iter().filter(|s| s.status.is_open()).collect();
            if !open.is_empty() {
                output::print_warning(&format!(
                    "{} open session(s) belong to this course:",
                    open.len()
                ));
                for session in &open {
                    println!("    {}", session.display_label());
                }
            }

            if !super::confirm(&format!("Delete course {}?", id), *force)? {
                return Ok(());
            }
            client.delete_course(id).await?;
            tracing::info!(course_id = %id, "Course deleted");
            output::print_success(&format!(
                "Course {} deleted. Restore it with `saiv course restore {}`.",
                id, id
            ));
        }
        CourseCommand::Restore { id } => {
            let client = super::connect(config_path, creds).await?;
            let course = client.restore_course(id).await?;
            output::print_success(&format!("Course {} restored", course.code));
        }
    }

    Ok(())
}
