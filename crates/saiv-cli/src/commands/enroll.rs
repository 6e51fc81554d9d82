//! Enrollment CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use super::Credentials;
use crate::output::{self, OutputFormat};
use saiv_core::error::AppError;
use saiv_core::format::{format_date, format_percentage};
use saiv_entity::enrollment::EnrolledStudent;
use saiv_web::dto::forms::{BulkEnrollForm, EnrollForm};

/// Arguments for enrollment commands
#[derive(Debug, Args)]
pub struct EnrollArgs {
    /// Enrollment subcommand
    #[command(subcommand)]
    pub command: EnrollCommand,
}

/// Enrollment subcommands
#[derive(Debug, Subcommand)]
pub enum EnrollCommand {
    /// List the students enrolled in a course
    List {
        /// Course ID
        course: String,
        /// Only students below 75% attendance
        #[arg(long)]
        at_risk: bool,
    },
    /// Enroll one student
    Add {
        /// Course ID
        course: String,
        /// Student user ID
        student: String,
    },
    /// Enroll students by email
    Bulk {
        /// Course ID
        course: String,
        /// File with one email per line
        #[arg(long, conflicts_with = "emails")]
        file: Option<String>,
        /// Comma-separated emails
        #[arg(long, value_delimiter = ',')]
        emails: Vec<String>,
        /// Create accounts for unknown emails
        #[arg(long)]
        create_accounts: bool,
    },
}

/// Enrolled student display row
#[derive(Debug, Serialize, Tabled)]
struct StudentRow {
    /// Student ID
    id: String,
    /// Name
    name: String,
    /// Email
    email: String,
    /// Face enrolled
    face: String,
    /// Sessions attended
    attended: u64,
    /// Attendance
    attendance: String,
    /// Last check-in
    last_checkin: String,
}

impl From<&EnrolledStudent> for StudentRow {
    fn from(s: &EnrolledStudent) -> Self {
        Self {
            id: s.id().unwrap_or("-").to_string(),
            name: s.name().to_string(),
            email: s.email().to_string(),
            face: output::flag(s.face_enrolled),
            attended: s.sessions_attended,
            attendance: format_percentage(Some(s.attendance_rate), 1),
            last_checkin: format_date(s.last_checkin.as_ref()),
        }
    }
}

/// Execute enrollment commands
pub async fn execute(
    args: &EnrollArgs,
    config_path: &str,
    creds: &Credentials,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        EnrollCommand::List { course, at_risk } => {
            let client = super::connect(config_path, creds).await?;
            let roster = client.course_enrollments(course).await?;
            let rows: Vec<StudentRow> = if *at_risk {
                roster.at_risk().map(StudentRow::from).collect()
            } else {
                roster.students.iter().map(StudentRow::from).collect()
            };
            output::print_list(&rows, format);
            if format == OutputFormat::Table {
                println!("Total enrolled: {}", roster.total());
            }
        }
        EnrollCommand::Add { course, student } => {
            let request = EnrollForm {
                course_id: course.clone(),
                student_id: student.clone(),
            }
            .into_request()
            .map_err(super::invalid)?;
            let client = super::connect(config_path, creds).await?;
            client.enroll_student(&request).await?;
            output::print_success("Student enrolled.");
        }
        EnrollCommand::Bulk {
            course,
            file,
            emails,
            create_accounts,
        } => {
            let text = match file {
                Some(path) => tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| AppError::internal(format!("Failed to read {}: {}", path, e)))?,
                None => emails.join("\n"),
            };
            let request = BulkEnrollForm {
                course_id: course.clone(),
                emails: text,
                create_accounts: create_accounts.then(|| "true".to_string()),
            }
            .into_request()
            .map_err(super::invalid)?;

            let client = super::connect(config_path, creds).await?;
            let result = client.bulk_enroll(&request).await?;
            if format == OutputFormat::Json {
                output::print_json(&result);
            } else {
                output::print_success(&result.summary());
            }
        }
    }

    Ok(())
}
