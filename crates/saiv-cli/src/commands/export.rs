//! Attendance export CLI commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use super::Credentials;
use crate::output;
use saiv_client::api::courses::CourseQuery;
use saiv_client::{ExportFile, ExportFormat};
use saiv_core::error::AppError;
use saiv_core::format::format_file_size;

/// Arguments for export commands
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Export subcommand
    #[command(subcommand)]
    pub command: ExportCommand,
}

/// Export subcommands
#[derive(Debug, Subcommand)]
pub enum ExportCommand {
    /// Export a course's attendance
    Course {
        /// Course ID
        id: String,
        /// csv, json or xlsx
        #[arg(long, default_value = "csv")]
        format: String,
        /// Output file (defaults to the suggested file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export one session's check-ins
    Session {
        /// Session ID
        id: String,
        /// csv, json or xlsx
        #[arg(long, default_value = "csv")]
        format: String,
        /// Output file (defaults to the suggested file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Execute export commands
pub async fn execute(
    args: &ExportArgs,
    config_path: &str,
    creds: &Credentials,
) -> Result<(), AppError> {
    match &args.command {
        ExportCommand::Course { id, format, output } => {
            let format: ExportFormat = format.parse()?;
            let client = super::connect(config_path, creds).await?;

            let mut code = String::new();
            for query in [CourseQuery::active(500), CourseQuery::deleted(500)] {
                let courses = client.list_courses(query).await?;
                if let Some(course) = courses.into_iter().find(|c| &c.id == id) {
                    code = course.code;
                    break;
                }
            }

            let file = client.export_course_attendance(id, &code, format).await?;
            write_export(file, output.as_ref()).await
        }
        ExportCommand::Session { id, format, output } => {
            let format: ExportFormat = format.parse()?;
            let client = super::connect(config_path, creds).await?;
            let file = client.export_session(id, format).await?;
            write_export(file, output.as_ref()).await
        }
    }
}

async fn write_export(file: ExportFile, output: Option<&PathBuf>) -> Result<(), AppError> {
    let path = output
        .cloned()
        .unwrap_or_else(|| PathBuf::from(&file.filename));
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create dir: {}", e)))?;
    }
    tokio::fs::write(&path, &file.data)
        .await
        .map_err(|e| AppError::internal(format!("Failed to write export: {}", e)))?;

    output::print_success(&format!(
        "Export written to '{}' ({}, {})",
        path.display(),
        file.content_type,
        format_file_size(file.data.len() as u64)
    ));
    Ok(())
}
