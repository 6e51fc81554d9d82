//! Attendance statistics CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use super::Credentials;
use crate::output::{self, OutputFormat};
use saiv_core::error::AppError;
use saiv_core::format::{format_number, format_percentage, format_risk_score};
use saiv_entity::stats::HealthIndicator;

/// Arguments for stats commands
#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Stats subcommand
    #[command(subcommand)]
    pub command: StatsCommand,
}

/// Stats subcommands
#[derive(Debug, Subcommand)]
pub enum StatsCommand {
    /// System-wide overview
    Overview {
        /// Days of history (defaults to `backend.overview_days`)
        #[arg(short, long)]
        days: Option<u32>,
    },
    /// Statistics for one course
    Course {
        /// Course ID
        id: String,
    },
    /// Statistics for one session
    Session {
        /// Session ID
        id: String,
    },
}

/// Per-session row of a course report
#[derive(Debug, Serialize, Tabled)]
struct CourseSessionRow {
    /// Session
    session: String,
    /// Date
    date: String,
    /// Checked in
    checked_in: u64,
    /// Attendance
    attendance: String,
}

/// Execute stats commands
pub async fn execute(
    args: &StatsArgs,
    config_path: &str,
    creds: &Credentials,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path).await?;
    let client = super::connect(config_path, creds).await?;

    match &args.command {
        StatsCommand::Overview { days } => {
            let days = days.unwrap_or(config.backend.overview_days);
            let stats = client.overview_stats(days).await?;
            if format == OutputFormat::Json {
                output::print_json(&stats);
                return Ok(());
            }

            println!("Overview (last {} days)", days);
            output::print_kv("Total sessions", &stats.total_sessions.to_string());
            output::print_kv("Active sessions", &stats.active_sessions.to_string());
            output::print_kv("Total check-ins", &stats.total_checkins.to_string());
            output::print_kv("Check-ins today", &stats.total_checkins_today.to_string());
            output::print_kv("Students", &stats.total_students.to_string());
            output::print_kv("Courses", &stats.total_courses.to_string());
            output::print_kv("Approval rate", &format_percentage(Some(stats.approval_rate), 1));
            output::print_kv(
                "Average attendance",
                &format_percentage(Some(stats.average_attendance_rate), 1),
            );

            output::print_heading("Check-in status");
            for (label, count) in stats.status_breakdown() {
                output::print_kv(label, &count.to_string());
            }
            output::print_heading("Risk");
            for (label, count) in stats.risk_breakdown() {
                output::print_kv(label, &count.to_string());
            }
            output::print_heading("System health");
            for indicator in HealthIndicator::for_overview(&stats) {
                println!("  {}", indicator.message);
            }
        }
        StatsCommand::Course { id } => {
            let stats = client.course_stats(id).await?;
            if format == OutputFormat::Json {
                output::print_json(&stats);
                return Ok(());
            }

            println!("Course {}", id);
            output::print_kv("Students", &stats.total_students.to_string());
            output::print_kv("Sessions", &stats.total_sessions.to_string());
            output::print_kv("Completed sessions", &stats.completed_sessions.to_string());
            output::print_kv("Upcoming sessions", &stats.upcoming_sessions.to_string());
            output::print_kv("Check-ins", &stats.total_checkins.to_string());
            output::print_kv(
                "Average attendance",
                &format_percentage(Some(stats.average_attendance_rate), 1),
            );
            output::print_kv("Low attendance", &stats.students_low_attendance.to_string());
            output::print_kv(
                "Perfect attendance",
                &stats.students_perfect_attendance.to_string(),
            );

            let rows: Vec<CourseSessionRow> = stats
                .sessions
                .iter()
                .map(|s| CourseSessionRow {
                    session: s.name.clone(),
                    date: s.date.clone().unwrap_or_else(|| "-".to_string()),
                    checked_in: s.checked_in,
                    attendance: format_percentage(Some(s.attendance_rate), 1),
                })
                .collect();
            output::print_heading("Sessions");
            output::print_list(&rows, format);
        }
        StatsCommand::Session { id } => {
            let stats = client.session_stats(id).await?;
            if format == OutputFormat::Json {
                output::print_json(&stats);
                return Ok(());
            }

            println!("Session {}", id);
            output::print_kv("Enrolled", &stats.total_enrolled.to_string());
            output::print_kv("Checked in", &stats.checked_in.to_string());
            output::print_kv(
                "Attendance",
                &format_percentage(Some(stats.attendance_percent()), 1),
            );
            output::print_kv(
                "Average risk",
                &format_risk_score(Some(stats.average_risk_score)),
            );
            output::print_kv(
                "Expected / actual",
                &format!(
                    "{} / {}",
                    format_number(Some(stats.expected_attendance as f64), 0),
                    format_number(Some(stats.actual_attendance as f64), 0)
                ),
            );

            output::print_heading("By status");
            for (status, count) in &stats.by_status {
                output::print_kv(status, &count.to_string());
            }
            let risk = &stats.risk_distribution;
            output::print_heading("Risk distribution");
            output::print_kv("Low", &risk.low.to_string());
            output::print_kv("Medium", &risk.medium.to_string());
            output::print_kv("High", &risk.high.to_string());
        }
    }

    Ok(())
}
