//! CLI command definitions and dispatch.

pub mod audit;
pub mod checkin;
pub mod config;
pub mod course;
pub mod enroll;
pub mod export;
pub mod serve;
pub mod session;
pub mod stats;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use saiv_client::{BackendClient, ClientSession};
use saiv_core::config::{AppConfig, DEFAULT_CONFIG_PATH, environment_name};
use saiv_core::error::AppError;

/// SAIV: attendance verification administration
#[derive(Debug, Parser)]
#[command(name = "saiv", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Instructor email used to sign in to the backend
    #[arg(long, env = "SAIV_EMAIL", global = true)]
    pub email: Option<String>,

    /// Password used to sign in (prompted when absent)
    #[arg(long, env = "SAIV_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the dashboard server
    Serve(serve::ServeArgs),
    /// Configuration management
    Config(config::ConfigArgs),
    /// Attendance statistics
    Stats(stats::StatsArgs),
    /// Course management
    Course(course::CourseArgs),
    /// Session management and status changes
    Session(session::SessionArgs),
    /// Check-in listing and review
    Checkin(checkin::CheckinArgs),
    /// Student enrollment
    Enroll(enroll::EnrollArgs),
    /// Audit log
    Audit(audit::AuditArgs),
    /// Attendance exports
    Export(export::ExportArgs),
}

/// Sign-in details gathered from flags or the environment.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Email, if given.
    pub email: Option<String>,
    /// Password, if given.
    pub password: Option<String>,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let creds = self.credentials();
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
            Commands::Stats(args) => stats::execute(args, &self.config, &creds, self.format).await,
            Commands::Course(args) => course::execute(args, &self.config, &creds, self.format).await,
            Commands::Session(args) => {
                session::execute(args, &self.config, &creds, self.format).await
            }
            Commands::Checkin(args) => {
                checkin::execute(args, &self.config, &creds, self.format).await
            }
            Commands::Enroll(args) => enroll::execute(args, &self.config, &creds, self.format).await,
            Commands::Audit(args) => audit::execute(args, &self.config, &creds, self.format).await,
            Commands::Export(args) => export::execute(args, &self.config, &creds).await,
        }
    }

    fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

/// Helper: load configuration from file
pub async fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load_from(config_path, &environment_name())
}

/// Helper: sign in to the backend, prompting for missing credentials
pub async fn connect(config_path: &str, creds: &Credentials) -> Result<ClientSession, AppError> {
    let config = load_config(config_path).await?;
    let email = match non_empty(creds.email.as_deref()) {
        Some(email) => email.to_string(),
        None => dialoguer::Input::<String>::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
    };
    let password = match non_empty(creds.password.as_deref()) {
        Some(password) => password.to_string(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
    };

    let backend = BackendClient::new(&config.backend)?;
    let session = backend.login(email.trim(), &password).await?;
    tracing::debug!(email = %email.trim(), backend = %backend.base_url(), "Signed in");
    Ok(session)
}

/// Helper: ask before a destructive action unless `--force` was given
pub fn confirm(prompt: &str, force: bool) -> Result<bool, AppError> {
    if force {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;
    if !confirmed {
        println!("Cancelled.");
    }
    Ok(confirmed)
}

/// Helper: convert a local form validation message into an error
pub fn invalid(message: String) -> AppError {
    AppError::validation(message)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_session_status_args() {
        let cli = Cli::try_parse_from([
            "saiv", "--email", "prof@uni.edu", "session", "status", "s1", "active", "--course",
            "c1",
        ])
        .unwrap();
        assert_eq!(cli.email.as_deref(), Some("prof@uni.edu"));
        assert_eq!(cli.config, DEFAULT_CONFIG_PATH);
        match cli.command {
            Commands::Session(args) => match args.command {
                session::SessionCommand::Status { id, status, course } => {
                    assert_eq!(id, "s1");
                    assert_eq!(status, "active");
                    assert_eq!(course.as_deref(), Some("c1"));
                }
                other => panic!("unexpected command: {other:?}"),
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_bulk_emails_split_on_commas() {
        let cli = Cli::try_parse_from([
            "saiv", "enroll", "bulk", "c1", "--emails", "a@x.edu,b@x.edu", "--create-accounts",
        ])
        .unwrap();
        match cli.command {
            Commands::Enroll(args) => match args.command {
                enroll::EnrollCommand::Bulk {
                    emails,
                    create_accounts,
                    file,
                    ..
                } => {
                    assert_eq!(emails, vec!["a@x.edu", "b@x.edu"]);
                    assert!(create_accounts);
                    assert!(file.is_none());
                }
                other => panic!("unexpected command: {other:?}"),
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_confirm_skipped_with_force() {
        assert!(confirm("Delete?", true).unwrap());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("  a@b.c ")), Some("a@b.c"));
        assert_eq!(non_empty(Some("   ")), None);
        assert_eq!(non_empty(None), None);
    }
}
