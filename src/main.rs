//! SAIV Dashboard: instructor web console for the SAIV attendance backend.
//!
//! Main entry point that loads configuration, sets up logging and starts the
//! dashboard server.

use tracing_subscriber::{EnvFilter, fmt};

use saiv_core::config::{AppConfig, DEFAULT_CONFIG_PATH, environment_name};
use saiv_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    tracing::info!("Starting SAIV dashboard v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = saiv_web::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("SAIV_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let env = environment_name();

    AppConfig::load_from(&config_path, &env)
        .map_err(|e| AppError::configuration(format!("Config load error ({}): {}", config_path, e)))
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.is_json() {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_current_span(false)
            .init();
    } else {
        fmt().pretty().with_env_filter(filter).with_target(true).init();
    }
}
