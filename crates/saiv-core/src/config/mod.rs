//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod backend;
pub mod logging;
pub mod session;

use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::backend::BackendConfig;
use self::logging::LoggingConfig;
use self::session::SessionConfig;

use crate::error::AppError;

pub use self::app::CorsConfig;

/// Environment variable that overrides `backend.url`.
pub const BACKEND_URL_ENV: &str = "BACKEND_URL";

/// Environment variable naming the `config/{env}.toml` overlay.
pub const ENVIRONMENT_ENV: &str = "SAIV_ENV";

/// Default base configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// The overlay name from `SAIV_ENV`, `development` when unset.
pub fn environment_name() -> String {
    std::env::var(ENVIRONMENT_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "development".to_string())
}

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Dashboard HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Remote SAIV backend settings.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Browser session settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `config/default.toml` and `config/{env}.toml`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from(DEFAULT_CONFIG_PATH, env)
    }

    /// Load configuration from a base file plus an environment overlay.
    ///
    /// Merges the base file with `config/{env}` and environment variables
    /// prefixed with `SAIV_`. `BACKEND_URL`, when set, wins over every file.
    pub fn load_from(base: &str, env: &str) -> Result<Self, AppError> {
        let base = base.trim_end_matches(".toml");
        let config = config::Config::builder()
            .add_source(config::File::with_name(base).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SAIV")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let mut loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                loaded.backend.url = url;
            }
        }

        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject settings the dashboard cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.backend.url.trim().is_empty() {
            return Err(AppError::configuration("backend.url must not be empty"));
        }
        if !self.backend.url.starts_with("http://") && !self.backend.url.starts_with("https://") {
            return Err(AppError::configuration(format!(
                "backend.url must be an http(s) URL, got '{}'",
                self.backend.url
            )));
        }
        if self.backend.timeout_seconds == 0 {
            return Err(AppError::configuration(
                "backend.timeout_seconds must be greater than zero",
            ));
        }
        if self.session.cookie_name.is_empty() {
            return Err(AppError::configuration("session.cookie_name must not be empty"));
        }
        Ok(())
    }
}
