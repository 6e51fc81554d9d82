//! Remote SAIV backend configuration.

use serde::{Deserialize, Serialize};

/// Fixed API-version path segment every backend call is prefixed with.
pub const API_PREFIX: &str = "/api/v1";

/// Connection settings for the SAIV backend REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend base URL, with or without the API prefix.
    #[serde(default = "default_url")]
    pub url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Window used by the overview statistics call.
    #[serde(default = "default_overview_days")]
    pub overview_days: u32,
    /// Number of flagged check-ins fetched for review panels.
    #[serde(default = "default_flagged_limit")]
    pub flagged_limit: u32,
}

impl BackendConfig {
    /// The base URL with the API-version prefix appended exactly once.
    pub fn api_base_url(&self) -> String {
        let trimmed = self.url.trim().trim_end_matches('/');
        if trimmed.ends_with(API_PREFIX) {
            trimmed.to_string()
        } else {
            format!("{trimmed}{API_PREFIX}")
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_seconds: default_timeout(),
            overview_days: default_overview_days(),
            flagged_limit: default_flagged_limit(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_overview_days() -> u32 {
    7
}

fn default_flagged_limit() -> u32 {
    20
}
