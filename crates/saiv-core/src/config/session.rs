//! Browser session configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for the cookie-bound dashboard sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the dashboard session id.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Minutes of inactivity after which a dashboard session is discarded.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_minutes: u64,
    /// Whether the cookie is marked `Secure`.
    #[serde(default)]
    pub secure_cookie: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            idle_timeout_minutes: default_idle_timeout(),
            secure_cookie: false,
        }
    }
}

impl SessionConfig {
    /// Idle timeout as a duration; saturates instead of overflowing.
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_minutes.saturating_mul(60))
    }
}

fn default_cookie_name() -> String {
    "saiv_session".to_string()
}

fn default_idle_timeout() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_timeout() {
        assert_eq!(SessionConfig::default().idle_timeout(), Duration::from_secs(3600));
        let huge = SessionConfig {
            idle_timeout_minutes: u64::MAX,
            ..SessionConfig::default()
        };
        assert_eq!(huge.idle_timeout(), Duration::from_secs(u64::MAX));
    }
}
