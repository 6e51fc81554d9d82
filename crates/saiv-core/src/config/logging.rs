//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Settings for the `tracing` subscriber installed by the server binary.
///
/// `RUST_LOG`, when set, takes precedence over `level`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `"info"` or `"saiv_web=debug,info"`.
    #[serde(default = "default_level")]
    pub level: String,
    /// `"json"` for structured output; anything else prints human-readable lines.
    #[serde(default = "default_format")]
    pub format: String,
}

impl LoggingConfig {
    /// Whether structured JSON output was requested.
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_format_detection() {
        assert!(!LoggingConfig::default().is_json());
        let cfg = LoggingConfig {
            format: "JSON".into(),
            ..LoggingConfig::default()
        };
        assert!(cfg.is_json());
    }
}
