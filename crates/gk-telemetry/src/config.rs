//! Telemetry configuration from environment variables.

use std::env;

const DEFAULT_SERVICE_NAME: &str = "gatekeeper";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to startup logs
    pub service_name: String,

    /// `EnvFilter` directive, e.g. `info` or `gk_03_ante_handler=debug`
    pub log_level: String,

    /// Whether to install a formatting layer at all
    pub console_output: bool,

    /// Whether the formatting layer emits JSON
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `GK_SERVICE_NAME`: Service name (default: gatekeeper)
    /// - `GK_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `GK_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `GK_JSON_LOGS`: Enable JSON logs (default: false, true in containers)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let is_container =
            lookup("KUBERNETES_SERVICE_HOST").is_some() || lookup("DOCKER_CONTAINER").is_some();

        Self {
            service_name: lookup("GK_SERVICE_NAME")
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
            log_level: lookup("GK_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            console_output: lookup("GK_CONSOLE_OUTPUT")
                .map(|v| !is_false(&v))
                .unwrap_or(true),
            json_logs: lookup("GK_JSON_LOGS")
                .map(|v| is_true(&v))
                .unwrap_or(is_container),
        }
    }
}

fn is_true(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}

fn is_false(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "false" | "0" | "no")
}
