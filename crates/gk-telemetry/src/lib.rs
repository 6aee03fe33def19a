//! # Gatekeeper Telemetry
//!
//! Structured logging and Prometheus metrics for the admission layer.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gk_telemetry::{init_logging, register_metrics, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_logging(&config).expect("Failed to init logging");
//!     register_metrics().expect("Failed to register metrics");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GK_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `GK_JSON_LOGS` | `false` (`true` in containers) | JSON formatted output |
//! | `GK_SERVICE_NAME` | `gatekeeper` | Service name attached to startup logs |

#![warn(missing_docs)]

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    encode_metrics, register_metrics, HistogramTimer, ANTE_ADMITTED, ANTE_DURATION,
    ANTE_REJECTED, DEVICE_REQUESTS, SIGNATURE_FAILURES, SIGNATURE_VERIFICATIONS,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// A global subscriber is already installed or the filter is invalid.
    #[error("Failed to initialize logger: {0}")]
    LoggerInit(String),

    /// Metric registration or encoding failed.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
