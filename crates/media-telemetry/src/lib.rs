//! # Media Telemetry
//!
//! Structured logging for media-core binaries.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use media_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(TelemetryConfig::from_env()).expect("telemetry");
//! tracing::info!("ready");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` / `MF_SERVICE_NAME` | `media-core` | Service name |
//! | `MF_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `MF_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `MF_JSON_LOGS` | `false` | JSON log lines |

mod config;
mod logging;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::build_filter;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Install structured logging.
///
/// Returns a guard to hold for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    tracing_setup::init_tracing(&config)?;
    Ok(TelemetryGuard {
        service_name: config.service_name,
    })
}

/// Guard that keeps telemetry active. Logs a final line on drop.
#[derive(Debug)]
pub struct TelemetryGuard {
    service_name: String,
}

impl TelemetryGuard {
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry");
    }
}

/// Span with a component field.
///
/// ```
/// let span = media_telemetry::component_span!("queue", "drain", depth = 3);
/// let _entered = span.enter();
/// ```
#[macro_export]
macro_rules! component_span {
    ($component:expr, $name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name, component = $component $(, $($field)*)?)
    };
}
