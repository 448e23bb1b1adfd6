//! # Gate Telemetry
//!
//! Observability for the admission engine.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` with env filter, pretty or JSON output
//! - **Metrics**: Prometheus counters for decision outcomes and write-back
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gate_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! let telemetry = init_telemetry(&config).expect("Failed to init telemetry");
//! let metrics = telemetry.metrics();
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GATE_SERVICE_NAME` | `swarm-gate` | Service name in logs |
//! | `GATE_LOG_LEVEL` | `info` | Log level filter (`RUST_LOG` also honored) |
//! | `GATE_JSON_LOGS` | `false` | Emit JSON lines instead of pretty output |
//! | `GATE_CONSOLE_OUTPUT` | `true` | Write logs to stdout at all |

#![warn(missing_docs)]

mod config;
mod logging;
mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{encode_registry, ApprovalMetrics, HistogramTimer, REGISTRY};

use std::sync::Arc;
use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The log subscriber could not be installed
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// A metric could not be created or registered
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Handles produced by `init_telemetry`.
pub struct Telemetry {
    metrics: Arc<ApprovalMetrics>,
}

impl Telemetry {
    /// Metrics registered in the process-wide registry.
    pub fn metrics(&self) -> Arc<ApprovalMetrics> {
        Arc::clone(&self.metrics)
    }
}

/// Install logging and register the approval metrics globally.
///
/// Call once per process.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<Telemetry, TelemetryError> {
    init_logging(config)?;
    let metrics = Arc::new(ApprovalMetrics::register(&REGISTRY)?);

    tracing::info!(service = %config.service_name, "Telemetry initialized");
    Ok(Telemetry { metrics })
}
