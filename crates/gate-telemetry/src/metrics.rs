//! Prometheus metrics for the admission engine.
//!
//! All metrics follow the naming convention: `gate_<component>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: decision outcomes, promotions, write-back results
//! - **Gauge**: current allow-set size
//! - **Histogram**: time spent deciding an announce
//!
//! Metrics are observability only; nothing reads them back to decide.

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry,
    TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Process-wide metrics registry
    pub static ref REGISTRY: Registry = Registry::new();
}

/// Counters for decision outcomes and write-back.
///
/// Each instance owns its collectors, so tests can build independent
/// instances with [`ApprovalMetrics::new`] while the binary registers one
/// into [`REGISTRY`].
#[derive(Clone)]
pub struct ApprovalMetrics {
    registry: Registry,

    /// Announces entering the pipeline
    pub announces_received: IntCounter,
    /// Announces allowed (static allow-list or promotion)
    pub announces_allowed: IntCounter,
    /// Announces denied because the infohash is deny-listed
    pub announces_denylisted: IntCounter,
    /// Announces denied because the infohash is in no list
    pub announces_unlisted: IntCounter,
    /// Signatures that failed to decode or verify
    pub signature_failures: IntCounter,
    /// Infohashes newly promoted into the allow-set
    pub promotions: IntCounter,
    /// Statistics-only requests passed through
    pub scrapes: IntCounter,
    /// Promotions written to the durable backend
    pub writes_persisted: IntCounter,
    /// Promotions the durable backend failed to write
    pub write_failures: IntCounter,
    /// Promotions dropped because the write-back queue was full or closed
    pub writes_dropped: IntCounter,
    /// Current size of the in-memory allow-set
    pub allowlist_size: IntGauge,
    /// Announce decision latency
    pub decision_duration: Histogram,
}

impl ApprovalMetrics {
    /// Metrics registered into a fresh private registry.
    pub fn new() -> Self {
        Self::register(&Registry::new()).expect("fresh registry accepts approval metrics")
    }

    /// Create every collector and register it with `registry`.
    pub fn register(registry: &Registry) -> Result<Self, TelemetryError> {
        let counter = |name: &str, help: &str| {
            IntCounter::new(name, help).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
        };

        let buckets = exponential_buckets(0.000_001, 2.0, 16)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

        let metrics = Self {
            registry: registry.clone(),
            announces_received: counter(
                "gate_announce_received_total",
                "Announces the admission pipeline received",
            )?,
            announces_allowed: counter(
                "gate_announce_allowed_total",
                "Announces allowed by the allow-list or a promotion",
            )?,
            announces_denylisted: counter(
                "gate_announce_denylisted_total",
                "Announces denied because the infohash is deny-listed",
            )?,
            announces_unlisted: counter(
                "gate_announce_unlisted_total",
                "Announces denied because the infohash is in no list",
            )?,
            signature_failures: counter(
                "gate_signature_failures_total",
                "Signatures that failed to decode or verify",
            )?,
            promotions: counter(
                "gate_allowlist_promotions_total",
                "Infohashes promoted into the allow-set by signature",
            )?,
            scrapes: counter("gate_scrape_requests_total", "Scrape requests passed through")?,
            writes_persisted: counter(
                "gate_writeback_persisted_total",
                "Promotions written to the durable backend",
            )?,
            write_failures: counter(
                "gate_writeback_failures_total",
                "Promotions the durable backend failed to write",
            )?,
            writes_dropped: counter(
                "gate_writeback_dropped_total",
                "Promotions dropped because the write-back queue was full",
            )?,
            allowlist_size: IntGauge::new(
                "gate_allowlist_size",
                "Infohashes currently in the allow-set",
            )
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?,
            decision_duration: Histogram::with_opts(
                HistogramOpts::new(
                    "gate_announce_decision_duration_seconds",
                    "Time spent deciding an announce",
                )
                .buckets(buckets),
            )
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?,
        };

        let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
            Box::new(metrics.announces_received.clone()),
            Box::new(metrics.announces_allowed.clone()),
            Box::new(metrics.announces_denylisted.clone()),
            Box::new(metrics.announces_unlisted.clone()),
            Box::new(metrics.signature_failures.clone()),
            Box::new(metrics.promotions.clone()),
            Box::new(metrics.scrapes.clone()),
            Box::new(metrics.writes_persisted.clone()),
            Box::new(metrics.write_failures.clone()),
            Box::new(metrics.writes_dropped.clone()),
            Box::new(metrics.allowlist_size.clone()),
            Box::new(metrics.decision_duration.clone()),
        ];

        for collector in collectors {
            registry
                .register(collector)
                .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
        }

        Ok(metrics)
    }

    /// Render this instance's registry in Prometheus text format.
    pub fn encode(&self) -> Result<String, TelemetryError> {
        encode_registry(&self.registry)
    }
}

impl Default for ApprovalMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode any registry as Prometheus text format.
pub fn encode_registry(registry: &Registry) -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}
