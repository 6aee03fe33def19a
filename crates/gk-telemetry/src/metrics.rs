//! Prometheus metrics for the admission layer.
//!
//! All metrics follow the naming convention: `gk_<component>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, HistogramOpts, HistogramVec, Opts,
    Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // ANTE PIPELINE
    // =========================================================================

    /// Transactions that passed every decorator
    pub static ref ANTE_ADMITTED: CounterVec = CounterVec::new(
        Opts::new("gk_ante_admitted_total", "Transactions admitted by the ante pipeline"),
        &["mode"]  // tentative/final
    ).expect("metric creation failed");

    /// Rejections by the decorator that failed
    pub static ref ANTE_REJECTED: CounterVec = CounterVec::new(
        Opts::new("gk_ante_rejected_total", "Transactions rejected by the ante pipeline"),
        &["mode", "decorator"]
    ).expect("metric creation failed");

    /// Time spent in one pipeline pass
    pub static ref ANTE_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "gk_ante_duration_seconds",
            "Time spent running the ante pipeline for one transaction"
        ).buckets(exponential_buckets(0.00005, 2.0, 14).expect("valid buckets")),
        &["mode"]
    ).expect("metric creation failed");

    // =========================================================================
    // SIGNATURES
    // =========================================================================

    /// Signature checks performed by the verification decorator
    pub static ref SIGNATURE_VERIFICATIONS: Counter = Counter::new(
        "gk_signature_verifications_total",
        "Total signature verifications performed"
    ).expect("metric creation failed");

    /// Signature checks that failed
    pub static ref SIGNATURE_FAILURES: Counter = Counter::new(
        "gk_signature_failures_total",
        "Total signature verifications that failed"
    ).expect("metric creation failed");

    // =========================================================================
    // HARDWARE SIGNER
    // =========================================================================

    /// Device requests by operation and outcome
    pub static ref DEVICE_REQUESTS: CounterVec = CounterVec::new(
        Opts::new("gk_device_requests_total", "Hardware signer requests"),
        &["operation", "outcome"]  // outcome: ok/rejected/error
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(ANTE_ADMITTED.clone()),
        Box::new(ANTE_REJECTED.clone()),
        Box::new(ANTE_DURATION.clone()),
        Box::new(SIGNATURE_VERIFICATIONS.clone()),
        Box::new(SIGNATURE_FAILURES.clone()),
        Box::new(DEVICE_REQUESTS.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: prometheus::Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start timing `histogram` for the given label values.
    pub fn new(histogram: &HistogramVec, labels: &[&str]) -> Self {
        Self {
            histogram: histogram.with_label_values(labels),
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
