//! Metrics collection for observability

use prometheus::{
    register_counter_vec_with_registry, register_histogram_with_registry, CounterVec,
    Histogram, Opts, Registry,
};
use std::sync::Arc;
use once_cell::sync::Lazy;

/// Global metrics registry
pub static METRICS: Lazy<Arc<Metrics>> = Lazy::new(|| {
    Arc::new(Metrics::new().expect("Failed to initialize metrics"))
});

/// Metrics collector
pub struct Metrics {
    registry: Registry,

    // Router metrics
    pub turns_resolved: CounterVec,

    // Fact store metrics
    pub fact_queries: CounterVec,

    // Completion backend metrics
    pub completion_requests: CounterVec,
    pub completion_duration: Histogram,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let registry = Registry::new();

        let turns_resolved = register_counter_vec_with_registry!(
            Opts::new("advisor_turns_total", "User turns by resolving intent"),
            &["intent"],
            registry
        )?;

        let fact_queries = register_counter_vec_with_registry!(
            Opts::new("fact_queries_total", "Fact store queries by template kind and outcome"),
            &["kind", "outcome"],
            registry
        )?;

        let completion_requests = register_counter_vec_with_registry!(
            Opts::new("completion_requests_total", "Completion backend calls by status"),
            &["status"],
            registry
        )?;

        let completion_duration = register_histogram_with_registry!(
            "completion_request_duration_seconds",
            "Completion backend call duration in seconds",
            registry
        )?;

        Ok(Self {
            registry,
            turns_resolved,
            fact_queries,
            completion_requests,
            completion_duration,
        })
    }

    /// Record which intent resolved a turn
    pub fn record_turn(&self, intent: &str) {
        self.turns_resolved.with_label_values(&[intent]).inc();
    }

    /// Record a completion backend call
    pub fn record_completion(&self, success: bool, seconds: f64) {
        let status = if success { "success" } else { "error" };
        self.completion_requests.with_label_values(&[status]).inc();
        self.completion_duration.observe(seconds);
    }

    /// Export metrics in Prometheus text format
    pub fn render(&self) -> String {
        use prometheus::Encoder;

        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();

        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).unwrap_or_default();

        String::from_utf8(buffer).unwrap_or_default()
    }
}
