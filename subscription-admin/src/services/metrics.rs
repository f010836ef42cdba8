//! Metrics module for subscription-admin.
//! Provides Prometheus metrics for Admin API usage and subscription aggregation.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{Histogram, HistogramOpts, IntCounterVec, Opts, Registry};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
pub static PROMETHEUS_REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Admin API requests by operation and outcome
pub static ADMIN_API_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Aggregations by status view and outcome
pub static AGGREGATIONS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Subscription pages fetched per aggregation
pub static SUBSCRIPTION_PAGES_FETCHED: OnceLock<Histogram> = OnceLock::new();

/// Initialize all metrics. Safe to call more than once; later calls are no-ops.
pub fn init_metrics() {
    if PROMETHEUS_REGISTRY.get().is_some() {
        return;
    }

    // HTTP middleware metrics go through the `metrics` facade
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = METRICS_HANDLE.set(handle);
        }
        Err(e) => {
            tracing::warn!(error = %e, "Prometheus recorder already installed");
        }
    }

    let registry = Registry::new();

    let api_requests = IntCounterVec::new(
        Opts::new(
            "admin_api_requests_total",
            "Total Admin API requests by operation and outcome",
        ),
        &["operation", "outcome"],
    )
    .expect("Failed to create admin_api_requests_total metric");

    let aggregations = IntCounterVec::new(
        Opts::new(
            "subscription_aggregations_total",
            "Total subscription aggregations by status view and outcome",
        ),
        &["view", "outcome"],
    )
    .expect("Failed to create subscription_aggregations_total metric");

    let pages_fetched = Histogram::with_opts(
        HistogramOpts::new(
            "subscription_pages_fetched",
            "Subscription pages fetched per aggregation",
        )
        .buckets(vec![1.0, 2.0, 3.0, 4.0, 5.0, 10.0]),
    )
    .expect("Failed to create subscription_pages_fetched metric");

    registry
        .register(Box::new(api_requests.clone()))
        .expect("Failed to register admin_api_requests_total");
    registry
        .register(Box::new(aggregations.clone()))
        .expect("Failed to register subscription_aggregations_total");
    registry
        .register(Box::new(pages_fetched.clone()))
        .expect("Failed to register subscription_pages_fetched");

    let _ = ADMIN_API_REQUESTS_TOTAL.set(api_requests);
    let _ = AGGREGATIONS_TOTAL.set(aggregations);
    let _ = SUBSCRIPTION_PAGES_FETCHED.set(pages_fetched);
    let _ = PROMETHEUS_REGISTRY.set(registry);
}

pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string());

    // Append custom prometheus metrics
    if let Some(registry) = PROMETHEUS_REGISTRY.get() {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).ok();
        if let Ok(custom_metrics) = String::from_utf8(buffer) {
            output.push_str(&custom_metrics);
        }
    }

    output
}

pub fn record_admin_api_request(operation: &str, outcome: &str) {
    if let Some(counter) = ADMIN_API_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[operation, outcome]).inc();
    }
}

pub fn record_aggregation(view: &str, outcome: &str) {
    if let Some(counter) = AGGREGATIONS_TOTAL.get() {
        counter.with_label_values(&[view, outcome]).inc();
    }
}

pub fn record_pages_fetched(pages: u32) {
    if let Some(histogram) = SUBSCRIPTION_PAGES_FETCHED.get() {
        histogram.observe(f64::from(pages));
    }
}
