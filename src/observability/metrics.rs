//! Metrics collection and exposition.
//!
//! # Metrics
//! - `scaffold_ping_requests_total` (counter): ping requests by service
//! - `scaffold_ping_interrupted_total` (counter): ping delays cut short by shutdown
//! - `scaffold_generated_events_total` (counter): scheduled log lines by service, level
//!
//! Without an installed recorder the macros are no-ops, so tests and runs
//! with metrics disabled pay nothing.

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_ping(service: &str) {
    metrics::counter!("scaffold_ping_requests_total", "service" => service.to_string()).increment(1);
}

pub fn record_ping_interrupted(service: &str) {
    metrics::counter!("scaffold_ping_interrupted_total", "service" => service.to_string())
        .increment(1);
}

pub fn record_generated_event(service: &str, level: &'static str) {
    metrics::counter!(
        "scaffold_generated_events_total",
        "service" => service.to_string(),
        "level" => level
    )
    .increment(1);
}
