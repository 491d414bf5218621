//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): forwarded calls by method, status, target
//! - `gateway_request_duration_seconds` (histogram): backend latency by target
//! - `gateway_upstream_failures_total` (counter): network failures by target, kind
//! - `gateway_session_decisions_total` (counter): gate outcomes
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed, so tests and
//!   metrics-disabled deployments pay nothing
//! - `target` is the backend path template, never a raw path with ids

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one forwarded backend call.
pub fn record_request(method: &str, status: u16, target: &str, start: Instant) {
    counter!(
        "gateway_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "target" => target.to_string()
    )
    .increment(1);
    histogram!("gateway_request_duration_seconds", "target" => target.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record a backend call that never produced a response.
pub fn record_upstream_failure(target: &str, kind: &'static str) {
    counter!(
        "gateway_upstream_failures_total",
        "target" => target.to_string(),
        "kind" => kind
    )
    .increment(1);
}

pub fn record_session_decision(decision: &'static str) {
    counter!("gateway_session_decisions_total", "decision" => decision).increment(1);
}
