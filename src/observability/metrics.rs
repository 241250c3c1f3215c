//! Metrics collection and exposition.
//!
//! # Metrics
//! - `blink_requests_total` (counter): requests by method, status
//! - `blink_request_duration_seconds` (histogram): latency by method
//! - `blink_price_refresh_total` (counter): oracle refreshes by outcome
//! - `blink_default_amount_sol` (gauge): default tip currently in effect

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled action request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    counter!(
        "blink_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("blink_request_duration_seconds", "method" => method.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record a price refresh attempt and the default it left in place.
pub fn record_price_refresh(success: bool, amount: f64) {
    let outcome = if success { "success" } else { "failure" };
    counter!("blink_price_refresh_total", "outcome" => outcome).increment(1);
    gauge!("blink_default_amount_sol").set(amount);
}
