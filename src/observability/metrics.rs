//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bridge_operations_total` (counter): bridge operations by name and outcome
//! - `bridge_sends_total` (counter): send attempts by outcome
//! - `bridge_transactions_loaded` (gauge): records in the last full resync

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Start the Prometheus scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the outcome of a bridge operation.
pub fn record_operation(operation: &'static str, success: bool) {
    let outcome = if success { "ok" } else { "error" };
    metrics::counter!("bridge_operations_total", "operation" => operation, "outcome" => outcome)
        .increment(1);
}

/// Record how a send attempt ended.
pub fn record_send(outcome: &'static str) {
    metrics::counter!("bridge_sends_total", "outcome" => outcome).increment(1);
}

/// Record the size of the transaction list after a resync.
pub fn record_transactions_loaded(count: usize) {
    metrics::gauge!("bridge_transactions_loaded").set(count as f64);
}
