//! Metrics collection and exposition.
//!
//! # Metrics
//! - `redirector_resolutions_total` (counter): redirects issued, by source
//! - `redirector_fallthrough_total` (counter): requests no source matched
//! - `redirector_store_errors_total` (counter): store lookups degraded to a miss
//! - `redirector_mapping_entries` (gauge): entries loaded per in-memory table

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Start the Prometheus scrape endpoint on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_resolution(source: &str) {
    metrics::counter!("redirector_resolutions_total", "source" => source.to_string()).increment(1);
}

pub fn record_fallthrough() {
    metrics::counter!("redirector_fallthrough_total").increment(1);
}

pub fn record_store_error() {
    metrics::counter!("redirector_store_errors_total").increment(1);
}

pub fn record_table_size(source: &str, entries: usize) {
    metrics::gauge!("redirector_mapping_entries", "source" => source.to_string()).set(entries as f64);
}
