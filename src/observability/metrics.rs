//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_resolutions_total` (counter): resolutions by outcome
//! - `router_routing_errors_total` (counter): misconfiguration hits by kind
//! - `router_redirect_hops` (histogram): top-level redirects per resolution
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op
//! - The Prometheus recorder is installed only on request and rendered
//!   on demand (no HTTP listener)

use ::metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install a global Prometheus recorder and return a handle for rendering.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    tracing::info!("Prometheus metrics recorder installed");
    Ok(handle)
}

pub fn record_resolution(outcome: &'static str, hops: usize) {
    counter!("router_resolutions_total", "outcome" => outcome).increment(1);
    histogram!("router_redirect_hops").record(hops as f64);
}

pub fn record_routing_error(kind: &'static str) {
    counter!("router_routing_errors_total", "kind" => kind).increment(1);
}
