//! Metrics collection and exposition.
//!
//! # Metrics
//! - `echo_renders_total` (counter): rendered pages by handler, status
//! - `echo_render_duration_seconds` (histogram): render latency by handler
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Prometheus exporter serves its own HTTP listener

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::render::HandlerKind;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one rendered page.
pub fn record_render(handler: HandlerKind, status: u16, start_time: Instant) {
    ::metrics::counter!(
        "echo_renders_total",
        "handler" => handler.as_str(),
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("echo_render_duration_seconds", "handler" => handler.as_str())
        .record(start_time.elapsed().as_secs_f64());
}
