//! Prometheus metrics
//!
//! - `hotel_concierge_turns_total{intent}`
//! - `hotel_concierge_rejections_total{reason}`
//! - `hotel_concierge_turn_latency_seconds`

use axum::http::StatusCode;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use std::time::Duration;

use hotel_concierge_core::TurnResult;

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the global Prometheus recorder
///
/// Safe to call more than once; later calls return the installed handle.
pub fn init_metrics() -> Option<PrometheusHandle> {
    HANDLE
        .get_or_try_init(|| PrometheusBuilder::new().install_recorder())
        .map_err(|e| tracing::warn!(error = %e, "Failed to install Prometheus recorder"))
        .ok()
        .cloned()
}

/// Record one handled turn
pub fn record_turn(turn: &TurnResult, latency: Duration) {
    metrics::counter!("hotel_concierge_turns_total", "intent" => turn.intent.clone()).increment(1);
    if let Some(reason) = turn.rejection_reason() {
        metrics::counter!("hotel_concierge_rejections_total", "reason" => reason.as_str())
            .increment(1);
    }
    metrics::histogram!("hotel_concierge_turn_latency_seconds").record(latency.as_secs_f64());
}

/// `GET /metrics`
pub async fn metrics_handler() -> (StatusCode, String) {
    match HANDLE.get() {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics recorder not installed".to_string(),
        ),
    }
}
