//! Health check endpoint handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::atomic::Ordering;
use tracing::{debug, instrument};

use crate::state::SharedState;

/// Handler for the /health endpoint.
///
/// Reports 200 while the last live-state collection succeeded and 503 once
/// it failed, so orchestrators can distinguish a broken replikator seam
/// from a healthy exporter serving stale-but-valid series.
#[instrument(skip(state))]
pub async fn health_handler(State(state): State<SharedState>) -> impl IntoResponse {
    debug!("Processing /health request");

    state
        .metrics
        .http_requests_total
        .with_label_values(&["200", "GET"])
        .inc();

    let last_ok = state.last_scrape_ok.load(Ordering::Relaxed);
    let (status, message) = if last_ok {
        (StatusCode::OK, "OK")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "Last replikator collection failed")
    };

    let uptime_secs = state.start_time.elapsed().as_secs();
    let hours = uptime_secs / 3600;
    let minutes = (uptime_secs % 3600) / 60;
    let seconds = uptime_secs % 60;

    (
        status,
        [("Content-Type", "text/plain; charset=utf-8")],
        format!("{message}\n\nUptime: {hours}h {minutes}m {seconds}s\n"),
    )
}
