//! Metrics endpoint handler for Prometheus scraping.
//!
//! Every scrape triggers one synchronous collection cycle before the
//! registry is encoded, so the response always reflects the freshest state
//! replikator would give us. Collection failures are absorbed: the previous
//! scrape's series stay visible and the response is still a 200.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use prometheus::{Encoder, TextEncoder};
use std::sync::atomic::Ordering;
use std::time::Instant;
use tracing::{debug, error, instrument};

use crate::collector;
use crate::state::SharedState;

/// Buffer capacity for metrics encoding.
const BUFFER_CAP: usize = 16 * 1024;

/// Error type for metrics endpoint failures.
#[derive(Debug)]
pub enum MetricsError {
    EncodingFailed,
}

impl IntoResponse for MetricsError {
    fn into_response(self) -> axum::response::Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to encode metrics",
        )
            .into_response()
    }
}

/// Handler for the /metrics endpoint.
#[instrument(skip(state))]
pub async fn metrics_handler(State(state): State<SharedState>) -> Result<String, MetricsError> {
    let start = Instant::now();
    debug!("Processing /metrics request");

    {
        // Hold the scrape lock across reset and repopulate so concurrent
        // scrapes cannot interleave.
        let _guard = state
            .scrape_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let ok = collector::collect(
            &state.metrics,
            state.invoker.as_ref(),
            state.config.effective_lock_key(),
        );
        state.last_scrape_ok.store(ok, Ordering::Relaxed);
    }

    let families = state.registry.gather();
    let mut buffer = Vec::with_capacity(BUFFER_CAP);
    let encoder = TextEncoder::new();

    if encoder.encode(&families, &mut buffer).is_err() {
        error!("Failed to encode Prometheus metrics");
        state
            .metrics
            .http_requests_total
            .with_label_values(&["500", "GET"])
            .inc();
        return Err(MetricsError::EncodingFailed);
    }

    let body = match String::from_utf8(buffer) {
        Ok(body) => body,
        Err(_) => {
            error!("Encoded metrics are not valid UTF-8");
            state
                .metrics
                .http_requests_total
                .with_label_values(&["500", "GET"])
                .inc();
            return Err(MetricsError::EncodingFailed);
        }
    };

    state
        .metrics
        .http_requests_total
        .with_label_values(&["200", "GET"])
        .inc();
    state
        .metrics
        .http_request_duration_seconds
        .with_label_values(&["metrics"])
        .observe(start.elapsed().as_secs_f64());

    debug!(
        "Metrics request completed: {} bytes, {:.3}ms",
        body.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(body)
}
