//! Root endpoint handler for the landing page.

use axum::response::{Html, IntoResponse};
use tracing::{debug, instrument};

/// Handler for the root `/` endpoint.
#[instrument]
pub async fn root_handler() -> impl IntoResponse {
    debug!("Processing / request");

    let version = env!("CARGO_PKG_VERSION");

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Replikator Exporter</title>
</head>
<body>
    <h1>Replikator Exporter v{version}</h1>
    <p>Prometheus exporter for replikator replication state and backups.</p>
    <ul>
        <li><a href="/metrics">/metrics</a> - Prometheus metrics</li>
        <li><a href="/health">/health</a> - Health check</li>
    </ul>
</body>
</html>"#
    );

    Html(html)
}
