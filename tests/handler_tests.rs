//! Integration tests for the /metrics and /health endpoint handlers.

use axum::extract::State;
use axum::response::IntoResponse;
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};

use replikator_exporter::config::Config;
use replikator_exporter::handlers::{health_handler, metrics_handler};
use replikator_exporter::replikator::{Invoke, LIST_ARGS, LIST_BACKUPS_ARGS};
use replikator_exporter::state::{AppState, SharedState};

/// Mock invoker with shared interior state so tests can swap replikator's
/// output between requests against the same exporter state.
#[derive(Clone)]
struct MockReplikator {
    main: Arc<Mutex<String>>,
    backups: Arc<Mutex<String>>,
}

impl MockReplikator {
    fn new(main: &str, backups: &str) -> Self {
        Self {
            main: Arc::new(Mutex::new(main.to_string())),
            backups: Arc::new(Mutex::new(backups.to_string())),
        }
    }

    fn set_main(&self, raw: &str) {
        *self.main.lock().unwrap() = raw.to_string();
    }
}

impl Invoke for MockReplikator {
    fn invoke(&self, _lock_key: &str, args: &str) -> anyhow::Result<String> {
        match args {
            LIST_ARGS => Ok(self.main.lock().unwrap().clone()),
            LIST_BACKUPS_ARGS => Ok(self.backups.lock().unwrap().clone()),
            other => anyhow::bail!("unexpected arguments: {other}"),
        }
    }
}

fn load_asset(name: &str) -> String {
    std::fs::read_to_string(format!("tests/assets/{name}"))
        .unwrap_or_else(|e| panic!("failed to load fixture {name}: {e}"))
}

fn test_state(mock: &MockReplikator) -> SharedState {
    Arc::new(AppState::new(Config::default(), Box::new(mock.clone())).unwrap())
}

#[tokio::test]
async fn metrics_endpoint_serves_replication_series() {
    let mock = MockReplikator::new(
        &load_asset("with-replication-lags.json"),
        &load_asset("backups.json"),
    );
    let state = test_state(&mock);

    let body = metrics_handler(State(state)).await.expect("200 response");

    assert!(body.contains(r#"replikator_replication_lag{state="running"} 5"#));
    assert!(body.contains(r#"replikator_replication_lags{channel="worst"} 5"#));
    assert!(body.contains(r#"replikator_backup_timestamp_seconds{backup="backup-20241225-1600"}"#));
    assert!(body.contains("replikator_disk_capacity 107374182400"));
}

#[tokio::test]
async fn malformed_payload_still_serves_previous_registry() {
    let mock = MockReplikator::new(
        &load_asset("with-replication-lags.json"),
        &load_asset("backups.json"),
    );
    let state = test_state(&mock);

    let first = metrics_handler(State(state.clone())).await.expect("200 response");
    assert!(first.contains(r#"replikator_replication_lag{state="running"} 5"#));

    mock.set_main("ERROR: lock held by another process");
    let second = metrics_handler(State(state.clone())).await.expect("200 response");

    // Previous scrape's series are still served unchanged.
    assert!(second.contains(r#"replikator_replication_lag{state="running"} 5"#));
    assert!(second.contains(r#"replikator_replica_disk_usage{replica="replica-03",state="draining"}"#));
    assert!(!state.last_scrape_ok.load(Ordering::Relaxed));
}

#[tokio::test]
async fn request_instrumentation_accumulates() {
    let mock = MockReplikator::new(
        &load_asset("with-replication-lags.json"),
        &load_asset("backups.json"),
    );
    let state = test_state(&mock);

    metrics_handler(State(state.clone())).await.expect("200 response");
    let second = metrics_handler(State(state)).await.expect("200 response");

    // The first request's counter increment is visible by the second scrape.
    assert!(second.contains(r#"http_requests_total{code="200",method="GET"} 1"#));
    assert!(second.contains("http_request_duration_seconds_count"));
    // Successfully served requests count under 200 only.
    assert!(!second.contains(r#"code="500""#));
}

#[tokio::test]
async fn collection_failures_still_count_as_served_200s() {
    let mock = MockReplikator::new("not json", "{}");
    let state = test_state(&mock);

    metrics_handler(State(state.clone())).await.expect("200 response");
    let second = metrics_handler(State(state)).await.expect("200 response");

    // A failed collection is still a served scrape, not an HTTP error.
    assert!(second.contains(r#"http_requests_total{code="200",method="GET"} 1"#));
    assert!(!second.contains(r#"code="500""#));
}

#[tokio::test]
async fn health_reports_ok_then_unavailable() {
    let mock = MockReplikator::new(
        &load_asset("with-replication-lags.json"),
        &load_asset("backups.json"),
    );
    let state = test_state(&mock);

    metrics_handler(State(state.clone())).await.expect("200 response");
    let response = health_handler(State(state.clone())).await.into_response();
    assert_eq!(response.status(), axum::http::StatusCode::OK);

    mock.set_main("garbage");
    metrics_handler(State(state.clone())).await.expect("200 response");
    let response = health_handler(State(state)).await.into_response();
    assert_eq!(response.status(), axum::http::StatusCode::SERVICE_UNAVAILABLE);
}
