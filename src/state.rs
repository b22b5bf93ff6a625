//! Application state shared across HTTP handlers.

use prometheus::Registry;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::config::Config;
use crate::metrics::ReplikatorMetrics;
use crate::replikator::Invoke;

/// Type alias for shared application state.
pub type SharedState = Arc<AppState>;

/// Global application state shared across requests.
pub struct AppState {
    pub registry: Registry,
    pub metrics: ReplikatorMetrics,
    pub invoker: Box<dyn Invoke>,
    pub config: Arc<Config>,
    /// Serializes concurrent scrapes so one run's reset cannot race another
    /// run's observe and transiently drop valid label combinations.
    pub scrape_lock: Mutex<()>,
    /// Outcome of the most recent live-state collection, reported by /health.
    pub last_scrape_ok: AtomicBool,
    /// Server start time for uptime reporting.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config, invoker: Box<dyn Invoke>) -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let metrics = ReplikatorMetrics::new(&registry)?;

        Ok(Self {
            registry,
            metrics,
            invoker,
            config: Arc::new(config),
            scrape_lock: Mutex::new(()),
            last_scrape_ok: AtomicBool::new(true),
            start_time: Instant::now(),
        })
    }
}
