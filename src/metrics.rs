//! Prometheus metrics definitions for replikator-exporter.
//!
//! All series are registered against an explicit registry that is created
//! once at startup and lives for the process lifetime. Gauge vecs whose
//! label set can shrink between scrapes are cleared with the grouped reset
//! methods before repopulation; counters and the request histogram are
//! cumulative and are never reset.

use prometheus::{CounterVec, Gauge, GaugeVec, HistogramOpts, HistogramVec, Opts, Registry};

/// Collection of all replikator series plus HTTP instrumentation.
#[derive(Clone)]
pub struct ReplikatorMetrics {
    // ========== Replication Metrics ==========
    pub replication_lag: GaugeVec,        // labels: state
    pub replication_lags: GaugeVec,       // labels: channel
    pub replication_disk_usage: GaugeVec, // labels: state
    pub disk_capacity: Gauge,
    pub disk_free: Gauge,
    pub memory_capacity: Gauge,
    pub memory_free: Gauge,

    // ========== Replica Metrics ==========
    pub replica_disk_usage: GaugeVec,      // labels: replica, state
    pub replica_memory_allocated: GaugeVec, // labels: replica, state
    pub replica_memory_used: GaugeVec,     // labels: replica, state

    // ========== Backup Metrics ==========
    pub backup_timestamp_seconds: GaugeVec, // labels: backup

    // ========== HTTP Instrumentation ==========
    pub http_requests_total: CounterVec, // labels: code, method
    pub http_request_duration_seconds: HistogramVec, // labels: handler
}

impl ReplikatorMetrics {
    /// Creates and registers all series with the registry.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        // ========== Replication Metrics ==========
        let replication_lag = GaugeVec::new(
            Opts::new(
                "replikator_replication_lag",
                "Replication lag from master server",
            ),
            &["state"],
        )?;
        let replication_lags = GaugeVec::new(
            Opts::new(
                "replikator_replication_lags",
                "Replication lag per channel",
            ),
            &["channel"],
        )?;
        let replication_disk_usage = GaugeVec::new(
            Opts::new(
                "replikator_replication_disk_usage",
                "Disk usage by the replication process",
            ),
            &["state"],
        )?;
        let disk_capacity = Gauge::new("replikator_disk_capacity", "Disk capacity")?;
        let disk_free = Gauge::new("replikator_disk_free", "Disk free")?;
        let memory_capacity = Gauge::new("replikator_memory_capacity", "Memory capacity")?;
        let memory_free = Gauge::new("replikator_memory_free", "Memory free")?;

        // ========== Replica Metrics ==========
        let replica_disk_usage = GaugeVec::new(
            Opts::new("replikator_replica_disk_usage", "Disk usage by a replica"),
            &["replica", "state"],
        )?;
        let replica_memory_allocated = GaugeVec::new(
            Opts::new(
                "replikator_replica_memory_allocated",
                "Memory allocated for a replica",
            ),
            &["replica", "state"],
        )?;
        let replica_memory_used = GaugeVec::new(
            Opts::new(
                "replikator_replica_memory_used",
                "Memory used by a replica",
            ),
            &["replica", "state"],
        )?;

        // ========== Backup Metrics ==========
        let backup_timestamp_seconds = GaugeVec::new(
            Opts::new(
                "replikator_backup_timestamp_seconds",
                "Backup timestamp in seconds",
            ),
            &["backup"],
        )?;

        // ========== HTTP Instrumentation ==========
        let http_requests_total = CounterVec::new(
            Opts::new("http_requests_total", "Count of all HTTP requests"),
            &["code", "method"],
        )?;
        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request latencies in seconds",
            ),
            &["handler"],
        )?;

        // ========== Register All Metrics ==========
        registry.register(Box::new(replication_lag.clone()))?;
        registry.register(Box::new(replication_lags.clone()))?;
        registry.register(Box::new(replication_disk_usage.clone()))?;
        registry.register(Box::new(disk_capacity.clone()))?;
        registry.register(Box::new(disk_free.clone()))?;
        registry.register(Box::new(memory_capacity.clone()))?;
        registry.register(Box::new(memory_free.clone()))?;
        registry.register(Box::new(replica_disk_usage.clone()))?;
        registry.register(Box::new(replica_memory_allocated.clone()))?;
        registry.register(Box::new(replica_memory_used.clone()))?;
        registry.register(Box::new(backup_timestamp_seconds.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;

        Ok(Self {
            replication_lag,
            replication_lags,
            replication_disk_usage,
            disk_capacity,
            disk_free,
            memory_capacity,
            memory_free,
            replica_disk_usage,
            replica_memory_allocated,
            replica_memory_used,
            backup_timestamp_seconds,
            http_requests_total,
            http_request_duration_seconds,
        })
    }

    /// Clears every gauge vec repopulated from the live-state listing so
    /// replicas, channels, and states that disappeared since the previous
    /// scrape do not linger. The unlabeled capacity/free gauges are simply
    /// overwritten and need no reset.
    pub fn reset_replication_metrics(&self) {
        self.replication_lag.reset();
        self.replication_lags.reset();
        self.replication_disk_usage.reset();
        self.replica_disk_usage.reset();
        self.replica_memory_allocated.reset();
        self.replica_memory_used.reset();
    }

    /// Clears the backup timestamp series before repopulating from a
    /// successfully decoded backup listing.
    pub fn reset_backup_metrics(&self) {
        self.backup_timestamp_seconds.reset();
    }
}
