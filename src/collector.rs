//! The per-scrape collection pipeline.
//!
//! One scrape runs the pipeline once: fetch the live-state listing, decode,
//! reset-then-repopulate the replication series, then do the same for the
//! backup listing. Failures never propagate to the HTTP response. A failed
//! main fetch or decode leaves the whole registry untouched so the previous
//! scrape's label set stays visible instead of collapsing; a failed backup
//! fetch only leaves the backup series stale.

use tracing::{debug, warn};

use crate::coerce;
use crate::metrics::ReplikatorMetrics;
use crate::replikator::{Invoke, LIST_ARGS, LIST_BACKUPS_ARGS};
use crate::status::{self, GlobalState};

/// Runs one collection cycle against the registry-backed metrics.
///
/// Returns `false` when the live-state listing could not be fetched or
/// decoded; the registry is not modified in that case.
pub fn collect(metrics: &ReplikatorMetrics, invoker: &dyn Invoke, lock_key: &str) -> bool {
    let raw = match invoker.invoke(lock_key, LIST_ARGS) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("replikator invocation failed: {e:#}");
            return false;
        }
    };

    let snapshot = match status::decode(&raw) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("keeping previous series, live-state listing undecodable: {e}");
            return false;
        }
    };

    publish_replication(metrics, &snapshot.global);
    collect_backups(metrics, invoker, lock_key);
    true
}

/// Fetches and publishes the backup listing. Backup failures are swallowed:
/// the backup series simply keep their prior values for this cycle.
fn collect_backups(metrics: &ReplikatorMetrics, invoker: &dyn Invoke, lock_key: &str) {
    let raw = match invoker.invoke(lock_key, LIST_BACKUPS_ARGS) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("replikator backup listing failed: {e:#}");
            return;
        }
    };

    match status::decode(&raw) {
        Ok(snapshot) => publish_backups(metrics, &snapshot.global),
        Err(e) => warn!("keeping previous backup series, listing undecodable: {e}"),
    }
}

fn publish_replication(metrics: &ReplikatorMetrics, global: &GlobalState) {
    metrics.reset_replication_metrics();

    let state = global.replication_state.to_lowercase();
    metrics
        .replication_lag
        .with_label_values(&[&state])
        .set(coerce::lag(&global.replication_lag));

    for (channel, lag) in &global.replication_lags {
        metrics
            .replication_lags
            .with_label_values(&[channel])
            .set(coerce::metric(lag));
    }

    metrics
        .replication_disk_usage
        .with_label_values(&[&state])
        .set(coerce::metric(&global.replication_size));

    metrics.disk_capacity.set(coerce::metric(&global.disk_capacity));
    metrics.disk_free.set(coerce::metric(&global.disk_free));
    metrics.memory_capacity.set(coerce::metric(&global.memory_capacity));
    metrics.memory_free.set(coerce::metric(&global.memory_free));

    for instance in &global.instances {
        // State is captured per replica, not globally, so a draining replica
        // shows its own state next to running ones.
        let instance_state = instance.state.to_lowercase();
        let labels = [instance.properties.instance_id.as_str(), instance_state.as_str()];

        metrics
            .replica_disk_usage
            .with_label_values(&labels)
            .set(coerce::metric(&instance.disk_usage));
        metrics
            .replica_memory_allocated
            .with_label_values(&labels)
            .set(coerce::metric(&instance.memory_allocated));
        metrics
            .replica_memory_used
            .with_label_values(&labels)
            .set(coerce::metric(&instance.memory_used));
    }

    debug!(
        "Published replication state '{}' with {} replicas, {} channels",
        state,
        global.instances.len(),
        global.replication_lags.len()
    );
}

fn publish_backups(metrics: &ReplikatorMetrics, global: &GlobalState) {
    metrics.reset_backup_metrics();

    for backup in &global.instances {
        metrics
            .backup_timestamp_seconds
            .with_label_values(&[&backup.properties.instance_id])
            .set(coerce::metric(&backup.properties.created_at));
    }

    debug!("Published {} backup timestamps", global.instances.len());
}
