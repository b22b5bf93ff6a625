//! Prometheus exporter for the replikator replication-management tool.
//!
//! On every scrape of `/metrics` the exporter invokes the replikator binary
//! twice (live-state listing, backup listing), decodes the stringly-typed
//! JSON status dump into a typed snapshot, and reconciles it against a
//! long-lived registry of labeled series so replicas, channels, and backups
//! that disappeared since the previous scrape disappear from the exposition
//! too.

pub mod cli;
pub mod coerce;
pub mod collector;
pub mod config;
pub mod handlers;
pub mod metrics;
pub mod replikator;
pub mod state;
pub mod status;
