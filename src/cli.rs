//! CLI arguments for replikator-exporter.
//!
//! This module defines the command-line interface structure using the clap
//! library.

use clap::{Parser, ValueEnum};
use std::net::IpAddr;
use std::path::PathBuf;

/// Log level options for CLI parsing
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "replikator-exporter",
    about = "Prometheus exporter for replikator replication state and backups",
    long_about = "Prometheus exporter for replikator replication state and backups.\n\n\
                  On every scrape the exporter queries the replikator binary for the live \
                  replication state and the backup listing and republishes them as \
                  Prometheus gauges.",
    version
)]
pub struct Args {
    /// HTTP listen port
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Bind to specific interface/IP
    #[arg(long)]
    pub bind: Option<IpAddr>,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Config file (TOML/YAML/JSON)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long)]
    pub no_config: bool,

    /// Print effective merged config and exit
    #[arg(long)]
    pub show_config: bool,

    /// Validate config and exit (return code 1 on error)
    #[arg(long)]
    pub check_config: bool,

    /// Path to the replikator binary
    #[arg(long)]
    pub replikator_bin: Option<PathBuf>,

    /// Lock key passed through to every replikator invocation
    #[arg(long)]
    pub lock_key: Option<String>,
}
