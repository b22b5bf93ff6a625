//! Configuration management for replikator-exporter.
//!
//! Handles loading, merging, and validating configuration from files and CLI
//! arguments. TOML, YAML, and JSON formats are supported, picked by file
//! extension. CLI arguments take precedence over file values.

use crate::cli::Args;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use tracing::info;

// Default configuration constants
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 9217;
pub const DEFAULT_REPLIKATOR_BIN: &str = "replikator";
pub const DEFAULT_LOCK_KEY: &str = "replikator-exporter";

/// Default locations probed when no --config is given.
const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "/etc/replikator-exporter/config.toml",
    "/etc/replikator-exporter/config.yaml",
    "replikator-exporter.toml",
];

/// Exporter configuration. Every field is optional; effective values are
/// resolved against the defaults above.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    // Server configuration
    pub port: Option<u16>,
    pub bind: Option<String>,

    // Logging
    pub log_level: Option<String>,

    // Replikator invocation
    pub replikator_bin: Option<PathBuf>,
    pub lock_key: Option<String>,
}

impl Config {
    pub fn effective_bind(&self) -> &str {
        self.bind.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn effective_replikator_bin(&self) -> PathBuf {
        self.replikator_bin
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REPLIKATOR_BIN))
    }

    pub fn effective_lock_key(&self) -> &str {
        self.lock_key.as_deref().unwrap_or(DEFAULT_LOCK_KEY)
    }
}

/// Loads a config file, choosing the parser by extension.
fn load_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;

    let config = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("invalid YAML in {}", path.display()))?,
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON in {}", path.display()))?,
        _ => toml::from_str(&content)
            .with_context(|| format!("invalid TOML in {}", path.display()))?,
    };

    Ok(config)
}

/// Resolves the effective configuration: file values first, then CLI
/// arguments layered on top.
pub fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = if args.no_config {
        Config::default()
    } else if let Some(path) = &args.config {
        let config = load_config_file(path)?;
        info!("Loaded config from {}", path.display());
        config
    } else {
        let mut found = Config::default();
        for candidate in DEFAULT_CONFIG_PATHS {
            let path = Path::new(candidate);
            if path.is_file() {
                found = load_config_file(path)?;
                info!("Loaded config from {}", path.display());
                break;
            }
        }
        found
    };

    // CLI overrides
    if let Some(port) = args.port {
        config.port = Some(port);
    }
    if let Some(bind) = args.bind {
        config.bind = Some(bind.to_string());
    }
    if let Some(bin) = &args.replikator_bin {
        config.replikator_bin = Some(bin.clone());
    }
    if let Some(lock_key) = &args.lock_key {
        config.lock_key = Some(lock_key.clone());
    }

    Ok(config)
}

/// Validates the effective configuration, with actionable messages.
pub fn validate_effective_config(config: &Config) -> Result<()> {
    if config.effective_port() == 0 {
        bail!("port must not be 0");
    }

    if config.effective_bind().parse::<IpAddr>().is_err() {
        bail!(
            "bind address '{}' is not a valid IP address",
            config.effective_bind()
        );
    }

    if config.effective_replikator_bin().as_os_str().is_empty() {
        bail!("replikator_bin must not be empty");
    }

    if config.effective_lock_key().is_empty() {
        bail!("lock_key must not be empty");
    }

    Ok(())
}

/// Prints the effective merged config as YAML.
pub fn show_config(config: &Config) -> Result<()> {
    println!("{}", serde_yaml::to_string(config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_effective_config(&Config::default()).is_ok());
    }

    #[test]
    fn rejects_bad_bind_address() {
        let config = Config {
            bind: Some("not-an-ip".into()),
            ..Config::default()
        };
        assert!(validate_effective_config(&config).is_err());
    }

    #[test]
    fn rejects_port_zero() {
        let config = Config {
            port: Some(0),
            ..Config::default()
        };
        assert!(validate_effective_config(&config).is_err());
    }

    #[test]
    fn rejects_empty_lock_key() {
        let config = Config {
            lock_key: Some(String::new()),
            ..Config::default()
        };
        assert!(validate_effective_config(&config).is_err());
    }
}
