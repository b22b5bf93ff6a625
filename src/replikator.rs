//! Invocation of the external replikator binary.
//!
//! The exporter never interprets the lock key, it only passes it through.
//! `Invoke` is the seam that tests replace with a mock returning canned
//! JSON.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// Argument string for the live-state listing.
pub const LIST_ARGS: &str = "--output json --list";

/// Argument string for the backup listing.
pub const LIST_BACKUPS_ARGS: &str = "--output json --list-backups";

/// Seam for invoking replikator. Called twice per scrape.
pub trait Invoke: Send + Sync {
    /// Runs replikator with the given lock key and argument string and
    /// returns its raw stdout.
    fn invoke(&self, lock_key: &str, args: &str) -> Result<String>;
}

/// Production invoker that shells out to the configured replikator binary.
pub struct ReplikatorCommand {
    binary: PathBuf,
}

impl ReplikatorCommand {
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }
}

impl Invoke for ReplikatorCommand {
    fn invoke(&self, lock_key: &str, args: &str) -> Result<String> {
        debug!("Invoking {} with args: {}", self.binary.display(), args);

        let output = Command::new(&self.binary)
            .arg("--lock-key")
            .arg(lock_key)
            .args(args.split_whitespace())
            .output()
            .with_context(|| format!("failed to run {}", self.binary.display()))?;

        if !output.status.success() {
            anyhow::bail!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        String::from_utf8(output.stdout).context("replikator output is not valid UTF-8")
    }
}
