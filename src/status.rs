//! Decoding of replikator's JSON status output into a typed snapshot.
//!
//! Replikator emits a semi-structured dump where every scalar is a string
//! (`"iReplicationLag": "5"`). Decoding is permissive field by field: a
//! missing key or a value of the wrong JSON type defaults the field instead
//! of failing the decode. The only hard failure is output that is not valid
//! JSON at all, which aborts the publish step for that call so the registry
//! keeps the previous scrape's series.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Error returned when replikator's output cannot be decoded at all.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("replikator output is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Top-level shape of both the `--list` and `--list-backups` outputs.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ReplikatorStatus {
    #[serde(rename = "DatabaseGlobalState", deserialize_with = "lenient")]
    pub global: GlobalState,
}

/// Global replication state plus the per-instance (or per-backup) list.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GlobalState {
    #[serde(rename = "eReplicationState", deserialize_with = "lenient")]
    pub replication_state: String,
    #[serde(rename = "iReplicationLag", deserialize_with = "lenient")]
    pub replication_lag: String,
    #[serde(rename = "iReplicationLags", deserialize_with = "lenient")]
    pub replication_lags: BTreeMap<String, String>,
    #[serde(rename = "sReplicationSize", deserialize_with = "lenient")]
    pub replication_size: String,
    #[serde(rename = "sTotalStorageCapacity", deserialize_with = "lenient")]
    pub disk_capacity: String,
    #[serde(rename = "sTotalStorageFree", deserialize_with = "lenient")]
    pub disk_free: String,
    #[serde(rename = "sTotalMemCapacity", deserialize_with = "lenient")]
    pub memory_capacity: String,
    #[serde(rename = "sTotalMemFree", deserialize_with = "lenient")]
    pub memory_free: String,
    #[serde(rename = "DatabaseInstanceState", deserialize_with = "lenient")]
    pub instances: Vec<InstanceState>,
}

/// One live replica, or one backup in the `--list-backups` output where the
/// instance id is the backup name and the creation timestamp is the value
/// that gets published.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct InstanceState {
    #[serde(rename = "DatabaseProperties", deserialize_with = "lenient")]
    pub properties: InstanceProperties,
    #[serde(rename = "eState", deserialize_with = "lenient")]
    pub state: String,
    #[serde(rename = "sSizeTotal", deserialize_with = "lenient")]
    pub disk_usage: String,
    #[serde(rename = "sMemAllocated", deserialize_with = "lenient")]
    pub memory_allocated: String,
    #[serde(rename = "sMemUsed", deserialize_with = "lenient")]
    pub memory_used: String,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct InstanceProperties {
    #[serde(rename = "sInstanceId", deserialize_with = "lenient")]
    pub instance_id: String,
    #[serde(rename = "iCreationTimestamp", deserialize_with = "lenient")]
    pub created_at: String,
}

/// Decodes one raw replikator output into a snapshot.
pub fn decode(raw: &str) -> Result<ReplikatorStatus, DecodeError> {
    Ok(serde_json::from_str(raw)?)
}

/// Deserializes a field, absorbing type mismatches into the default value.
/// A field that exists but holds the wrong JSON type must not abort the
/// whole decode.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}
