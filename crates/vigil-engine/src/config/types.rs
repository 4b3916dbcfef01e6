use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VigilConfig {
    pub version: String,
    /// SQLite file backing the cursor store.
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,
    /// Manifest JSON to build the asset catalog from, if any.
    pub manifest: Option<PathBuf>,
    /// Prefix prepended to every translated asset key.
    pub key_prefix: Option<String>,
    /// Group assigned to manifest records that declare none.
    pub group: Option<String>,
    pub sensors: Vec<SensorConfig>,
}

fn default_state_path() -> PathBuf {
    PathBuf::from(".vigil/state.db")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    pub name: String,
    /// Asset key paths materialized on change, e.g. `raw/transactions`.
    pub assets: Vec<String>,
    pub probe: ProbeConfig,
    #[serde(default = "default_min_interval_seconds")]
    pub min_interval_seconds: u64,
    #[serde(default = "default_probe_timeout_seconds")]
    pub probe_timeout_seconds: u64,
}

fn default_min_interval_seconds() -> u64 {
    30
}
fn default_probe_timeout_seconds() -> u64 {
    30
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProbeConfig {
    /// Watch a file's last-modified time.
    FileModified { path: PathBuf },
}
