//! Sensor definitions YAML: types, parsing, and semantic validation.

pub mod parser;
pub mod types;
pub mod validator;

pub use parser::{parse_config, parse_config_str};
pub use types::{ProbeConfig, SensorConfig, VigilConfig};
pub use validator::validate_config;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use vigil_types::AssetKey;

use crate::probe::FileModifiedProbe;
use crate::sensor::SensorSpec;

/// Build runnable sensor definitions from a validated config.
///
/// # Errors
///
/// Returns an error when an asset key path does not parse. Run
/// [`validate_config`] first for a full error report.
pub fn sensor_specs(config: &VigilConfig) -> Result<Vec<SensorSpec>> {
    config
        .sensors
        .iter()
        .map(|sensor| {
            let assets = sensor
                .assets
                .iter()
                .map(|path| {
                    AssetKey::from_path(path).with_context(|| {
                        format!("sensor '{}': invalid asset key '{path}'", sensor.name)
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            let probe = match &sensor.probe {
                ProbeConfig::FileModified { path } => Arc::new(FileModifiedProbe::new(path)),
            };
            Ok(SensorSpec::new(
                sensor.name.as_str(),
                assets,
                probe,
                Duration::from_secs(sensor.min_interval_seconds),
            )
            .with_probe_timeout(Duration::from_secs(sensor.probe_timeout_seconds)))
        })
        .collect()
}
