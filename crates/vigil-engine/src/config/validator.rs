//! Semantic validation for parsed sensor definitions.

use std::collections::HashSet;

use anyhow::{bail, Result};
use vigil_types::AssetKey;

use crate::config::types::VigilConfig;

/// Validate a parsed sensor-definitions config.
/// Returns `Ok(())` if valid, Err with all validation errors if not.
///
/// # Errors
///
/// Returns an error listing all validation failures found in the config.
pub fn validate_config(config: &VigilConfig) -> Result<()> {
    let mut errors = Vec::new();

    if config.version != "1.0" {
        errors.push(format!(
            "Unsupported definitions version '{}', expected '1.0'",
            config.version
        ));
    }

    if config.sensors.is_empty() {
        errors.push("At least one sensor must be defined".to_string());
    }

    let mut seen_names = HashSet::new();
    for (i, sensor) in config.sensors.iter().enumerate() {
        let label = if sensor.name.trim().is_empty() {
            errors.push(format!("Sensor {i} has an empty name"));
            format!("sensors[{i}]")
        } else {
            format!("sensor '{}'", sensor.name)
        };

        if !seen_names.insert(sensor.name.as_str()) {
            errors.push(format!("Duplicate sensor name '{}'", sensor.name));
        }

        if sensor.assets.is_empty() {
            errors.push(format!("{label}: must target at least one asset"));
        }
        for asset in &sensor.assets {
            if let Err(err) = AssetKey::from_path(asset) {
                errors.push(format!("{label}: invalid asset key '{asset}': {err}"));
            }
        }

        if sensor.min_interval_seconds == 0 {
            errors.push(format!("{label}: min_interval_seconds must be > 0"));
        }
        if sensor.probe_timeout_seconds == 0 {
            errors.push(format!("{label}: probe_timeout_seconds must be > 0"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        bail!(
            "Sensor definitions validation failed:\n  - {}",
            errors.join("\n  - ")
        );
    }
}
