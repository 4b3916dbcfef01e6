use std::path::Path;

use anyhow::Result;
use vigil_state::SqliteCursorStore;
use vigil_types::AssetKey;

use crate::commands::{load_catalog, load_config};

/// Execute the `check` command: validate definitions, catalog coverage,
/// and the state backend.
pub fn execute(definitions_path: &Path) -> Result<()> {
    let config = load_config(definitions_path)?;
    println!("Definitions structure: OK");

    match SqliteCursorStore::open(&config.state_path) {
        Ok(_) => println!("State backend:         OK"),
        Err(err) => {
            println!("State backend:         FAILED ({err})");
            anyhow::bail!("One or more checks failed");
        }
    }

    let Some(catalog) = load_catalog(&config)? else {
        println!("Asset catalog:         skipped (no manifest configured)");
        println!("\nAll checks passed.");
        return Ok(());
    };
    println!("Asset catalog:         OK ({} asset(s))", catalog.len());

    let mut missing = Vec::new();
    for sensor in &config.sensors {
        for asset in &sensor.assets {
            // Key syntax was already validated.
            if let Ok(key) = AssetKey::from_path(asset) {
                if !catalog.contains(&key) {
                    missing.push(format!(
                        "sensor '{}' targets unknown asset '{asset}'",
                        sensor.name
                    ));
                }
            }
        }
    }

    if missing.is_empty() {
        println!("Sensor targets:        OK");
        println!("\nAll checks passed.");
        Ok(())
    } else {
        for line in &missing {
            println!("Sensor targets:        FAILED ({line})");
        }
        anyhow::bail!("One or more checks failed")
    }
}
