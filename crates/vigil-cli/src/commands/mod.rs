pub mod check;
pub mod graph;
pub mod run;

use std::path::Path;

use anyhow::{Context, Result};
use vigil_engine::config::{self, VigilConfig};
use vigil_graph::{build_graph, load_manifest, DefaultTranslator};
use vigil_types::AssetGraph;

/// Parse and validate the definitions file.
pub fn load_config(path: &Path) -> Result<VigilConfig> {
    let loaded = config::parse_config(path)
        .with_context(|| format!("Failed to parse definitions: {}", path.display()))?;
    config::validate_config(&loaded)?;
    Ok(loaded)
}

/// Build the asset catalog from the configured manifest, if any.
pub fn load_catalog(config: &VigilConfig) -> Result<Option<AssetGraph>> {
    let Some(manifest_path) = &config.manifest else {
        return Ok(None);
    };
    let manifest = load_manifest(manifest_path)?;

    let mut translator = DefaultTranslator::new();
    if let Some(prefix) = &config.key_prefix {
        translator = translator.with_key_prefix(prefix);
    }
    if let Some(group) = &config.group {
        translator = translator.with_group(group);
    }

    let graph = build_graph(&manifest, &translator)?;
    Ok(Some(graph))
}
