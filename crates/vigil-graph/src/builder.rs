//! Graph builder: translate a full manifest into the asset graph.

use std::collections::BTreeMap;

use vigil_types::{AssetGraph, AssetKey, GraphNode, Manifest};

use crate::error::GraphError;
use crate::translator::{record_label, NodeTranslator};

/// Build the asset graph from a manifest through a translator.
///
/// Runs once per definition load and is safe to re-run on the same
/// manifest: the translator operations are pure, so the output is
/// deterministic. Dependency edges are resolved from each record's
/// declared `depends_on` ids; ids that do not name a manifest record
/// (external or ephemeral references) are skipped with a warning.
///
/// # Errors
///
/// Fails fast with [`GraphError::Translation`] on the first record a
/// translator operation rejects, and with [`GraphError::DuplicateNode`]
/// when two records translate to the same key; no partial graph is ever
/// returned.
pub fn build_graph(
    manifest: &Manifest,
    translator: &dyn NodeTranslator,
) -> Result<AssetGraph, GraphError> {
    let mut nodes: Vec<GraphNode> = Vec::with_capacity(manifest.len());
    // Key uniqueness across the whole manifest, with the producing record
    // retained for collision messages.
    let mut seen: BTreeMap<AssetKey, String> = BTreeMap::new();
    // unique_id -> translated key, for edge resolution.
    let mut ids: BTreeMap<String, AssetKey> = BTreeMap::new();

    for record in &manifest.records {
        let key = translator.asset_key(record)?;
        let label = record_label(record);

        if let Some(first) = seen.get(&key) {
            return Err(GraphError::DuplicateNode {
                key,
                first: first.clone(),
                second: label,
            });
        }
        seen.insert(key.clone(), label);

        if let Some(unique_id) = record.unique_id() {
            ids.insert(unique_id.to_string(), key.clone());
        }

        nodes.push(GraphNode {
            key,
            group: translator.group_name(record)?,
            description: translator.description(record)?,
            metadata: translator.metadata(record)?,
        });
    }

    let mut edges: Vec<(AssetKey, AssetKey)> = Vec::new();
    for record in &manifest.records {
        let Some(unique_id) = record.unique_id() else {
            continue;
        };
        let Some(downstream) = ids.get(unique_id) else {
            continue;
        };
        for dep in record.depends_on() {
            match ids.get(dep) {
                Some(upstream) => edges.push((upstream.clone(), downstream.clone())),
                None => {
                    tracing::warn!(
                        record = unique_id,
                        dependency = dep,
                        "Skipping dependency edge: id not present in manifest"
                    );
                }
            }
        }
    }

    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        "Asset graph built from manifest"
    );

    Ok(AssetGraph::new(nodes, edges))
}
