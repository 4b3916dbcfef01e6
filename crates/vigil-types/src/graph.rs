//! Asset graph: the internal catalog built from an external manifest.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::asset::AssetKey;
use crate::metadata::MetadataValue;

/// Catalog entry for one asset, built once per definition load.
///
/// Immutable after construction; used for catalog lookups and display,
/// never mutated by the sensor or scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Internal identifier for this asset.
    pub key: AssetKey,
    /// Grouping label, if the translator assigned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Display description (may be empty).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Translator-surfaced metadata.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, MetadataValue>,
}

/// The full set of graph nodes plus their declared dependency edges.
///
/// Edges are `(upstream, downstream)` pairs resolved from the manifest's
/// dependency declarations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetGraph {
    nodes: BTreeMap<AssetKey, GraphNode>,
    edges: Vec<(AssetKey, AssetKey)>,
}

impl AssetGraph {
    /// Assemble a graph from nodes and edges.
    #[must_use]
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<(AssetKey, AssetKey)>) -> Self {
        Self {
            nodes: nodes.into_iter().map(|n| (n.key.clone(), n)).collect(),
            edges,
        }
    }

    /// Catalog lookup by key.
    #[must_use]
    pub fn node(&self, key: &AssetKey) -> Option<&GraphNode> {
        self.nodes.get(key)
    }

    /// Whether `key` names a known asset.
    #[must_use]
    pub fn contains(&self, key: &AssetKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// All nodes, in key order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    /// Declared `(upstream, downstream)` edges.
    #[must_use]
    pub fn edges(&self) -> &[(AssetKey, AssetKey)] {
        &self.edges
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
