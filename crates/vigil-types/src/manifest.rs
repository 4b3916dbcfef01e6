//! External manifest records.
//!
//! A manifest is the externally-produced description of nodes and their
//! dependencies (e.g. a dbt `manifest.json`). Records are opaque
//! key/value mappings; typed accessors cover the conventional fields the
//! default translator reads, but overrides may reach into anything.

use serde::{Deserialize, Serialize};

/// One external node description: an opaque string-keyed mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManifestRecord {
    fields: serde_json::Map<String, serde_json::Value>,
}

impl ManifestRecord {
    /// Wrap a raw field mapping.
    #[must_use]
    pub fn new(fields: serde_json::Map<String, serde_json::Value>) -> Self {
        Self { fields }
    }

    /// Raw field lookup.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields.get(key)
    }

    /// Field as a string, if present and a string.
    #[must_use]
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(serde_json::Value::as_str)
    }

    /// The manifest-wide unique identifier (e.g. `"model.jaffle_shop.orders"`).
    #[must_use]
    pub fn unique_id(&self) -> Option<&str> {
        self.str_field("unique_id")
    }

    /// Raw identifying name; the default translator derives keys from this.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    /// Free-text description, if declared.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.str_field("description")
    }

    /// Raw source text (e.g. the SQL body), if present.
    #[must_use]
    pub fn raw_code(&self) -> Option<&str> {
        self.str_field("raw_code")
    }

    /// Arbitrary metadata blob, if declared.
    #[must_use]
    pub fn meta(&self) -> Option<&serde_json::Value> {
        self.fields.get("meta")
    }

    /// Grouping hint, if declared (top-level `group` or `config.group`).
    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.str_field("group").or_else(|| {
            self.fields
                .get("config")
                .and_then(|config| config.get("group"))
                .and_then(serde_json::Value::as_str)
        })
    }

    /// Unique ids of the records this node depends on (`depends_on.nodes`).
    #[must_use]
    pub fn depends_on(&self) -> Vec<&str> {
        self.fields
            .get("depends_on")
            .and_then(|deps| deps.get("nodes"))
            .and_then(serde_json::Value::as_array)
            .map(|nodes| {
                nodes
                    .iter()
                    .filter_map(serde_json::Value::as_str)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Ordered sequence of external records, read once at build time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub records: Vec<ManifestRecord>,
}

impl Manifest {
    /// Wrap a record sequence.
    #[must_use]
    pub fn new(records: Vec<ManifestRecord>) -> Self {
        Self { records }
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the manifest has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
