//! Manifest file loading.
//!
//! Reads a dbt-style `manifest.json`: a top-level `nodes` object keyed by
//! unique id, each value an opaque record mapping. The file is read once
//! at definition-load time.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use vigil_types::{Manifest, ManifestRecord};

use crate::error::GraphError;

#[derive(Deserialize)]
struct ManifestFile {
    // BTreeMap keeps record order deterministic across loads.
    #[serde(default)]
    nodes: BTreeMap<String, serde_json::Map<String, serde_json::Value>>,
}

/// Load and parse a manifest file.
///
/// Each record is guaranteed a `unique_id` field after loading: records
/// that omit it inherit their key in the `nodes` object.
///
/// # Errors
///
/// Returns [`GraphError::Io`] if the file cannot be read and
/// [`GraphError::Parse`] if it is not JSON of the expected shape.
pub fn load_manifest(path: &Path) -> Result<Manifest, GraphError> {
    let content = std::fs::read_to_string(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: ManifestFile =
        serde_json::from_str(&content).map_err(|source| GraphError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let records = file
        .nodes
        .into_iter()
        .map(|(unique_id, mut fields)| {
            fields
                .entry("unique_id".to_string())
                .or_insert_with(|| serde_json::Value::String(unique_id));
            ManifestRecord::new(fields)
        })
        .collect();

    Ok(Manifest::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_manifest(json: &serde_json::Value) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{json}").unwrap();
        file
    }

    #[test]
    fn loads_nodes_with_unique_ids() {
        let file = write_manifest(&serde_json::json!({
            "nodes": {
                "model.jaffle_shop.orders": {"name": "orders"},
                "model.jaffle_shop.customers": {
                    "unique_id": "model.jaffle_shop.customers",
                    "name": "customers",
                },
            }
        }));

        let manifest = load_manifest(file.path()).unwrap();
        assert_eq!(manifest.len(), 2);
        // The object key is injected when the record omits unique_id.
        assert!(manifest
            .records
            .iter()
            .any(|r| r.unique_id() == Some("model.jaffle_shop.orders")));
    }

    #[test]
    fn empty_nodes_section_is_an_empty_manifest() {
        let file = write_manifest(&serde_json::json!({}));
        let manifest = load_manifest(file.path()).unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_manifest(Path::new("/nonexistent/manifest.json")).unwrap_err();
        assert!(matches!(err, GraphError::Io { .. }));
    }

    #[test]
    fn invalid_json_is_parse_error_naming_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = load_manifest(file.path()).unwrap_err();
        assert!(matches!(err, GraphError::Parse { .. }));
        assert!(err.to_string().contains("manifest"));
    }
}
