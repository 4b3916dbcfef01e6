//! Graph construction error types.
//!
//! All of these surface at definition-load time, before any scheduling
//! starts: a bad manifest or translator is a configuration defect, not
//! runtime flakiness.

use std::path::PathBuf;

use vigil_types::AssetKey;

/// A record could not be mapped to a graph node attribute.
///
/// Identifies the offending record and field so a misconfigured
/// translator override points at the exact input instead of silently
/// dropping the node.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("record '{record}': cannot derive {field}: {reason}")]
pub struct TranslationError {
    /// Identity of the offending record (unique id, name, or index).
    pub record: String,
    /// The attribute that could not be derived.
    pub field: String,
    /// What went wrong (missing field, wrong type, invalid value).
    pub reason: String,
}

impl TranslationError {
    /// Build a translation error for `field` of `record`.
    #[must_use]
    pub fn new(
        record: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            record: record.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors from manifest loading and graph construction.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A translator operation failed on a record.
    #[error(transparent)]
    Translation(#[from] TranslationError),

    /// Two records translated to the same asset key.
    #[error("duplicate asset key '{key}' produced by records '{first}' and '{second}'")]
    DuplicateNode {
        key: AssetKey,
        first: String,
        second: String,
    },

    /// Manifest file could not be read.
    #[error("failed to read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Manifest file is not valid JSON of the expected shape.
    #[error("failed to parse manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_error_names_record_and_field() {
        let err = TranslationError::new("model.jaffle_shop.orders", "asset_key", "missing 'name'");
        let msg = err.to_string();
        assert!(msg.contains("model.jaffle_shop.orders"));
        assert!(msg.contains("asset_key"));
        assert!(msg.contains("missing 'name'"));
    }

    #[test]
    fn duplicate_node_names_both_records() {
        let err = GraphError::DuplicateNode {
            key: AssetKey::from_path("orders").unwrap(),
            first: "model.a.orders".into(),
            second: "model.b.orders".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("orders"));
        assert!(msg.contains("model.a.orders"));
        assert!(msg.contains("model.b.orders"));
    }
}
