//! Materialization events: the signal that a node's external state changed.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::asset::AssetKey;
use crate::metadata::MetadataValue;

/// Record that an asset's external state has been observed as changed.
///
/// Events are immutable and are delivered in the order the sensor
/// produced them within one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Materialization {
    /// The asset whose external state changed.
    pub asset_key: AssetKey,
    /// Observation details (e.g. the observed modification time).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, MetadataValue>,
    /// When the change was observed.
    pub observed_at: DateTime<Utc>,
}

impl Materialization {
    /// Event without metadata.
    #[must_use]
    pub fn new(asset_key: AssetKey, observed_at: DateTime<Utc>) -> Self {
        Self {
            asset_key,
            metadata: BTreeMap::new(),
            observed_at,
        }
    }

    /// Attach a metadata entry, replacing any previous value for `key`.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: MetadataValue) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}
