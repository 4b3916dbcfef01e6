//! Pluggable mapping from external records to graph node attributes.
//!
//! [`NodeTranslator`] exposes four independently overridable operations,
//! each with a default implementation. All four must be pure functions of
//! the input record: no I/O, no hidden state, equal records give equal
//! results. The graph builder relies on this for idempotence across
//! definition reloads.

use std::collections::BTreeMap;

use vigil_types::{AssetKey, ManifestRecord, MetadataValue};

use crate::error::TranslationError;

/// Identity of a record for error messages: unique id, then name, then a
/// placeholder.
#[must_use]
pub(crate) fn record_label(record: &ManifestRecord) -> String {
    record
        .unique_id()
        .or_else(|| record.name())
        .unwrap_or("<unnamed record>")
        .to_string()
}

/// Default key derivation: the record's `name`, split on `.`.
///
/// # Errors
///
/// Fails when `name` is absent or yields an invalid key.
pub fn default_asset_key(record: &ManifestRecord) -> Result<AssetKey, TranslationError> {
    let name = record.name().ok_or_else(|| {
        TranslationError::new(record_label(record), "asset_key", "missing 'name' field")
    })?;
    AssetKey::new(name.split('.'))
        .map_err(|e| TranslationError::new(record_label(record), "asset_key", e.to_string()))
}

/// Default description: the record's `description` field, or empty.
#[must_use]
pub fn default_description(record: &ManifestRecord) -> String {
    record.description().unwrap_or_default().to_string()
}

/// Strategy for mapping one external record to the four graph node
/// attributes.
///
/// Implementations must be `Send + Sync` for use as `&dyn NodeTranslator`
/// at definition-load time. Override only the operations you need; the
/// defaults cover the common manifest shape.
pub trait NodeTranslator: Send + Sync {
    /// Internal identifier for the record's node.
    ///
    /// Default: derive from the record's `name`, split on `.`. Overrides
    /// may prefix or rename, e.g. prepend a system-name segment.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError`] when the identifier cannot be derived.
    fn asset_key(&self, record: &ManifestRecord) -> Result<AssetKey, TranslationError> {
        default_asset_key(record)
    }

    /// Grouping label for the node. Default: ungrouped.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError`] when an override cannot derive a group.
    fn group_name(&self, record: &ManifestRecord) -> Result<Option<String>, TranslationError> {
        let _ = record;
        Ok(None)
    }

    /// Display description for the node. Default: the record's
    /// `description` field, or empty.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError`] when an override cannot derive one.
    fn description(&self, record: &ManifestRecord) -> Result<String, TranslationError> {
        Ok(default_description(record))
    }

    /// Structured metadata for the node. Default: empty.
    ///
    /// Overrides may surface arbitrary sub-fields as tagged
    /// [`MetadataValue`]s so downstream consumers render them correctly.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError`] when an override cannot derive one.
    fn metadata(
        &self,
        record: &ManifestRecord,
    ) -> Result<BTreeMap<String, MetadataValue>, TranslationError> {
        let _ = record;
        Ok(BTreeMap::new())
    }
}

/// Base translator with the common overrides as configuration knobs.
///
/// Covers key prefixing, a static group label, raw source text as the
/// description, and the `meta` blob as JSON metadata without requiring a
/// new trait impl. Anything beyond that implements [`NodeTranslator`]
/// directly.
#[derive(Debug, Clone, Default)]
pub struct DefaultTranslator {
    key_prefix: Option<String>,
    group: Option<String>,
    describe_with_source: bool,
    surface_meta: bool,
}

impl DefaultTranslator {
    /// Translator with all defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `prefix` to every derived key.
    #[must_use]
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Assign every node to a static group.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Use the record's indented `raw_code` as the description.
    #[must_use]
    pub fn describe_with_source(mut self) -> Self {
        self.describe_with_source = true;
        self
    }

    /// Surface the record's `meta` blob as JSON metadata under `"meta"`.
    #[must_use]
    pub fn surface_meta(mut self) -> Self {
        self.surface_meta = true;
        self
    }
}

impl NodeTranslator for DefaultTranslator {
    fn asset_key(&self, record: &ManifestRecord) -> Result<AssetKey, TranslationError> {
        let key = default_asset_key(record)?;
        match &self.key_prefix {
            Some(prefix) => key
                .with_prefix(prefix.clone())
                .map_err(|e| TranslationError::new(record_label(record), "asset_key", e.to_string())),
            None => Ok(key),
        }
    }

    fn group_name(&self, _record: &ManifestRecord) -> Result<Option<String>, TranslationError> {
        Ok(self.group.clone())
    }

    fn description(&self, record: &ManifestRecord) -> Result<String, TranslationError> {
        if !self.describe_with_source {
            return Ok(default_description(record));
        }
        let source = record.raw_code().ok_or_else(|| {
            TranslationError::new(record_label(record), "description", "missing 'raw_code' field")
        })?;
        let indented: Vec<String> = source.lines().map(|line| format!("\t{line}")).collect();
        Ok(indented.join("\n"))
    }

    fn metadata(
        &self,
        record: &ManifestRecord,
    ) -> Result<BTreeMap<String, MetadataValue>, TranslationError> {
        let mut metadata = BTreeMap::new();
        if self.surface_meta {
            if let Some(meta) = record.meta() {
                metadata.insert("meta".to_string(), MetadataValue::Json(meta.clone()));
            }
        }
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: serde_json::Value) -> ManifestRecord {
        let serde_json::Value::Object(fields) = json else {
            panic!("test record must be an object");
        };
        ManifestRecord::new(fields)
    }

    fn orders() -> ManifestRecord {
        record(serde_json::json!({
            "unique_id": "model.jaffle_shop.orders",
            "name": "orders",
            "description": "All orders",
            "raw_code": "select *\nfrom raw_orders",
            "meta": {"owner": "data-eng"},
        }))
    }

    #[test]
    fn defaults_derive_key_and_description() {
        let t = DefaultTranslator::new();
        assert_eq!(t.asset_key(&orders()).unwrap().to_string(), "orders");
        assert_eq!(t.description(&orders()).unwrap(), "All orders");
        assert_eq!(t.group_name(&orders()).unwrap(), None);
        assert!(t.metadata(&orders()).unwrap().is_empty());
    }

    #[test]
    fn default_key_splits_on_dots() {
        let r = record(serde_json::json!({"name": "analytics.orders"}));
        let key = DefaultTranslator::new().asset_key(&r).unwrap();
        assert_eq!(key.segments(), ["analytics", "orders"]);
    }

    #[test]
    fn missing_name_identifies_record_and_field() {
        let r = record(serde_json::json!({"unique_id": "model.x.y"}));
        let err = DefaultTranslator::new().asset_key(&r).unwrap_err();
        assert_eq!(err.record, "model.x.y");
        assert_eq!(err.field, "asset_key");
    }

    #[test]
    fn key_prefix_prepends_namespace() {
        let t = DefaultTranslator::new().with_key_prefix("warehouse");
        let key = t.asset_key(&orders()).unwrap();
        assert_eq!(key.to_string(), "warehouse/orders");
    }

    #[test]
    fn static_group_applies_to_all_records() {
        let t = DefaultTranslator::new().with_group("jaffle");
        assert_eq!(t.group_name(&orders()).unwrap(), Some("jaffle".into()));
    }

    #[test]
    fn source_description_indents_each_line() {
        let t = DefaultTranslator::new().describe_with_source();
        assert_eq!(
            t.description(&orders()).unwrap(),
            "\tselect *\n\tfrom raw_orders"
        );
    }

    #[test]
    fn source_description_requires_raw_code() {
        let r = record(serde_json::json!({"name": "orders"}));
        let err = DefaultTranslator::new()
            .describe_with_source()
            .description(&r)
            .unwrap_err();
        assert_eq!(err.field, "description");
    }

    #[test]
    fn surfaced_meta_is_tagged_json() {
        let t = DefaultTranslator::new().surface_meta();
        let metadata = t.metadata(&orders()).unwrap();
        assert_eq!(
            metadata["meta"],
            MetadataValue::Json(serde_json::json!({"owner": "data-eng"}))
        );
    }

    #[test]
    fn operations_are_pure() {
        // Equal record, repeated calls, equal outputs.
        let t = DefaultTranslator::new()
            .with_key_prefix("warehouse")
            .with_group("jaffle")
            .surface_meta();
        let r = orders();
        assert_eq!(t.asset_key(&r).unwrap(), t.asset_key(&r).unwrap());
        assert_eq!(t.group_name(&r).unwrap(), t.group_name(&r).unwrap());
        assert_eq!(t.description(&r).unwrap(), t.description(&r).unwrap());
        assert_eq!(t.metadata(&r).unwrap(), t.metadata(&r).unwrap());
    }

    #[test]
    fn custom_impl_overrides_one_slot() {
        struct FieldGroup;
        impl NodeTranslator for FieldGroup {
            fn group_name(
                &self,
                record: &ManifestRecord,
            ) -> Result<Option<String>, TranslationError> {
                Ok(record.group().map(str::to_string))
            }
        }

        let r = record(serde_json::json!({
            "name": "orders",
            "config": {"group": "marts"},
        }));
        let t = FieldGroup;
        // Overridden slot reads the record; the rest keep defaults.
        assert_eq!(t.group_name(&r).unwrap(), Some("marts".into()));
        assert_eq!(t.asset_key(&r).unwrap().to_string(), "orders");
    }
}
