//! Tagged metadata values attached to graph nodes and events.
//!
//! Each variant carries an explicit value kind so downstream consumers
//! know how to render it: `{"type": "json", "value": {...}}`.

use serde::{Deserialize, Serialize};

/// A metadata value with a declared kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum MetadataValue {
    /// Plain text.
    Text(String),
    /// Structured JSON blob.
    Json(serde_json::Value),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit float.
    Float(f64),
    /// Boolean flag.
    Bool(bool),
    /// Clickable URL.
    Url(String),
}

impl MetadataValue {
    /// Wire-format kind tag for display and storage.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Json(_) => "json",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Url(_) => "url",
        }
    }
}

impl std::fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) | Self::Url(s) => f.write_str(s),
            Self::Json(v) => write!(f, "{v}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}
