//! Asset key: the path-like identifier for a logical data node.

use serde::{Deserialize, Serialize};

/// Errors from asset key construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetKeyError {
    /// A key must contain at least one segment.
    #[error("asset key must have at least one segment")]
    Empty,

    /// Segments must be non-empty strings.
    #[error("asset key segment {index} is empty")]
    EmptySegment { index: usize },
}

/// Ordered sequence of path segments uniquely naming a logical data node.
///
/// Keys are immutable once created and compare segment-wise. The display
/// form joins segments with `/`, e.g. `warehouse/jaffle_shop/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct AssetKey(Vec<String>);

impl AssetKey {
    /// Build a key from segments.
    ///
    /// # Errors
    ///
    /// Returns [`AssetKeyError`] if the sequence is empty or any segment
    /// is an empty string.
    pub fn new<I, S>(segments: I) -> Result<Self, AssetKeyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        Self::validate(&segments)?;
        Ok(Self(segments))
    }

    /// Parse a `/`-separated path into a key.
    ///
    /// # Errors
    ///
    /// Returns [`AssetKeyError`] for an empty path or empty segments
    /// (`"a//b"`).
    pub fn from_path(path: &str) -> Result<Self, AssetKeyError> {
        if path.is_empty() {
            return Err(AssetKeyError::Empty);
        }
        Self::new(path.split('/'))
    }

    /// Return a new key with `segment` prepended as a namespace.
    ///
    /// # Errors
    ///
    /// Returns [`AssetKeyError::EmptySegment`] if `segment` is empty.
    pub fn with_prefix(&self, segment: impl Into<String>) -> Result<Self, AssetKeyError> {
        let segment = segment.into();
        if segment.is_empty() {
            return Err(AssetKeyError::EmptySegment { index: 0 });
        }
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.push(segment);
        segments.extend(self.0.iter().cloned());
        Ok(Self(segments))
    }

    /// Borrow the key's segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The final segment (e.g. the bare table name).
    #[must_use]
    pub fn leaf(&self) -> &str {
        // Invariant: keys always hold at least one segment.
        self.0.last().map(String::as_str).unwrap_or_default()
    }

    fn validate(segments: &[String]) -> Result<(), AssetKeyError> {
        if segments.is_empty() {
            return Err(AssetKeyError::Empty);
        }
        for (index, segment) in segments.iter().enumerate() {
            if segment.is_empty() {
                return Err(AssetKeyError::EmptySegment { index });
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for AssetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

impl TryFrom<Vec<String>> for AssetKey {
    type Error = AssetKeyError;

    fn try_from(segments: Vec<String>) -> Result<Self, Self::Error> {
        Self::validate(&segments)?;
        Ok(Self(segments))
    }
}

impl From<AssetKey> for Vec<String> {
    fn from(key: AssetKey) -> Self {
        key.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_equality() {
        let a = AssetKey::new(["jaffle_shop", "orders"]).unwrap();
        let b = AssetKey::from_path("jaffle_shop/orders").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn display_joins_segments() {
        let key = AssetKey::new(["a", "b", "c"]).unwrap();
        assert_eq!(key.to_string(), "a/b/c");
    }

    #[test]
    fn empty_key_rejected() {
        let err = AssetKey::new(Vec::<String>::new()).unwrap_err();
        assert_eq!(err, AssetKeyError::Empty);
        assert_eq!(AssetKey::from_path("").unwrap_err(), AssetKeyError::Empty);
    }

    #[test]
    fn empty_segment_rejected() {
        let err = AssetKey::from_path("a//b").unwrap_err();
        assert_eq!(err, AssetKeyError::EmptySegment { index: 1 });
    }

    #[test]
    fn with_prefix_prepends() {
        let key = AssetKey::from_path("jaffle_shop/orders").unwrap();
        let prefixed = key.with_prefix("warehouse").unwrap();
        assert_eq!(prefixed.to_string(), "warehouse/jaffle_shop/orders");
        // The original is untouched.
        assert_eq!(key.to_string(), "jaffle_shop/orders");
    }

    #[test]
    fn with_prefix_rejects_empty() {
        let key = AssetKey::from_path("orders").unwrap();
        assert!(key.with_prefix("").is_err());
    }

    #[test]
    fn leaf_is_last_segment() {
        let key = AssetKey::from_path("warehouse/orders").unwrap();
        assert_eq!(key.leaf(), "orders");
    }

    #[test]
    fn serde_as_segment_list() {
        let key = AssetKey::from_path("a/b").unwrap();
        let json = serde_json::to_value(&key).unwrap();
        assert_eq!(json, serde_json::json!(["a", "b"]));
        let back: AssetKey = serde_json::from_value(json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn serde_rejects_invalid_segments() {
        let result: Result<AssetKey, _> = serde_json::from_value(serde_json::json!([]));
        assert!(result.is_err());
        let result: Result<AssetKey, _> = serde_json::from_value(serde_json::json!(["a", ""]));
        assert!(result.is_err());
    }
}
