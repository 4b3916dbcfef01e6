//! Observed external state and its cursor encoding.
//!
//! A probe reports the external system's current observable state as an
//! [`ObservedState`]. Each variant defines its own total order against a
//! previously persisted cursor and its own canonical string encoding;
//! the store and scheduler never interpret either.

use serde::{Deserialize, Serialize};
use vigil_types::{Cursor, MetadataValue};

/// A comparable observation of an external system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObservedState {
    /// Monotonic counter or offset (e.g. a row count, a log position).
    Int { value: i64 },
    /// Epoch-millisecond timestamp (e.g. a file's modification time).
    Millis { value: i64 },
    /// Lexicographically ordered token (e.g. an upstream version string).
    Text { value: String },
}

impl ObservedState {
    /// Canonical string encoding, used as the new cursor on emission.
    #[must_use]
    pub fn encode(&self) -> Cursor {
        match self {
            Self::Int { value } | Self::Millis { value } => Cursor::new(value.to_string()),
            Self::Text { value } => Cursor::new(value.clone()),
        }
    }

    /// Whether this observation is strictly newer than the prior cursor.
    ///
    /// Equality means "no change": a single external update must not be
    /// reported twice due to tick-boundary races. A prior cursor that
    /// cannot be decoded under this observation's kind (the probe
    /// implementation changed) is treated as absent, with a warning; the
    /// next emission rewrites it canonically.
    #[must_use]
    pub fn exceeds(&self, prior: &Cursor) -> bool {
        match self {
            Self::Int { value } | Self::Millis { value } => {
                match prior.as_str().parse::<i64>() {
                    Ok(previous) => *value > previous,
                    Err(_) => {
                        tracing::warn!(
                            cursor = prior.as_str(),
                            "Persisted cursor is not numeric; treating as absent"
                        );
                        true
                    }
                }
            }
            Self::Text { value } => value.as_str() > prior.as_str(),
        }
    }

    /// The observation as a tagged metadata value for emitted events.
    #[must_use]
    pub fn as_metadata(&self) -> MetadataValue {
        match self {
            Self::Int { value } | Self::Millis { value } => MetadataValue::Int(*value),
            Self::Text { value } => MetadataValue::Text(value.clone()),
        }
    }
}

impl std::fmt::Display for ObservedState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int { value } | Self::Millis { value } => write!(f, "{value}"),
            Self::Text { value } => f.write_str(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_is_canonical_string() {
        assert_eq!(ObservedState::Int { value: 100 }.encode(), Cursor::new("100"));
        assert_eq!(
            ObservedState::Millis { value: 1_700_000_000_000 }.encode(),
            Cursor::new("1700000000000")
        );
        assert_eq!(
            ObservedState::Text { value: "v2".into() }.encode(),
            Cursor::new("v2")
        );
    }

    #[test]
    fn strictly_greater_exceeds() {
        let observed = ObservedState::Int { value: 150 };
        assert!(observed.exceeds(&Cursor::new("100")));
    }

    #[test]
    fn equality_is_no_change() {
        let observed = ObservedState::Int { value: 100 };
        assert!(!observed.exceeds(&Cursor::new("100")));
    }

    #[test]
    fn older_observation_does_not_exceed() {
        let observed = ObservedState::Millis { value: 50 };
        assert!(!observed.exceeds(&Cursor::new("100")));
    }

    #[test]
    fn undecodable_cursor_treated_as_absent() {
        let observed = ObservedState::Int { value: 1 };
        assert!(observed.exceeds(&Cursor::new("not-a-number")));
    }

    #[test]
    fn text_order_is_lexicographic() {
        let observed = ObservedState::Text { value: "b".into() };
        assert!(observed.exceeds(&Cursor::new("a")));
        assert!(!observed.exceeds(&Cursor::new("b")));
        assert!(!observed.exceeds(&Cursor::new("c")));
    }

    #[test]
    fn roundtrip_through_cursor_is_stable() {
        let observed = ObservedState::Millis { value: 42 };
        let cursor = observed.encode();
        // Re-observing the encoded state is never "newer".
        assert!(!observed.exceeds(&cursor));
    }

    #[test]
    fn json_format_carries_kind_tag() {
        let json = serde_json::to_value(ObservedState::Int { value: 7 }).unwrap();
        assert_eq!(json, serde_json::json!({"type": "int", "value": 7}));
    }
}
