//! Cursor store model types.
//!
//! Pure data types shared by `CursorStore` implementations and the
//! scheduler. Kept here so the state and engine crates can share them
//! without circular dependencies.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Opaque sensor identifier; partitions the cursor store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorName(String);

impl SensorName {
    /// Create a new sensor name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SensorName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S: Into<String>> From<S> for SensorName {
    fn from(value: S) -> Self {
        Self(value.into())
    }
}

/// Opaque replay-position token owned by one sensor.
///
/// Only the sensor that produced a cursor knows how to decode and compare
/// it; the store and scheduler treat it as an uninterpreted string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Wrap an encoded cursor value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the encoded value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S: Into<String>> From<S> for Cursor {
    fn from(value: S) -> Self {
        Self(value.into())
    }
}

// ---------------------------------------------------------------------------
// Persisted cursor snapshot
// ---------------------------------------------------------------------------

/// Snapshot of a persisted cursor for one sensor.
///
/// `updated_at` is an ISO-8601 UTC string (e.g. `"2026-01-15T10:00:00Z"`).
/// Backends handle timestamp formatting internally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorRecord {
    /// Last cursor value the scheduler persisted for this sensor.
    pub cursor: Cursor,
    /// ISO-8601 UTC timestamp of when the cursor was last written.
    pub updated_at: String,
}

// ---------------------------------------------------------------------------
// Evaluation history
// ---------------------------------------------------------------------------

/// Terminal status of one sensor evaluation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvalStatus {
    Running,
    /// Change detected; events emitted and cursor advanced.
    Emitted,
    /// No change since the last cursor.
    Quiescent,
    Failed,
}

impl EvalStatus {
    /// Wire-format string for storage.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Emitted => "emitted",
            Self::Quiescent => "quiescent",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for EvalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate result of a completed evaluation cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalStats {
    /// Number of materialization events emitted this cycle.
    pub events_emitted: u64,
    /// Cursor value persisted this cycle, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<Cursor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}
