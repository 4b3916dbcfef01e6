//! Cursor store trait definition.
//!
//! [`CursorStore`] defines the storage contract for sensor cursors and
//! evaluation history. Model types live in [`vigil_types::state`].

use vigil_types::{Cursor, CursorRecord, EvalStats, EvalStatus, SensorName};

use crate::error;

/// Storage contract for sensor replay positions.
///
/// The store is partitioned by sensor name: no cross-sensor locking is
/// needed, only per-key atomicity. The scheduler is the only writer; a
/// sensor never touches the store directly, it only returns the cursor to
/// be written.
///
/// Implementations must be `Send + Sync` for use behind `Arc<dyn CursorStore>`.
pub trait CursorStore: Send + Sync {
    /// Read the last persisted cursor for a sensor.
    ///
    /// Returns `Ok(None)` when no cursor has been persisted yet.
    ///
    /// # Errors
    ///
    /// Returns [`StateError`](crate::error::StateError) on storage failure.
    fn get_cursor(&self, sensor: &SensorName) -> error::Result<Option<CursorRecord>>;

    /// Upsert the cursor for a sensor. Durable and atomic per key.
    ///
    /// # Errors
    ///
    /// Returns [`StateError`](crate::error::StateError) on storage failure.
    fn set_cursor(&self, sensor: &SensorName, cursor: &Cursor) -> error::Result<()>;

    /// Begin an evaluation-history row, returning its unique ID.
    ///
    /// # Errors
    ///
    /// Returns [`StateError`](crate::error::StateError) on storage failure.
    fn start_eval(&self, sensor: &SensorName) -> error::Result<i64>;

    /// Finalize an evaluation-history row with its terminal status.
    ///
    /// # Errors
    ///
    /// Returns [`StateError`](crate::error::StateError) on storage failure.
    fn complete_eval(&self, eval_id: i64, status: EvalStatus, stats: &EvalStats)
        -> error::Result<()>;
}
