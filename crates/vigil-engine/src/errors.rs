//! Engine error taxonomy.

use std::time::Duration;

use vigil_state::StateError;
use vigil_types::{AssetKey, SensorName};

use crate::probe::ProbeError;

/// Failure of one sensor evaluation cycle.
///
/// Every variant leaves the persisted cursor untouched except
/// [`EvalError::Delivery`], which fires after the cursor write: the cycle
/// stays advanced and the undelivered events are dropped rather than
/// replayed against a future observation.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    /// The probe could not observe the external system.
    #[error(transparent)]
    Probe(#[from] ProbeError),

    /// The probe did not answer within the sensor's timeout.
    #[error("probe timed out after {0:?}")]
    ProbeTimeout(Duration),

    /// Cursor store read or write failed.
    #[error("cursor persistence failed: {0}")]
    Persistence(#[from] StateError),

    /// The sink rejected events after the cursor was persisted.
    #[error("event delivery failed after cursor persist: {0}")]
    Delivery(anyhow::Error),

    /// A blocking task panicked or was cancelled.
    #[error("internal failure: {0}")]
    Internal(String),

    /// `run_once` named a sensor that was never registered.
    #[error("unknown sensor '{0}'")]
    UnknownSensor(SensorName),
}

/// Registration and pacing contract violations.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// Two sensors registered under the same name.
    #[error("sensor '{0}' is already registered")]
    DuplicateSensor(SensorName),

    /// A sensor targets an asset absent from the catalog graph.
    #[error("sensor '{sensor}' targets unknown asset '{asset}'")]
    UnknownAsset { sensor: SensorName, asset: AssetKey },

    /// The driving loop attempted an evaluation before the minimum
    /// interval elapsed. This is a loop bug, not a runtime condition.
    #[error(
        "sensor '{sensor}' ticked after {elapsed:?}, violating its \
         {min_interval:?} minimum interval"
    )]
    IntervalViolation {
        sensor: SensorName,
        elapsed: Duration,
        min_interval: Duration,
    },
}
