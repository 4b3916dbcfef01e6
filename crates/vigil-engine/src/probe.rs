//! Probe capability: how a sensor observes an external system.

use std::path::PathBuf;
use std::time::UNIX_EPOCH;

use crate::observed::ObservedState;

/// Errors from probing an external system.
///
/// A probe failure is a per-cycle, recoverable condition: the scheduler
/// reports the evaluation as failed, keeps the prior cursor, and retries
/// on the next tick.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// I/O failure reaching the external system.
    #[error("probe i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// The external system answered with something uninterpretable.
    #[error("malformed probe response: {0}")]
    Malformed(String),

    /// The external system could not be reached at all.
    #[error("external system unreachable: {0}")]
    Unreachable(String),
}

/// Opaque capability for observing current external state.
///
/// `observe` may block (it is invoked via `spawn_blocking` under the
/// scheduler's probe timeout) and must not mutate anything: deciding what
/// the observation means is the evaluator's job.
pub trait Probe: Send + Sync {
    /// Query the external system for its current observable state.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] when the system is unreachable or answers
    /// with something uninterpretable.
    fn observe(&self) -> Result<ObservedState, ProbeError>;
}

/// Probe a file's last-modified time as epoch milliseconds.
#[derive(Debug, Clone)]
pub struct FileModifiedProbe {
    path: PathBuf,
}

impl FileModifiedProbe {
    /// Watch the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Probe for FileModifiedProbe {
    fn observe(&self) -> Result<ObservedState, ProbeError> {
        let modified = std::fs::metadata(&self.path)?.modified()?;
        let since_epoch = modified.duration_since(UNIX_EPOCH).map_err(|_| {
            ProbeError::Malformed(format!(
                "{}: modification time predates the unix epoch",
                self.path.display()
            ))
        })?;
        let millis = i64::try_from(since_epoch.as_millis()).map_err(|_| {
            ProbeError::Malformed(format!(
                "{}: modification time overflows epoch milliseconds",
                self.path.display()
            ))
        })?;
        Ok(ObservedState::Millis { value: millis })
    }
}
