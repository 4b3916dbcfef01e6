//! Change-detection sensors and the scheduler that drives them.
//!
//! A [`SensorSpec`] binds a [`Probe`] of an external system to the assets
//! it materializes. The [`Scheduler`] evaluates each sensor no more often
//! than its minimum interval, never concurrently with itself, and
//! persists the returned cursor before delivering events to the
//! [`EventSink`].

#![warn(clippy::pedantic)]

pub mod config;
pub mod errors;
pub mod evaluate;
pub mod observed;
pub mod probe;
pub mod scheduler;
pub mod sensor;
pub mod sink;

pub use errors::{EvalError, SchedulerError};
pub use evaluate::{evaluate, Evaluation};
pub use observed::ObservedState;
pub use probe::{FileModifiedProbe, Probe, ProbeError};
pub use scheduler::{CycleReport, Scheduler, SkipReason, TickOutcome};
pub use sensor::SensorSpec;
pub use sink::{EventSink, LogSink, MemorySink};
