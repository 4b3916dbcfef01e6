//! Sensor definition: a probe bound to assets with pacing limits.

use std::sync::Arc;
use std::time::Duration;

use vigil_types::{AssetKey, SensorName};

use crate::probe::Probe;

/// Default probe timeout when the definition does not set one.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Definition of one change-detection sensor.
#[derive(Clone)]
pub struct SensorSpec {
    /// Unique name; also the cursor store partition key.
    pub name: SensorName,
    /// Assets materialized when the probe detects a change.
    pub assets: Vec<AssetKey>,
    /// How the external system is observed.
    pub probe: Arc<dyn Probe>,
    /// Minimum time between the starts of two evaluations.
    pub min_interval: Duration,
    /// How long a probe may run before the cycle is abandoned.
    pub probe_timeout: Duration,
}

impl SensorSpec {
    /// Define a sensor with the default probe timeout.
    #[must_use]
    pub fn new(
        name: impl Into<SensorName>,
        assets: Vec<AssetKey>,
        probe: Arc<dyn Probe>,
        min_interval: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            assets,
            probe,
            min_interval,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Override the probe timeout.
    #[must_use]
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }
}

impl std::fmt::Debug for SensorSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SensorSpec")
            .field("name", &self.name)
            .field("assets", &self.assets)
            .field("min_interval", &self.min_interval)
            .field("probe_timeout", &self.probe_timeout)
            .finish_non_exhaustive()
    }
}
