//! Drives registered sensors: pacing, single-flight, and the
//! persist-then-deliver cycle.
//!
//! The scheduler owns all I/O around the pure decision rule in
//! [`crate::evaluate`]. Blocking store, probe, and sink calls run on the
//! blocking pool so sensor cycles never stall the async runtime.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::task::JoinSet;
use vigil_state::CursorStore;
use vigil_types::{AssetGraph, Cursor, EvalStats, EvalStatus, SensorName};

use crate::errors::{EvalError, SchedulerError};
use crate::evaluate::evaluate;
use crate::sensor::SensorSpec;
use crate::sink::EventSink;

/// Result of one completed evaluation cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub status: EvalStatus,
    pub events_delivered: u64,
    /// Cursor persisted this cycle, if it advanced.
    pub cursor: Option<Cursor>,
}

/// Why a tick did not evaluate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// A previous evaluation of this sensor is still in flight.
    AlreadyRunning,
    /// The minimum interval since the last evaluation has not elapsed.
    TooSoon { remaining: Duration },
}

/// Outcome of a single scheduler tick for one sensor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Completed(CycleReport),
    Skipped(SkipReason),
}

struct PacingState {
    last_started: Option<Instant>,
}

struct RegisteredSensor {
    spec: SensorSpec,
    /// Held for the whole cycle; `try_lock` failing is the single-flight
    /// signal.
    pacing: tokio::sync::Mutex<PacingState>,
}

/// Evaluates registered sensors against their pacing contracts.
pub struct Scheduler {
    store: Arc<dyn CursorStore>,
    sink: Arc<dyn EventSink>,
    catalog: Option<AssetGraph>,
    sensors: HashMap<SensorName, RegisteredSensor>,
}

impl Scheduler {
    #[must_use]
    pub fn new(store: Arc<dyn CursorStore>, sink: Arc<dyn EventSink>) -> Self {
        Self {
            store,
            sink,
            catalog: None,
            sensors: HashMap::new(),
        }
    }

    /// Validate registered sensor targets against this asset graph.
    #[must_use]
    pub fn with_catalog(mut self, catalog: AssetGraph) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Register a sensor for scheduling.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::DuplicateSensor`] when the name is taken
    /// and [`SchedulerError::UnknownAsset`] when a target asset is absent
    /// from the catalog graph.
    pub fn register(&mut self, spec: SensorSpec) -> Result<(), SchedulerError> {
        if self.sensors.contains_key(&spec.name) {
            return Err(SchedulerError::DuplicateSensor(spec.name));
        }
        if let Some(catalog) = &self.catalog {
            for asset in &spec.assets {
                if !catalog.contains(asset) {
                    return Err(SchedulerError::UnknownAsset {
                        sensor: spec.name,
                        asset: asset.clone(),
                    });
                }
            }
        }
        tracing::debug!(
            sensor = %spec.name,
            assets = spec.assets.len(),
            min_interval_secs = spec.min_interval.as_secs(),
            "Registered sensor"
        );
        self.sensors.insert(
            spec.name.clone(),
            RegisteredSensor {
                spec,
                pacing: tokio::sync::Mutex::new(PacingState { last_started: None }),
            },
        );
        Ok(())
    }

    /// Names of all registered sensors, sorted.
    #[must_use]
    pub fn sensor_names(&self) -> Vec<SensorName> {
        let mut names: Vec<SensorName> = self.sensors.keys().cloned().collect();
        names.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        names
    }

    /// Attempt one evaluation of the named sensor.
    ///
    /// Skips without side effects when an evaluation is in flight or the
    /// minimum interval has not elapsed; otherwise runs the full cycle.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError`] when the sensor is unknown or the cycle
    /// fails. Except for [`EvalError::Delivery`], failures leave the
    /// persisted cursor unchanged.
    pub async fn run_once(&self, name: &SensorName) -> Result<TickOutcome, EvalError> {
        self.run_once_at(name, Instant::now()).await
    }

    /// Pacing is judged against `now`, which also becomes the recorded
    /// start on success. The driving loop passes the instant it sleeps
    /// from, so the deadline check and the sleep share one time basis.
    async fn run_once_at(
        &self,
        name: &SensorName,
        now: Instant,
    ) -> Result<TickOutcome, EvalError> {
        let sensor = self
            .sensors
            .get(name)
            .ok_or_else(|| EvalError::UnknownSensor(name.clone()))?;

        let Ok(mut pacing) = sensor.pacing.try_lock() else {
            tracing::debug!(sensor = %name, "Skipping tick: evaluation in flight");
            return Ok(TickOutcome::Skipped(SkipReason::AlreadyRunning));
        };

        if let Some(last) = pacing.last_started {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < sensor.spec.min_interval {
                return Ok(TickOutcome::Skipped(SkipReason::TooSoon {
                    remaining: sensor.spec.min_interval - elapsed,
                }));
            }
        }
        pacing.last_started = Some(now);

        let report = self.cycle(&sensor.spec).await?;
        Ok(TickOutcome::Completed(report))
    }

    /// Drive all registered sensors until one fails fatally.
    ///
    /// Each sensor runs in its own sequential loop, sleeping out the
    /// remainder of its minimum interval between cycles. Probe, timeout,
    /// persistence, and delivery failures are logged and retried next
    /// tick with the prior cursor; internal failures and pacing
    /// violations abort every loop.
    ///
    /// # Errors
    ///
    /// Returns the first fatal sensor-loop error.
    pub async fn run_forever(self: Arc<Self>) -> anyhow::Result<()> {
        let mut loops = JoinSet::new();
        for name in self.sensor_names() {
            let scheduler = Arc::clone(&self);
            loops.spawn(async move { scheduler.drive(name).await });
        }

        while let Some(joined) = loops.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    loops.abort_all();
                    return Err(err);
                }
                Err(err) => {
                    loops.abort_all();
                    anyhow::bail!("sensor loop panicked: {err}");
                }
            }
        }
        Ok(())
    }

    async fn drive(&self, name: SensorName) -> anyhow::Result<()> {
        // Registration precedes spawn, so the lookup cannot miss.
        let min_interval = self
            .sensors
            .get(&name)
            .map(|sensor| sensor.spec.min_interval)
            .ok_or_else(|| anyhow::anyhow!("sensor '{name}' vanished from the registry"))?;

        loop {
            let started = Instant::now();
            match self.run_once_at(&name, started).await {
                Ok(TickOutcome::Completed(report)) => {
                    tracing::info!(
                        sensor = %name,
                        status = %report.status,
                        events = report.events_delivered,
                        cursor = report.cursor.as_ref().map(Cursor::as_str),
                        "Sensor tick"
                    );
                }
                Ok(TickOutcome::Skipped(SkipReason::TooSoon { remaining })) => {
                    // The loop owns this sensor's pacing; hitting TooSoon
                    // here means the sleep accounting is broken.
                    return Err(SchedulerError::IntervalViolation {
                        sensor: name,
                        elapsed: min_interval.saturating_sub(remaining),
                        min_interval,
                    }
                    .into());
                }
                Ok(TickOutcome::Skipped(SkipReason::AlreadyRunning)) => {
                    anyhow::bail!("sensor '{name}' ticked while already evaluating");
                }
                Err(err @ EvalError::Internal(_)) => {
                    return Err(err.into());
                }
                Err(err) => {
                    tracing::warn!(sensor = %name, error = %err, "Sensor cycle failed; will retry");
                }
            }
            tokio::time::sleep(min_interval.saturating_sub(started.elapsed())).await;
        }
    }

    /// Run one cycle, bracketing it with best-effort evaluation history.
    async fn cycle(&self, spec: &SensorSpec) -> Result<CycleReport, EvalError> {
        let eval_id = {
            let store = Arc::clone(&self.store);
            let sensor = spec.name.clone();
            match tokio::task::spawn_blocking(move || store.start_eval(&sensor)).await {
                Ok(Ok(id)) => Some(id),
                Ok(Err(err)) => {
                    tracing::warn!(sensor = %spec.name, error = %err, "Could not open evaluation history row");
                    None
                }
                Err(err) => {
                    tracing::warn!(sensor = %spec.name, error = %err, "Evaluation history task failed");
                    None
                }
            }
        };

        let outcome = self.cycle_inner(spec).await;

        if let Some(eval_id) = eval_id {
            let (status, stats) = match &outcome {
                Ok(report) => (
                    report.status,
                    EvalStats {
                        events_emitted: report.events_delivered,
                        cursor: report.cursor.clone(),
                        error_message: None,
                    },
                ),
                Err(err) => (
                    EvalStatus::Failed,
                    EvalStats {
                        events_emitted: 0,
                        cursor: None,
                        error_message: Some(err.to_string()),
                    },
                ),
            };
            let store = Arc::clone(&self.store);
            match tokio::task::spawn_blocking(move || store.complete_eval(eval_id, status, &stats))
                .await
            {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    tracing::warn!(sensor = %spec.name, error = %err, "Could not finalize evaluation history row");
                }
                Err(err) => {
                    tracing::warn!(sensor = %spec.name, error = %err, "Evaluation history task failed");
                }
            }
        }

        outcome
    }

    async fn cycle_inner(&self, spec: &SensorSpec) -> Result<CycleReport, EvalError> {
        // Read the prior cursor.
        let prior = {
            let store = Arc::clone(&self.store);
            let sensor = spec.name.clone();
            tokio::task::spawn_blocking(move || store.get_cursor(&sensor))
                .await
                .map_err(|err| EvalError::Internal(err.to_string()))??
        };

        // Probe under the sensor's timeout.
        let observed = {
            let probe = Arc::clone(&spec.probe);
            tokio::time::timeout(
                spec.probe_timeout,
                tokio::task::spawn_blocking(move || probe.observe()),
            )
            .await
            .map_err(|_| EvalError::ProbeTimeout(spec.probe_timeout))?
            .map_err(|err| EvalError::Internal(err.to_string()))??
        };

        let evaluation = evaluate(
            prior.as_ref().map(|record| &record.cursor),
            &observed,
            &spec.assets,
            Utc::now(),
        );

        // Persist the cursor before anything is delivered. If this write
        // fails the events are discarded and the cycle fails: the next
        // successful cycle re-detects the same change.
        if let Some(cursor) = &evaluation.cursor {
            let store = Arc::clone(&self.store);
            let sensor = spec.name.clone();
            let cursor = cursor.clone();
            tokio::task::spawn_blocking(move || store.set_cursor(&sensor, &cursor))
                .await
                .map_err(|err| EvalError::Internal(err.to_string()))??;
        }

        if evaluation.emitted() {
            let sink = Arc::clone(&self.sink);
            let events = evaluation.events.clone();
            tokio::task::spawn_blocking(move || sink.deliver(&events))
                .await
                .map_err(|err| EvalError::Internal(err.to_string()))?
                .map_err(EvalError::Delivery)?;
        }

        let status = if evaluation.emitted() {
            EvalStatus::Emitted
        } else {
            EvalStatus::Quiescent
        };
        Ok(CycleReport {
            status,
            events_delivered: evaluation.events.len() as u64,
            cursor: evaluation.cursor,
        })
    }
}
