//! Event delivery boundary.

use std::sync::Mutex;

use vigil_types::Materialization;

/// Destination for emitted materialization events.
///
/// Delivery happens after the cursor persist. A sink failure therefore
/// loses that batch (at-most-once); sinks that need stronger guarantees
/// should buffer internally and retry on their own schedule.
pub trait EventSink: Send + Sync {
    /// Deliver one evaluation's events, in emission order.
    ///
    /// # Errors
    ///
    /// Returns an error when the destination rejects the batch.
    fn deliver(&self, events: &[Materialization]) -> anyhow::Result<()>;
}

/// Sink that logs each event. The default for CLI runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn deliver(&self, events: &[Materialization]) -> anyhow::Result<()> {
        for event in events {
            tracing::info!(
                asset = %event.asset_key,
                observed_at = %event.observed_at,
                metadata = %serde_json::to_string(&event.metadata)?,
                "Materialization"
            );
        }
        Ok(())
    }
}

/// Sink that retains delivered events in memory, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySink {
    delivered: Mutex<Vec<Materialization>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything delivered so far, in delivery order.
    #[must_use]
    pub fn delivered(&self) -> Vec<Materialization> {
        self.delivered
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl EventSink for MemorySink {
    fn deliver(&self, events: &[Materialization]) -> anyhow::Result<()> {
        self.delivered
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .extend_from_slice(events);
        Ok(())
    }
}
