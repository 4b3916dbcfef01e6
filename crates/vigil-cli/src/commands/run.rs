use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use vigil_engine::config::sensor_specs;
use vigil_engine::{LogSink, Scheduler, SkipReason, TickOutcome};
use vigil_state::SqliteCursorStore;

use crate::commands::{load_catalog, load_config};

/// Execute the `run` command: load definitions and drive the scheduler.
pub async fn execute(definitions_path: &Path, once: bool) -> Result<()> {
    let config = load_config(definitions_path)?;
    let catalog = load_catalog(&config)?;

    let store = SqliteCursorStore::open(&config.state_path).with_context(|| {
        format!("Failed to open cursor store: {}", config.state_path.display())
    })?;

    let mut scheduler = Scheduler::new(Arc::new(store), Arc::new(LogSink));
    if let Some(catalog) = catalog {
        tracing::info!(assets = catalog.len(), "Asset catalog loaded");
        scheduler = scheduler.with_catalog(catalog);
    }

    for spec in sensor_specs(&config)? {
        scheduler.register(spec)?;
    }

    tracing::info!(
        sensors = config.sensors.len(),
        state = %config.state_path.display(),
        "Scheduler starting"
    );

    if once {
        run_each_once(&scheduler).await
    } else {
        Arc::new(scheduler).run_forever().await
    }
}

async fn run_each_once(scheduler: &Scheduler) -> Result<()> {
    let mut failures = 0u32;
    for name in scheduler.sensor_names() {
        match scheduler.run_once(&name).await {
            Ok(TickOutcome::Completed(report)) => {
                println!(
                    "{}: {} ({} event(s))",
                    name, report.status, report.events_delivered
                );
            }
            Ok(TickOutcome::Skipped(SkipReason::AlreadyRunning)) => {
                println!("{name}: skipped (already running)");
            }
            Ok(TickOutcome::Skipped(SkipReason::TooSoon { remaining })) => {
                println!("{name}: skipped ({remaining:?} until next evaluation)");
            }
            Err(err) => {
                failures += 1;
                eprintln!("{name}: failed: {err}");
            }
        }
    }
    if failures > 0 {
        anyhow::bail!("{failures} sensor(s) failed");
    }
    Ok(())
}
