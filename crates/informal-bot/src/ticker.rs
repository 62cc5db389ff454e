//! Per-minute re-evaluation of every monitored channel using
//! tokio-cron-scheduler.

use anyhow::{Context, Result};
use informal_commands::SharedEngine;
use informal_registry::{Action, Dispatcher, RegistrationEngine};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{debug, info};

/// Cron expression firing at second 0 of every minute.
pub const TICK_SCHEDULE: &str = "0 * * * * *";

/// Owns the scheduler that drives [`RegistrationEngine::tick`].
pub struct RegistrationTicker {
    scheduler: JobScheduler,
}

impl std::fmt::Debug for RegistrationTicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationTicker")
            .field("schedule", &TICK_SCHEDULE)
            .finish_non_exhaustive()
    }
}

/// Runs one tick under the engine lock.
pub fn tick(engine: &Mutex<RegistrationEngine>) -> Vec<Action> {
    engine.lock().tick()
}

/// Runs one tick and performs the resulting announcements.
pub async fn run_tick(engine: &Mutex<RegistrationEngine>, dispatcher: &Dispatcher) {
    let actions = tick(engine);
    if actions.is_empty() {
        return;
    }

    debug!(count = actions.len(), "Tick produced announcements");
    dispatcher.execute(actions).await;
}

impl RegistrationTicker {
    /// Schedules the tick job and starts the scheduler.
    ///
    /// # Errors
    ///
    /// Returns an error if the scheduler cannot be created or started.
    pub async fn start(engine: SharedEngine, dispatcher: Dispatcher) -> Result<Self> {
        let scheduler = JobScheduler::new()
            .await
            .context("Failed to create JobScheduler")?;

        let job = Job::new_async(TICK_SCHEDULE, move |_uuid, _lock| {
            let engine = Arc::clone(&engine);
            let dispatcher = dispatcher.clone();
            Box::pin(async move {
                run_tick(&engine, &dispatcher).await;
            })
        })
        .context("Failed to create registration tick job")?;

        scheduler
            .add(job)
            .await
            .context("Failed to add registration tick job")?;
        scheduler
            .start()
            .await
            .context("Failed to start scheduler")?;

        info!("Registration ticker started");
        Ok(Self { scheduler })
    }

    /// Stops the scheduler.
    ///
    /// # Errors
    ///
    /// Returns an error if the scheduler fails to shut down cleanly.
    pub async fn shutdown(mut self) -> Result<()> {
        self.scheduler
            .shutdown()
            .await
            .context("Failed to shutdown scheduler")?;
        info!("Registration ticker stopped");
        Ok(())
    }
}
