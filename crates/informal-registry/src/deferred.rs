//! One-shot delayed tasks.
//!
//! Every delayed job (expiring a notice, removing the startup message) goes
//! through [`DeferredTasks`]. Each job can be cancelled on its own through
//! its [`DeferredHandle`], and all pending jobs are cancelled on shutdown.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Spawner for delayed one-shot jobs.
#[derive(Debug, Clone, Default)]
pub struct DeferredTasks {
    root: CancellationToken,
}

/// Handle to one scheduled job.
#[derive(Debug)]
pub struct DeferredHandle {
    token: CancellationToken,
    task: JoinHandle<bool>,
}

impl DeferredHandle {
    /// Prevents the job from running if it has not started yet.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Waits for the job; `true` when it ran, `false` when cancelled.
    pub async fn finished(self) -> bool {
        self.task.await.unwrap_or(false)
    }
}

impl DeferredTasks {
    /// Creates a new spawner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `job` after `delay` unless cancelled first.
    pub fn schedule<F>(&self, label: &'static str, delay: Duration, job: F) -> DeferredHandle
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = self.root.child_token();
        let guard = token.clone();

        let task = tokio::spawn(async move {
            tokio::select! {
                () = guard.cancelled() => {
                    debug!(label, "Deferred task cancelled");
                    false
                }
                () = tokio::time::sleep(delay) => {
                    job.await;
                    true
                }
            }
        });

        DeferredHandle { token, task }
    }

    /// Cancels every pending job.
    pub fn shutdown(&self) {
        self.root.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_job_runs_after_delay() {
        let tasks = DeferredTasks::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let job_counter = Arc::clone(&counter);

        let handle = tasks.schedule("test", Duration::from_secs(120), async move {
            job_counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_secs(119)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        assert!(handle.finished().await);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_job_never_runs() {
        let tasks = DeferredTasks::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let job_counter = Arc::clone(&counter);

        let handle = tasks.schedule("test", Duration::from_secs(120), async move {
            job_counter.fetch_add(1, Ordering::SeqCst);
        });
        handle.cancel();

        assert!(!handle.finished().await);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_everything() {
        let tasks = DeferredTasks::new();
        let first = tasks.schedule("first", Duration::from_secs(10), async {});
        let second = tasks.schedule("second", Duration::from_secs(20), async {});

        tasks.shutdown();

        assert!(!first.finished().await);
        assert!(!second.finished().await);
    }
}
