//! Deferred job scheduling for notification timers

use std::time::Duration;

/// A deferred unit of work
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Runs jobs after a delay
///
/// Scheduled jobs are never cancelled; callers make stale jobs no-ops.
pub trait Scheduler: Clone + Send + Sync + 'static {
    fn schedule(&self, delay: Duration, job: Job);
}

/// Scheduler backed by tokio timers
///
/// Must be used from within a tokio runtime (iced's tokio executor).
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, job: Job) {
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            job();
        });
    }
}


#[cfg(test)]
pub use manual::ManualScheduler;
