//! Scheduling substrate abstraction.
//!
//! The capacity core never runs its own thread pool; it registers delayed
//! tasks against a timer service owned by the embedding host runtime and
//! reacts when they fire. This crate defines that seam:
//!
//! - [`TimerService`]: schedule a task to run after a delay
//! - [`ScheduledTask`]: a handle for best-effort cancellation
//! - [`TokioTimer`]: the production implementation backed by `tokio::spawn`
//!
//! Cancellation is advisory. A task that has already started running may run
//! to completion; callers must tolerate that (the capacity core does, because
//! its recomputation is idempotent).

use std::time::Duration;

use futures_core::future::BoxFuture;
use thiserror::Error;

/// Errors that can occur when scheduling a delayed task.
#[derive(Debug, Error, Clone)]
pub enum TimerError {
    /// No runtime is available to host the delayed task.
    #[error("no timer runtime available: {0}")]
    NoRuntime(String),

    /// The timer service refused the task.
    #[error("scheduling rejected: {0}")]
    Rejected(String),
}

/// Handle to a scheduled task, used for best-effort cancellation.
///
/// Dropping the handle does NOT cancel the task.
pub struct ScheduledTask {
    cancel: Box<dyn Fn() -> bool + Send + Sync>,
}

impl ScheduledTask {
    /// Wraps a cancellation closure provided by a timer implementation.
    ///
    /// The closure returns `true` if the task had not yet completed when the
    /// cancel was issued, `false` if it had already finished. A task that has
    /// started but not finished counts as cancelled even though it may still
    /// run to completion.
    pub fn from_cancel_fn(cancel: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        Self {
            cancel: Box::new(cancel),
        }
    }

    /// Requests cancellation of the scheduled task.
    pub fn cancel(&self) -> bool {
        (self.cancel)()
    }
}

impl std::fmt::Debug for ScheduledTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduledTask").finish_non_exhaustive()
    }
}

/// A timer service that runs a task once after a delay.
pub trait TimerService: Send + Sync + 'static {
    /// Schedules `task` to run after `delay`.
    ///
    /// Returns a handle that can cancel the task before it starts. Failures
    /// are surfaced to the caller; the service performs no internal retry.
    fn schedule_after(
        &self,
        delay: Duration,
        task: BoxFuture<'static, ()>,
    ) -> Result<ScheduledTask, TimerError>;
}

/// Production timer backed by the ambient tokio runtime.
///
/// Scheduled tasks are spawned onto the current runtime and sleep until their
/// fire time. Under `tokio::time::pause()` the sleep follows virtual time, so
/// paused-clock tests can drive this implementation directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

impl TokioTimer {
    /// Creates a tokio-backed timer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TimerService for TokioTimer {
    fn schedule_after(
        &self,
        delay: Duration,
        task: BoxFuture<'static, ()>,
    ) -> Result<ScheduledTask, TimerError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| TimerError::NoRuntime(e.to_string()))?;

        let join = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });

        let abort = join.abort_handle();
        Ok(ScheduledTask::from_cancel_fn(move || {
            if abort.is_finished() {
                return false;
            }
            abort.abort();
            true
        }))
    }
}
