//! Burst coalescing for recomputation triggers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use hostcap_timer::{ScheduledTask, TimerError, TimerService};

/// The action a [`Debouncer`] runs when its quiet period elapses.
///
/// `run` has no error channel: implementations contain their own failures, so
/// a failed cycle can never unwind into the scheduling state and the
/// debouncer stays ready for the next trigger.
#[async_trait]
pub trait DebouncedAction: Send + Sync + 'static {
    /// Runs the coalesced action once.
    async fn run(&self);
}

struct Pending {
    seq: u64,
    task: ScheduledTask,
}

struct Inner {
    timer: Arc<dyn TimerService>,
    action: Arc<dyn DebouncedAction>,
    quiet_period: Duration,
    /// The single mutable slot: at most one pending fire is tracked at any
    /// instant. Held only for the duration of an `Option` swap, never across
    /// an await.
    pending: Mutex<Option<Pending>>,
    seq: AtomicU64,
}

/// Coalesces arbitrarily frequent triggers into one delayed action run.
///
/// Every [`trigger`](Debouncer::trigger) cancels the previously scheduled run
/// (best-effort) and schedules a fresh one at `now + quiet_period`, so a
/// burst of triggers produces a single run reflecting the state at its fire
/// time. Cancellation that loses the race against an in-flight fire is
/// tolerated: the stale fire runs with old state, and the freshly scheduled
/// run still reflects the final state afterwards. No trigger is ever
/// permanently dropped.
pub struct Debouncer {
    inner: Arc<Inner>,
}

impl Debouncer {
    /// Creates a debouncer that runs `action` on the given timer service.
    pub fn new(
        timer: Arc<dyn TimerService>,
        action: Arc<dyn DebouncedAction>,
        quiet_period: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                timer,
                action,
                quiet_period,
                pending: Mutex::new(None),
                seq: AtomicU64::new(0),
            }),
        }
    }

    /// Schedules the action for `now + quiet_period`, superseding any pending
    /// run.
    ///
    /// Never blocks: the wait lives inside the timer service. If the timer
    /// refuses the new task the error propagates to the caller and the
    /// previously pending run, if any, is left in place untouched.
    pub fn trigger(&self) -> Result<(), TimerError> {
        let seq = self.inner.seq.fetch_add(1, Ordering::Relaxed) + 1;

        let fire_inner = Arc::clone(&self.inner);
        let task = self.inner.timer.schedule_after(
            self.inner.quiet_period,
            Box::pin(async move {
                fire_inner.action.run().await;
                // Clear the slot only if it still holds this fire; a stale
                // fire racing a newer trigger must not clear the newer handle.
                let mut pending = fire_inner.pending.lock().unwrap();
                if pending.as_ref().map(|p| p.seq) == Some(seq) {
                    *pending = None;
                }
            }),
        )?;

        let superseded = self
            .inner
            .pending
            .lock()
            .unwrap()
            .replace(Pending { seq, task });
        if let Some(old) = superseded {
            old.task.cancel();
        }
        Ok(())
    }

    /// True while a run is scheduled and not yet fired.
    pub fn is_pending(&self) -> bool {
        self.inner.pending.lock().unwrap().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostcap_timer::TokioTimer;

    #[derive(Default)]
    struct CountingAction {
        runs: AtomicU64,
    }

    impl CountingAction {
        fn runs(&self) -> u64 {
            self.runs.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DebouncedAction for CountingAction {
        async fn run(&self) {
            self.runs.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn debouncer_with(action: &Arc<CountingAction>, quiet_period: Duration) -> Debouncer {
        Debouncer::new(
            Arc::new(TokioTimer::new()),
            Arc::clone(action) as Arc<dyn DebouncedAction>,
            quiet_period,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_runs_before_the_quiet_period() {
        let action = Arc::new(CountingAction::default());
        let debouncer = debouncer_with(&action, Duration::from_millis(100));

        debouncer.trigger().unwrap();
        tokio::time::sleep(Duration::from_millis(99)).await;

        assert_eq!(action.runs(), 0);
        assert!(debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_triggers_runs_once() {
        let action = Arc::new(CountingAction::default());
        let debouncer = debouncer_with(&action, Duration::from_millis(100));

        for _ in 0..10 {
            debouncer.trigger().unwrap();
        }
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(action.runs(), 1);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn each_trigger_restarts_the_window() {
        let action = Arc::new(CountingAction::default());
        let debouncer = debouncer_with(&action, Duration::from_millis(100));

        debouncer.trigger().unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;
        debouncer.trigger().unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;

        // 120ms after the first trigger, but only 60ms after the second.
        assert_eq!(action.runs(), 0);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(action.runs(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn settled_bursts_run_independently() {
        let action = Arc::new(CountingAction::default());
        let debouncer = debouncer_with(&action, Duration::from_millis(100));

        debouncer.trigger().unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(action.runs(), 1);

        debouncer.trigger().unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(action.runs(), 2);
    }
}
