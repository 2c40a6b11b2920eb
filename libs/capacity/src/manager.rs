//! Capacity manager: wires membership notifications to debounced
//! recomputation.

use std::sync::Arc;

use hostcap_events::MembershipEvent;
use hostcap_timer::{TimerError, TimerService};
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info};

use crate::apply::LimitApplier;
use crate::config::CapacityConfig;
use crate::debounce::{DebouncedAction, Debouncer};
use crate::host::{LimitSink, SessionRegistry};
use crate::CapacityError;

/// The assembled capacity core.
///
/// Owns the debouncer and the applier. Everything else (event delivery,
/// occupancy, the limit itself, timers) belongs to the embedding host and is
/// reached through the injected collaborators.
pub struct CapacityManager {
    applier: Arc<LimitApplier>,
    debouncer: Debouncer,
}

impl CapacityManager {
    /// Assembles the core over the host's collaborators.
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        sink: Arc<dyn LimitSink>,
        timer: Arc<dyn TimerService>,
        config: CapacityConfig,
    ) -> Self {
        let applier = Arc::new(LimitApplier::new(registry, sink));
        let debouncer = Debouncer::new(
            timer,
            Arc::clone(&applier) as Arc<dyn DebouncedAction>,
            config.quiet_period(),
        );
        Self { applier, debouncer }
    }

    /// Startup hook: one immediate, non-debounced recomputation.
    ///
    /// Establishes a correct limit before any membership events arrive.
    /// Returns the limit that was applied.
    pub async fn start(&self) -> Result<u64, CapacityError> {
        let limit = self.applier.recompute_and_apply().await?;
        info!(limit, "session capacity manager started");
        Ok(limit)
    }

    /// Routes one membership notification into the debouncer.
    ///
    /// Both event kinds map to the same trigger; the payload is traced, never
    /// interpreted. A scheduling failure propagates to the caller and is not
    /// retried here.
    pub fn notify(&self, event: &MembershipEvent) -> Result<(), TimerError> {
        debug!(
            kind = event.kind.as_str(),
            participant = %event.participant_id,
            "membership change"
        );
        self.debouncer.trigger()
    }

    /// Consumes membership events until shutdown is signaled or the channel
    /// closes.
    ///
    /// Failures inside the loop are logged and the loop continues: every
    /// failure is local to one cycle, and the core never terminates the host.
    pub async fn run(
        &self,
        mut events: mpsc::Receiver<MembershipEvent>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        info!("session capacity manager running");

        loop {
            tokio::select! {
                maybe_event = events.recv() => {
                    match maybe_event {
                        Some(event) => {
                            if let Err(e) = self.notify(&event) {
                                error!(error = %e, "failed to schedule capacity recompute");
                            }
                        }
                        None => {
                            info!("membership event channel closed");
                            break;
                        }
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("session capacity manager shutting down");
                        break;
                    }
                }
            }
        }
    }
}
