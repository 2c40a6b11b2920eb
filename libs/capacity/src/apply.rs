//! A single recomputation cycle: read fresh occupancy, compute, push to sink.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::debounce::DebouncedAction;
use crate::host::{LimitSink, SessionRegistry};
use crate::policy::limit_for;
use crate::CapacityError;

/// Runs compute-and-apply cycles against the host's registry and sink.
///
/// Stateless between invocations: every cycle reads occupancy fresh and
/// derives the limit from scratch, never from a cached previous value.
/// Re-running with unchanged occupancy re-applies the same value, which is
/// what makes a spurious extra fire from a cancellation race harmless.
pub struct LimitApplier {
    registry: Arc<dyn SessionRegistry>,
    sink: Arc<dyn LimitSink>,
}

impl LimitApplier {
    /// Creates an applier over the host's occupancy source and limit sink.
    pub fn new(registry: Arc<dyn SessionRegistry>, sink: Arc<dyn LimitSink>) -> Self {
        Self { registry, sink }
    }

    /// Runs one cycle and returns the limit that was applied.
    ///
    /// A registry failure aborts the cycle before any sink write, leaving the
    /// last successfully applied limit in effect.
    pub async fn recompute_and_apply(&self) -> Result<u64, CapacityError> {
        let occupancy = self.registry.current_occupancy().await?;
        let limit = limit_for(occupancy);
        self.sink.set_max_participants(limit).await?;
        debug!(occupancy, limit, "applied session capacity");
        Ok(limit)
    }
}

#[async_trait]
impl DebouncedAction for LimitApplier {
    async fn run(&self) {
        if let Err(e) = self.recompute_and_apply().await {
            warn!(error = %e, "capacity recompute cycle failed");
        }
    }
}
