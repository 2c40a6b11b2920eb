//! Error types for the capacity core.

use hostcap_timer::TimerError;
use thiserror::Error;

/// Errors that can occur during a recomputation cycle.
///
/// All of these are local to a single cycle: a failed cycle leaves the
/// previously applied limit in effect, and the next membership event retries
/// naturally. Nothing here is a crash path.
#[derive(Debug, Error)]
pub enum CapacityError {
    /// The session registry could not report occupancy. The cycle aborts
    /// before any sink write.
    #[error("occupancy query failed: {0}")]
    Registry(String),

    /// The configuration sink rejected or failed to apply the new limit.
    #[error("limit sink rejected value {limit}: {message}")]
    Sink { limit: u64, message: String },

    /// The scheduling substrate refused a new timer.
    #[error(transparent)]
    Timer(#[from] TimerError),
}
