//! Configuration for the capacity core.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default debounce window for membership bursts.
///
/// Long enough to coalesce near-simultaneous joins, short enough that players
/// never perceive a stale limit.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(250);

/// Capacity core configuration.
///
/// The embedding host owns acquisition (files, flags, whatever it layers)
/// and hands the finished struct over. The core reads no environment of its
/// own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityConfig {
    /// Debounce window in milliseconds. Membership changes arriving within
    /// one window of each other collapse into a single recomputation. A zero
    /// window degenerates to one recomputation per event.
    pub quiet_period_ms: u64,
}

impl CapacityConfig {
    /// The debounce window as a [`Duration`].
    #[must_use]
    pub const fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }

    /// Returns the config with the debounce window replaced.
    #[must_use]
    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period_ms = u64::try_from(quiet_period.as_millis()).unwrap_or(u64::MAX);
        self
    }
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            quiet_period_ms: DEFAULT_QUIET_PERIOD.as_millis() as u64,
        }
    }
}
