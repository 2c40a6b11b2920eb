//! Collaborator interfaces implemented by the embedding host runtime.
//!
//! The capacity core owns no occupancy state and no limit state; both live in
//! the host. These traits are the only two calls the core makes into it.

use async_trait::async_trait;

use crate::CapacityError;

/// Source of the current participant count.
///
/// Queried fresh at every recomputation, at the moment the debounce window
/// elapses. Never cached, so the debounce delay cannot serve stale counts.
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// Returns the number of participants currently in the session.
    ///
    /// Fails with [`CapacityError::Registry`] if the registry is unavailable;
    /// the recomputation cycle then aborts without touching the sink.
    async fn current_occupancy(&self) -> Result<u64, CapacityError>;
}

/// Sink that accepts a newly computed participant limit.
#[async_trait]
pub trait LimitSink: Send + Sync {
    /// Applies `limit` as the session's advertised maximum.
    ///
    /// Fails with [`CapacityError::Sink`] if the host rejects the value or is
    /// unreachable. The core performs no retry; the next membership event
    /// produces a fresh attempt.
    async fn set_max_participants(&self, limit: u64) -> Result<(), CapacityError>;
}
