//! # hostcap-capacity
//!
//! Debounced session capacity core for a multiplayer host.
//!
//! The core keeps the host's advertised participant limit at "current
//! occupancy + 1" (floor 1 when empty), recomputing whenever participants
//! join or leave. Rapid membership churn (many players connecting within
//! milliseconds of each other at server restart, say) collapses into a
//! single recomputation per settled burst instead of one per event.
//!
//! ## Pieces
//!
//! - [`limit_for`]: the pure occupancy-to-limit rule
//! - [`Debouncer`]: cancel-and-replace coalescing of trigger calls
//! - [`LimitApplier`]: one read-fresh, compute, push-to-sink cycle
//! - [`CapacityManager`]: lifecycle, event routing, and the worker loop
//! - [`SessionRegistry`] / [`LimitSink`]: seams implemented by the host
//!
//! ## Invariants
//!
//! - At most one pending recomputation is scheduled at any instant
//! - Occupancy is read fresh at fire time, never cached across cycles
//! - Failures are local to a single cycle and self-heal on the next event

mod apply;
mod config;
mod debounce;
mod error;
mod host;
mod manager;
mod policy;

pub use apply::LimitApplier;
pub use config::{CapacityConfig, DEFAULT_QUIET_PERIOD};
pub use debounce::{DebouncedAction, Debouncer};
pub use error::CapacityError;
pub use host::{LimitSink, SessionRegistry};
pub use manager::CapacityManager;
pub use policy::{limit_for, MIN_LIMIT};
