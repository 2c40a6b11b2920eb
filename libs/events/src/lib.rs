//! # hostcap-events
//!
//! Membership event type definitions and serialization for the hostcap core.
//!
//! ## Design Principles
//!
//! - Events are immutable records of membership changes already observed by
//!   the host runtime
//! - Events carry identity and timing for audit logging only; the capacity
//!   core never derives occupancy from event payloads
//! - Every event maps to the same recomputation trigger regardless of kind
//!
//! ## Event Types
//!
//! - `participant.joined`: a participant entered the session
//! - `participant.left`: a participant left the session

mod error;
mod types;

pub use error::EventError;
pub use types::*;
