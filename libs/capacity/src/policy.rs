//! The occupancy-to-limit rule.

/// The limit advertised for an empty session.
///
/// A limit of 0 would make an empty session permanently unjoinable (nobody
/// could ever join to raise it again), so the rule floors at one open slot.
pub const MIN_LIMIT: u64 = 1;

/// Computes the advertised participant limit for a given occupancy.
///
/// A non-empty session advertises exactly one slot above current occupancy:
/// the minimum capacity that always admits one more participant, at which
/// point the next recomputation raises it again. No upper bound is enforced
/// here; if the host's configuration sink imposes a maximum, that is the
/// sink's concern.
#[must_use]
pub const fn limit_for(occupancy: u64) -> u64 {
    if occupancy == 0 {
        MIN_LIMIT
    } else {
        occupancy.saturating_add(1)
    }
}
