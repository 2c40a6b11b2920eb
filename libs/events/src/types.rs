//! Membership event types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::EventError;

// =============================================================================
// Participant identity
// =============================================================================

/// A typed ID for a session participant.
///
/// ULID-based for sortability and uniqueness, rendered as `part_{ulid}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticipantId(Ulid);

impl ParticipantId {
    /// The prefix for this ID type.
    pub const PREFIX: &'static str = "part";

    /// Creates a new ID with a fresh ULID.
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Creates an ID from a raw ULID.
    #[must_use]
    pub const fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    /// Returns the underlying ULID.
    #[must_use]
    pub const fn ulid(&self) -> Ulid {
        self.0
    }

    /// Parses an ID from a string.
    ///
    /// The string must be in the format `part_{ulid}`.
    pub fn parse(s: &str) -> Result<Self, EventError> {
        if s.is_empty() {
            return Err(EventError::InvalidParticipantId("empty ID".to_string()));
        }

        let Some((prefix, ulid_str)) = s.split_once('_') else {
            return Err(EventError::InvalidParticipantId(format!(
                "missing underscore separator: {s}"
            )));
        };

        if prefix != Self::PREFIX {
            return Err(EventError::InvalidParticipantId(format!(
                "expected prefix '{}', got '{prefix}'",
                Self::PREFIX
            )));
        }

        let ulid = ulid_str
            .parse::<Ulid>()
            .map_err(|e| EventError::InvalidParticipantId(e.to_string()))?;

        Ok(Self(ulid))
    }
}

impl Default for ParticipantId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", Self::PREFIX, self.0)
    }
}

impl std::str::FromStr for ParticipantId {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ParticipantId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ParticipantId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Membership events
// =============================================================================

/// The kind of membership change that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipEventKind {
    /// A participant entered the session.
    ParticipantJoined,
    /// A participant left the session.
    ParticipantLeft,
}

impl MembershipEventKind {
    /// Returns the stable event-type string for this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            MembershipEventKind::ParticipantJoined => "participant.joined",
            MembershipEventKind::ParticipantLeft => "participant.left",
        }
    }
}

impl std::fmt::Display for MembershipEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MembershipEventKind {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "participant.joined" => Ok(MembershipEventKind::ParticipantJoined),
            "participant.left" => Ok(MembershipEventKind::ParticipantLeft),
            other => Err(EventError::UnknownEventKind(other.to_string())),
        }
    }
}

/// A membership change observed by the host runtime.
///
/// The capacity core treats both kinds identically; each maps to the same
/// recomputation trigger. The participant ID and timestamp exist for audit
/// logging, never for occupancy math.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipEvent {
    /// What happened.
    pub kind: MembershipEventKind,

    /// Which participant this event concerns.
    pub participant_id: ParticipantId,

    /// When the change occurred.
    pub occurred_at: DateTime<Utc>,
}

impl MembershipEvent {
    /// Creates a join event stamped with the current time.
    #[must_use]
    pub fn joined(participant_id: ParticipantId) -> Self {
        Self {
            kind: MembershipEventKind::ParticipantJoined,
            participant_id,
            occurred_at: Utc::now(),
        }
    }

    /// Creates a leave event stamped with the current time.
    #[must_use]
    pub fn left(participant_id: ParticipantId) -> Self {
        Self {
            kind: MembershipEventKind::ParticipantLeft,
            participant_id,
            occurred_at: Utc::now(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&MembershipEventKind::ParticipantJoined).unwrap(),
            "\"participant_joined\""
        );
        assert_eq!(
            serde_json::to_string(&MembershipEventKind::ParticipantLeft).unwrap(),
            "\"participant_left\""
        );
    }

    #[test]
    fn test_event_kind_strings() {
        assert_eq!(
            MembershipEventKind::ParticipantJoined.to_string(),
            "participant.joined"
        );
        assert_eq!(
            "participant.left".parse::<MembershipEventKind>().unwrap(),
            MembershipEventKind::ParticipantLeft
        );
    }

    #[test]
    fn test_event_kind_unknown() {
        let err = "participant.renamed".parse::<MembershipEventKind>();
        assert_eq!(
            err,
            Err(EventError::UnknownEventKind("participant.renamed".to_string()))
        );
    }

    #[test]
    fn test_participant_id_round_trip() {
        let id = ParticipantId::new();
        let s = id.to_string();
        assert!(s.starts_with("part_"));
        assert_eq!(s.parse::<ParticipantId>().unwrap(), id);
    }

    #[test]
    fn test_participant_id_rejects_bad_input() {
        assert!(ParticipantId::parse("").is_err());
        assert!(ParticipantId::parse("part").is_err());
        assert!(ParticipantId::parse("user_01HV4Z2WQXKJNM8GPQY6VBKC3D").is_err());
        assert!(ParticipantId::parse("part_not-a-ulid").is_err());
    }

    #[test]
    fn test_membership_event_round_trip() {
        let event = MembershipEvent::joined(ParticipantId::new());
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"participant_joined\""));
        let parsed: MembershipEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, parsed);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn participant_id_string_form_round_trips(raw in any::<u128>()) {
                let id = ParticipantId::from_ulid(ulid::Ulid(raw));
                let parsed = id.to_string().parse::<ParticipantId>().unwrap();
                prop_assert_eq!(parsed, id);
            }
        }
    }
}
