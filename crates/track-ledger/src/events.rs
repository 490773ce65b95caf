//! # Ledger Events
//!
//! Every committed mutation emits one event per state change, for
//! consumption by external indexers. Failed calls emit nothing.

use crate::domain::{Identity, Listing, Profile, TrackId, TrackRecord};
use serde::{Deserialize, Serialize};

// =============================================================================
// EVENT TOPICS
// =============================================================================

/// Topic names, stable across versions.
pub mod topics {
    /// Track minted.
    pub const TRACK_MINTED: &str = "track.minted";
    /// Ownership handed off by a transfer.
    pub const TRACK_TRANSFERRED: &str = "track.transferred";
    /// Listing created or overwritten.
    pub const TRACK_LISTED: &str = "track.listed";
    /// Listing removed by its lister or by a transfer.
    pub const TRACK_DELISTED: &str = "track.delisted";
    /// Listing consumed by a stream.
    pub const TRACK_STREAMED: &str = "track.streamed";
    /// Profile overwritten.
    pub const PROFILE_UPDATED: &str = "profile.updated";
}

// =============================================================================
// EVENTS
// =============================================================================

/// Why a listing went away without being streamed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DelistReason {
    /// The lister removed it.
    Lister,
    /// A transfer moved the track.
    Transferred,
}

/// A committed ledger state change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// A new track exists.
    TrackMinted {
        /// The record as stored.
        track: TrackRecord,
    },
    /// Ownership moved from `from` to `to`.
    TrackTransferred {
        /// Moved track.
        id: TrackId,
        /// Previous owner.
        from: Identity,
        /// New owner.
        to: Identity,
    },
    /// A listing was created or overwritten.
    TrackListed {
        /// The listing as stored.
        listing: Listing,
    },
    /// A listing was removed.
    TrackDelisted {
        /// Listed track.
        id: TrackId,
        /// Lister of the removed listing.
        lister: Identity,
        /// Cause of removal.
        reason: DelistReason,
    },
    /// A stream paid `fee` and moved ownership to `streamer`.
    TrackStreamed {
        /// Streamed track.
        id: TrackId,
        /// Paid identity.
        seller: Identity,
        /// Paying identity, now owner.
        streamer: Identity,
        /// Fee moved.
        fee: u64,
    },
    /// A profile was overwritten.
    ProfileUpdated {
        /// Profile holder.
        who: Identity,
        /// New values.
        profile: Profile,
    },
}

impl LedgerEvent {
    /// Topic name of this event.
    pub fn topic(&self) -> &'static str {
        match self {
            Self::TrackMinted { .. } => topics::TRACK_MINTED,
            Self::TrackTransferred { .. } => topics::TRACK_TRANSFERRED,
            Self::TrackListed { .. } => topics::TRACK_LISTED,
            Self::TrackDelisted { .. } => topics::TRACK_DELISTED,
            Self::TrackStreamed { .. } => topics::TRACK_STREAMED,
            Self::ProfileUpdated { .. } => topics::PROFILE_UPDATED,
        }
    }
}

/// An event with its position in the ledger's event log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Sequential index, starting at 0, never reused.
    pub index: u64,
    /// Block height of the call that produced the event.
    pub block_height: u64,
    /// Identity that made the call.
    pub caller: Identity,
    /// The event.
    pub event: LedgerEvent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_is_tagged() {
        let event = LedgerEvent::TrackTransferred {
            id: 3,
            from: Identity::new([1u8; 20]),
            to: Identity::new([2u8; 20]),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "track_transferred");
        assert_eq!(json["id"], 3);
        assert_eq!(event.topic(), topics::TRACK_TRANSFERRED);
    }

    #[test]
    fn test_envelope_roundtrip() {
        let envelope = EventEnvelope {
            index: 7,
            block_height: 12,
            caller: Identity::new([3u8; 20]),
            event: LedgerEvent::ProfileUpdated {
                who: Identity::new([3u8; 20]),
                profile: Profile {
                    fan_count: 1,
                    fame_level: 2,
                },
            },
        };
        let json = serde_json::to_string(&envelope).unwrap();
        let back: EventEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(back, envelope);
    }
}
