//! # Domain Value Objects
//!
//! Immutable value types for the Track Ledger.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Sequential track identifier. The first minted track is `1`.
pub type TrackId = u64;

/// A 20-byte account identity.
///
/// Serialized as a `0x`-prefixed hex string so it can key JSON maps.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Identity(pub [u8; 20]);

impl Identity {
    /// The zero identity.
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an identity from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Creates an identity from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        let bytes: [u8; 20] = slice.try_into().ok()?;
        Some(Self(bytes))
    }

    /// Parses a hex identity, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Option<Self> {
        let raw = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(raw).ok()?;
        Self::from_slice(&bytes)
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity(0x{}...)", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).ok_or_else(|| de::Error::custom(format!("invalid identity: {s}")))
    }
}

impl From<[u8; 20]> for Identity {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

/// Per-call execution context supplied by the host.
///
/// The caller is never inferred from ambient state; every mutating
/// operation takes one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallContext {
    /// Identity that invoked the call.
    pub caller: Identity,
    /// Monotonic sequence marker (block height) at call time.
    pub block_height: u64,
}

impl CallContext {
    /// Create a new call context.
    pub fn new(caller: Identity, block_height: u64) -> Self {
        Self {
            caller,
            block_height,
        }
    }
}

/// A `(metadata_uri, streamable)` pair submitted for minting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintRequest {
    /// Metadata URI for the track.
    pub metadata_uri: String,
    /// Whether the track may ever be transferred or listed.
    pub streamable: bool,
}

impl MintRequest {
    /// Create a new mint request.
    pub fn new(metadata_uri: impl Into<String>, streamable: bool) -> Self {
        Self {
            metadata_uri: metadata_uri.into(),
            streamable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_display_is_full_hex() {
        let id = Identity::new([0xAB; 20]);
        assert_eq!(id.to_string(), format!("0x{}", "ab".repeat(20)));
    }

    #[test]
    fn test_identity_from_hex_roundtrip() {
        let id = Identity::new([7u8; 20]);
        assert_eq!(Identity::from_hex(&id.to_string()), Some(id));
        assert_eq!(Identity::from_hex("0x1234"), None);
        assert_eq!(Identity::from_hex("not-hex"), None);
    }

    #[test]
    fn test_identity_serializes_as_hex_string() {
        let id = Identity::new([1u8; 20]);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "01".repeat(20)));
        let back: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_identity_from_slice_wrong_length() {
        assert!(Identity::from_slice(&[1u8; 19]).is_none());
        assert!(Identity::from_slice(&[1u8; 20]).is_some());
    }
}
