//! # Domain Entities
//!
//! Core entities for the Track Ledger: track records, marketplace
//! listings, reputation profiles and the configuration that bounds them.

use super::errors::LedgerError;
use super::value_objects::{Identity, TrackId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default maximum number of elements in a batch call.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 10;

/// Default maximum metadata URI length.
pub const DEFAULT_MAX_METADATA_URI_LEN: usize = 256;

/// Default upper bound for `fan_count`.
pub const DEFAULT_MAX_FAN_COUNT: u32 = 10_000;

/// Default upper bound for `fame_level`.
pub const DEFAULT_MAX_FAME_LEVEL: u32 = 100;

/// A minted track record. Never deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    /// Sequential identifier, `1..=counter`.
    pub id: TrackId,
    /// Current exclusive owner.
    pub owner: Identity,
    /// Metadata URI, `1..=256` characters.
    pub metadata_uri: String,
    /// Gates both transfer and listing, permanently.
    pub streamable: bool,
}

/// A marketplace listing. At most one per track id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Listed track.
    pub id: TrackId,
    /// Owner at listing time; receives the fee on streaming.
    pub lister: Identity,
    /// Streaming fee, always > 0.
    pub fee: u64,
    /// Block height when listed.
    pub listed_at: u64,
}

/// Per-identity reputation counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Fan count, `<= max_fan_count`.
    pub fan_count: u32,
    /// Fame level, `<= max_fame_level`.
    pub fame_level: u32,
}

/// Receipt for one applied ownership change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    /// Moved track.
    pub id: TrackId,
    /// Previous owner.
    pub from: Identity,
    /// New owner.
    pub to: Identity,
}

/// Receipt for a settled stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamReceipt {
    /// Streamed track.
    pub id: TrackId,
    /// Identity that was paid and lost ownership.
    pub seller: Identity,
    /// Identity that paid and gained ownership.
    pub streamer: Identity,
    /// Fee moved from streamer to seller.
    pub fee: u64,
}

/// Ledger configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// The only identity allowed to mint.
    pub issuer: Identity,
    /// Maximum elements in `mint_batch` / `transfer_batch`.
    pub max_batch_size: usize,
    /// Maximum metadata URI length in characters.
    pub max_metadata_uri_len: usize,
    /// Upper bound for `fan_count`.
    pub max_fan_count: u32,
    /// Upper bound for `fame_level`.
    pub max_fame_level: u32,
    /// Remove the listing on a track when a transfer moves it.
    /// With `false` the listing stays behind under the previous lister.
    pub clear_listing_on_transfer: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            issuer: Identity::ZERO,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            max_metadata_uri_len: DEFAULT_MAX_METADATA_URI_LEN,
            max_fan_count: DEFAULT_MAX_FAN_COUNT,
            max_fame_level: DEFAULT_MAX_FAME_LEVEL,
            clear_listing_on_transfer: true,
        }
    }
}

impl LedgerConfig {
    /// Default configuration with the given issuer.
    pub fn new(issuer: Identity) -> Self {
        Self {
            issuer,
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, LedgerError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| LedgerError::InvalidInput(format!("config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations under which no call could succeed.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.max_batch_size == 0 {
            return Err(LedgerError::InvalidInput(
                "config: max_batch_size must be > 0".to_string(),
            ));
        }
        if self.max_metadata_uri_len == 0 {
            return Err(LedgerError::InvalidInput(
                "config: max_metadata_uri_len must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// The four keyed stores plus the id counter.
///
/// Owned by one ledger instance; starts at counter 0 with empty maps and is
/// never implicitly reset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    /// Track registry, keyed by id.
    pub tracks: BTreeMap<TrackId, TrackRecord>,
    /// Marketplace listings, keyed by track id.
    pub listings: BTreeMap<TrackId, Listing>,
    /// Reputation profiles.
    pub profiles: BTreeMap<Identity, Profile>,
    /// Number of minted tracks; highest valid id.
    pub counter: u64,
}

impl LedgerState {
    /// Fresh, empty state.
    pub fn new() -> Self {
        Self::default()
    }
}
