//! # Inbound Ports
//!
//! API trait defining what the Track Ledger can do.

use crate::domain::{
    CallContext, Identity, LedgerError, Listing, Profile, StreamReceipt, TrackId, TrackRecord,
    TransferReceipt,
};

/// Track Ledger API - inbound port.
///
/// Every mutating call either commits its full effect or returns an error
/// with no observable change.
pub trait TrackLedgerApi {
    /// Mint one track owned by the issuer.
    fn mint(
        &mut self,
        ctx: &CallContext,
        metadata_uri: &str,
        streamable: bool,
    ) -> Result<TrackId, LedgerError>;

    /// Mint up to `max_batch_size` tracks, all or none.
    ///
    /// `metadata_uris` and `streamables` are paired by position and must
    /// have equal length.
    fn mint_batch(
        &mut self,
        ctx: &CallContext,
        metadata_uris: &[String],
        streamables: &[bool],
    ) -> Result<Vec<TrackId>, LedgerError>;

    /// Hand a track to `new_owner`.
    fn transfer(
        &mut self,
        ctx: &CallContext,
        id: TrackId,
        new_owner: Identity,
    ) -> Result<TransferReceipt, LedgerError>;

    /// Apply up to `max_batch_size` transfers in order, all or none.
    fn transfer_batch(
        &mut self,
        ctx: &CallContext,
        ids: &[TrackId],
        new_owners: &[Identity],
    ) -> Result<Vec<TransferReceipt>, LedgerError>;

    /// List an owned, streamable track for `fee`.
    fn list_for_streaming(
        &mut self,
        ctx: &CallContext,
        id: TrackId,
        fee: u64,
    ) -> Result<(), LedgerError>;

    /// Remove the caller's listing.
    fn delist(&mut self, ctx: &CallContext, id: TrackId) -> Result<(), LedgerError>;

    /// Pay the listing fee and take ownership of the track.
    fn stream(&mut self, ctx: &CallContext, id: TrackId) -> Result<StreamReceipt, LedgerError>;

    /// Overwrite the caller's profile.
    fn update_profile(
        &mut self,
        ctx: &CallContext,
        fan_count: u32,
        fame_level: u32,
    ) -> Result<(), LedgerError>;

    /// Get a track by id.
    fn get_track(&self, id: TrackId) -> Option<&TrackRecord>;

    /// Get the listing for a track id.
    fn get_listing(&self, id: TrackId) -> Option<&Listing>;

    /// Get an identity's profile.
    fn get_profile(&self, who: &Identity) -> Option<&Profile>;

    /// Number of minted tracks.
    fn get_total_tracks(&self) -> u64;
}
