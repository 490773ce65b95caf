//! # Marketplace Ledger
//!
//! Listing and delisting of streamable tracks.

use crate::domain::{lookup_track, CallContext, LedgerError, LedgerState, Listing, TrackId};

/// List a track for streaming at `fee`.
///
/// A non-owner caller, a zero fee and a non-streamable track all fail with
/// `InvalidStreamingFee`. Any prior listing for the id is overwritten.
pub fn list_for_streaming(
    state: &mut LedgerState,
    ctx: &CallContext,
    id: TrackId,
    fee: u64,
) -> Result<Listing, LedgerError> {
    let record = lookup_track(state, id)?;
    if ctx.caller != record.owner || fee == 0 || !record.streamable {
        return Err(LedgerError::InvalidStreamingFee);
    }

    let listing = Listing {
        id,
        lister: ctx.caller,
        fee,
        listed_at: ctx.block_height,
    };
    state.listings.insert(id, listing.clone());
    Ok(listing)
}

/// Remove the caller's listing for `id`.
pub fn delist(
    state: &mut LedgerState,
    ctx: &CallContext,
    id: TrackId,
) -> Result<Listing, LedgerError> {
    let listing = state.listings.get(&id).ok_or(LedgerError::TrackMissing(id))?;
    if listing.lister != ctx.caller {
        return Err(LedgerError::PermissionDenied(format!(
            "caller did not list track {id}"
        )));
    }
    state.listings.remove(&id).ok_or(LedgerError::TrackMissing(id))
}

/// Get the listing for a track id.
pub fn listing(state: &LedgerState, id: TrackId) -> Option<&Listing> {
    state.listings.get(&id)
}
