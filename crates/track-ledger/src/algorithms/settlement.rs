//! # Streaming Settlement
//!
//! Couples the fee payment, the ownership handoff and the delisting.
//! Payment happens first; once it succeeds the remaining steps cannot fail.

use crate::domain::{
    lookup_track, CallContext, LedgerError, LedgerState, StreamReceipt, TrackId,
};
use crate::ports::ValueTransfer;

/// Stream a listed track: pay the lister, take ownership, remove the listing.
pub fn stream<T: ValueTransfer + ?Sized>(
    state: &mut LedgerState,
    payments: &T,
    ctx: &CallContext,
    id: TrackId,
) -> Result<StreamReceipt, LedgerError> {
    let record = lookup_track(state, id)?;
    let listing = state.listings.get(&id).ok_or(LedgerError::TrackMissing(id))?;

    if ctx.caller == listing.lister {
        return Err(LedgerError::PermissionDenied(format!(
            "lister cannot stream own track {id}"
        )));
    }
    if !record.streamable {
        return Err(LedgerError::PermissionDenied(format!(
            "track {id} is not streamable"
        )));
    }

    let receipt = StreamReceipt {
        id,
        seller: listing.lister,
        streamer: ctx.caller,
        fee: listing.fee,
    };

    payments.transfer(receipt.fee, &receipt.streamer, &receipt.seller)?;

    if let Some(record) = state.tracks.get_mut(&id) {
        record.owner = receipt.streamer;
    }
    state.listings.remove(&id);
    Ok(receipt)
}
