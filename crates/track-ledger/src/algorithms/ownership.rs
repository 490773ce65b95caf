//! # Ownership Transfer Engine
//!
//! Single and batched ownership handoffs.
//!
//! Batches are staged: each transfer is checked against the owners the
//! earlier elements of the same batch would produce, and nothing touches
//! the registry until every element has passed. Commit is infallible.

use crate::domain::{
    invariant_batch_shape, lookup_track, CallContext, Identity, LedgerConfig, LedgerError,
    LedgerState, Listing, TrackId, TransferReceipt,
};
use std::collections::BTreeMap;

/// Outcome of a committed transfer set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransferOutcome {
    /// One receipt per applied transfer, in input order.
    pub receipts: Vec<TransferReceipt>,
    /// Listings removed by the handoff, as they were stored.
    pub cleared_listings: Vec<Listing>,
}

/// Pending ownership changes, validated but not yet applied.
#[derive(Debug)]
pub struct StagedTransfers<'a> {
    state: &'a LedgerState,
    overlay: BTreeMap<TrackId, Identity>,
    receipts: Vec<TransferReceipt>,
}

impl<'a> StagedTransfers<'a> {
    /// Start staging against the current state.
    pub fn new(state: &'a LedgerState) -> Self {
        Self {
            state,
            overlay: BTreeMap::new(),
            receipts: Vec::new(),
        }
    }

    /// Owner of `id` as seen after the transfers staged so far.
    fn owner_of(&self, id: TrackId) -> Result<Identity, LedgerError> {
        if let Some(owner) = self.overlay.get(&id) {
            return Ok(*owner);
        }
        Ok(lookup_track(self.state, id)?.owner)
    }

    /// Validate one transfer and stage it, returning its receipt.
    pub fn stage(
        &mut self,
        caller: &Identity,
        id: TrackId,
        new_owner: Identity,
    ) -> Result<TransferReceipt, LedgerError> {
        let record = lookup_track(self.state, id)?;
        let owner = self.owner_of(id)?;

        if *caller != owner {
            return Err(LedgerError::PermissionDenied(format!(
                "caller is not the owner of track {id}"
            )));
        }
        if !record.streamable {
            return Err(LedgerError::PermissionDenied(format!(
                "track {id} is not streamable"
            )));
        }
        if new_owner == *caller {
            return Err(LedgerError::PermissionDenied(format!(
                "self-transfer of track {id}"
            )));
        }

        let receipt = TransferReceipt {
            id,
            from: owner,
            to: new_owner,
        };
        self.overlay.insert(id, new_owner);
        self.receipts.push(receipt);
        Ok(receipt)
    }

    /// Freeze the staged changes so the state borrow can be released.
    pub fn into_plan(self) -> TransferPlan {
        TransferPlan {
            overlay: self.overlay,
            receipts: self.receipts,
        }
    }
}

/// A validated set of ownership changes ready to commit.
#[derive(Clone, Debug, Default)]
pub struct TransferPlan {
    overlay: BTreeMap<TrackId, Identity>,
    receipts: Vec<TransferReceipt>,
}

impl TransferPlan {
    /// Apply every staged change. Metadata and streamability are preserved.
    pub fn commit(self, state: &mut LedgerState, config: &LedgerConfig) -> TransferOutcome {
        let mut cleared_listings = Vec::new();
        for (id, new_owner) in self.overlay {
            if let Some(record) = state.tracks.get_mut(&id) {
                record.owner = new_owner;
            }
            if config.clear_listing_on_transfer {
                if let Some(listing) = state.listings.remove(&id) {
                    cleared_listings.push(listing);
                }
            }
        }
        TransferOutcome {
            receipts: self.receipts,
            cleared_listings,
        }
    }
}

/// Transfer one track from the caller to `new_owner`.
///
/// Returns the receipt and the listing the handoff removed, if any.
pub fn transfer(
    state: &mut LedgerState,
    config: &LedgerConfig,
    ctx: &CallContext,
    id: TrackId,
    new_owner: Identity,
) -> Result<(TransferReceipt, Option<Listing>), LedgerError> {
    let mut staged = StagedTransfers::new(state);
    let receipt = staged.stage(&ctx.caller, id, new_owner)?;
    let outcome = staged.into_plan().commit(state, config);
    Ok((receipt, outcome.cleared_listings.into_iter().next()))
}

/// Transfer a batch of tracks in order, all or none.
pub fn transfer_batch(
    state: &mut LedgerState,
    config: &LedgerConfig,
    ctx: &CallContext,
    ids: &[TrackId],
    new_owners: &[Identity],
) -> Result<TransferOutcome, LedgerError> {
    invariant_batch_shape(ids.len(), new_owners.len(), config)?;

    let mut staged = StagedTransfers::new(state);
    for (&id, &new_owner) in ids.iter().zip(new_owners) {
        staged.stage(&ctx.caller, id, new_owner)?;
    }
    let plan = staged.into_plan();
    Ok(plan.commit(state, config))
}
