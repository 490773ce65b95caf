//! # Track Ledger Service
//!
//! Owns one ledger instance (state, configuration, value-transfer adapter)
//! and exposes it through [`TrackLedgerApi`].
//!
//! ## Call flow
//!
//! 1. Caller identity arrives in the [`CallContext`]
//! 2. Registry / marketplace lookups
//! 3. Authorization and bounds checks
//! 4. State mutation (preceded by payment for `stream`)
//! 5. Events buffered, stats updated
//!
//! The host runs one call at a time; `&mut self` on every mutating method
//! encodes that serialization.

use crate::algorithms::{marketplace, ownership, profiles, registry, settlement};
use crate::domain::{
    invariant_state_consistent, CallContext, Identity, LedgerConfig, LedgerError, LedgerState,
    Listing, MintRequest, Profile, StreamReceipt, TrackId, TrackRecord, TransferReceipt,
};
use crate::events::{DelistReason, EventEnvelope, LedgerEvent};
use crate::ports::{TrackLedgerApi, ValueTransfer};
use tracing::{debug, info, instrument, warn};

/// Counters for committed and rejected calls.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LedgerStats {
    /// Tracks minted (single and batch).
    pub tracks_minted: u64,
    /// Ownership changes applied by transfer calls.
    pub transfers: u64,
    /// Listings created or overwritten.
    pub listings: u64,
    /// Listings removed by delist or by transfer.
    pub delistings: u64,
    /// Streams settled.
    pub streams: u64,
    /// Profile overwrites.
    pub profile_updates: u64,
    /// Calls that returned an error.
    pub rejected_calls: u64,
    /// Sum of fees moved by streams.
    pub total_fees_settled: u128,
}

/// The Track Ledger.
pub struct TrackLedgerService<T: ValueTransfer> {
    config: LedgerConfig,
    state: LedgerState,
    payments: T,
    events: Vec<EventEnvelope>,
    next_event_index: u64,
    stats: LedgerStats,
}

impl<T: ValueTransfer> TrackLedgerService<T> {
    /// Create a ledger with empty state: counter 0, no tracks, listings
    /// or profiles.
    pub fn new(config: LedgerConfig, payments: T) -> Result<Self, LedgerError> {
        Self::from_snapshot(config, LedgerState::new(), payments)
    }

    /// Restore a ledger from a state snapshot.
    pub fn from_snapshot(
        config: LedgerConfig,
        state: LedgerState,
        payments: T,
    ) -> Result<Self, LedgerError> {
        config.validate()?;
        invariant_state_consistent(&state)?;
        info!(
            issuer = %config.issuer,
            tracks = state.counter,
            listings = state.listings.len(),
            "Track ledger initialized"
        );
        Ok(Self {
            config,
            state,
            payments,
            events: Vec::new(),
            next_event_index: 0,
            stats: LedgerStats::default(),
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Copy of the full ledger state.
    pub fn snapshot(&self) -> LedgerState {
        self.state.clone()
    }

    /// Current statistics.
    pub fn stats(&self) -> &LedgerStats {
        &self.stats
    }

    /// The value-transfer adapter.
    pub fn payments(&self) -> &T {
        &self.payments
    }

    /// Take all buffered events, oldest first.
    pub fn drain_events(&mut self) -> Vec<EventEnvelope> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, ctx: &CallContext, event: LedgerEvent) {
        debug!(topic = event.topic(), index = self.next_event_index, "Event emitted");
        self.events.push(EventEnvelope {
            index: self.next_event_index,
            block_height: ctx.block_height,
            caller: ctx.caller,
            event,
        });
        self.next_event_index += 1;
    }

    fn reject<R>(
        &mut self,
        op: &'static str,
        result: Result<R, LedgerError>,
    ) -> Result<R, LedgerError> {
        if let Err(e) = &result {
            self.stats.rejected_calls += 1;
            warn!(op, kind = ?e.kind(), error = %e, "Call rejected");
        }
        result
    }

    fn record_transfers(
        &mut self,
        ctx: &CallContext,
        receipts: &[TransferReceipt],
        cleared_listings: impl IntoIterator<Item = Listing>,
    ) {
        for receipt in receipts {
            info!(id = receipt.id, from = %receipt.from, to = %receipt.to, "Track transferred");
            self.emit(
                ctx,
                LedgerEvent::TrackTransferred {
                    id: receipt.id,
                    from: receipt.from,
                    to: receipt.to,
                },
            );
        }
        for listing in cleared_listings {
            debug!(id = listing.id, lister = %listing.lister, "Listing cleared by transfer");
            self.emit(
                ctx,
                LedgerEvent::TrackDelisted {
                    id: listing.id,
                    lister: listing.lister,
                    reason: DelistReason::Transferred,
                },
            );
            self.stats.delistings += 1;
        }
        self.stats.transfers += receipts.len() as u64;
    }
}

impl<T: ValueTransfer> TrackLedgerApi for TrackLedgerService<T> {
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    fn mint(
        &mut self,
        ctx: &CallContext,
        metadata_uri: &str,
        streamable: bool,
    ) -> Result<TrackId, LedgerError> {
        let result = registry::mint(
            &mut self.state,
            &self.config,
            ctx,
            MintRequest::new(metadata_uri, streamable),
        );
        let track = self.reject("mint", result)?;

        info!(id = track.id, streamable, "Track minted");
        let id = track.id;
        self.emit(ctx, LedgerEvent::TrackMinted { track });
        self.stats.tracks_minted += 1;
        Ok(id)
    }

    #[instrument(
        skip(self, ctx, metadata_uris, streamables),
        fields(caller = %ctx.caller, len = metadata_uris.len())
    )]
    fn mint_batch(
        &mut self,
        ctx: &CallContext,
        metadata_uris: &[String],
        streamables: &[bool],
    ) -> Result<Vec<TrackId>, LedgerError> {
        let result = registry::mint_batch(
            &mut self.state,
            &self.config,
            ctx,
            metadata_uris,
            streamables,
        );
        let tracks = self.reject("mint_batch", result)?;

        let ids: Vec<TrackId> = tracks.iter().map(|t| t.id).collect();
        info!(?ids, "Track batch minted");
        self.stats.tracks_minted += tracks.len() as u64;
        for track in tracks {
            self.emit(ctx, LedgerEvent::TrackMinted { track });
        }
        Ok(ids)
    }

    #[instrument(skip(self, ctx, new_owner), fields(caller = %ctx.caller, new_owner = %new_owner))]
    fn transfer(
        &mut self,
        ctx: &CallContext,
        id: TrackId,
        new_owner: Identity,
    ) -> Result<TransferReceipt, LedgerError> {
        let result = ownership::transfer(&mut self.state, &self.config, ctx, id, new_owner);
        let (receipt, cleared) = self.reject("transfer", result)?;

        self.record_transfers(ctx, std::slice::from_ref(&receipt), cleared);
        Ok(receipt)
    }

    #[instrument(skip(self, ctx, ids, new_owners), fields(caller = %ctx.caller, len = ids.len()))]
    fn transfer_batch(
        &mut self,
        ctx: &CallContext,
        ids: &[TrackId],
        new_owners: &[Identity],
    ) -> Result<Vec<TransferReceipt>, LedgerError> {
        let result =
            ownership::transfer_batch(&mut self.state, &self.config, ctx, ids, new_owners);
        let outcome = self.reject("transfer_batch", result)?;
        self.record_transfers(ctx, &outcome.receipts, outcome.cleared_listings);
        Ok(outcome.receipts)
    }

    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    fn list_for_streaming(
        &mut self,
        ctx: &CallContext,
        id: TrackId,
        fee: u64,
    ) -> Result<(), LedgerError> {
        let result = marketplace::list_for_streaming(&mut self.state, ctx, id, fee);
        let listing = self.reject("list_for_streaming", result)?;

        info!(id, fee, listed_at = listing.listed_at, "Track listed");
        self.emit(ctx, LedgerEvent::TrackListed { listing });
        self.stats.listings += 1;
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    fn delist(&mut self, ctx: &CallContext, id: TrackId) -> Result<(), LedgerError> {
        let result = marketplace::delist(&mut self.state, ctx, id);
        let listing = self.reject("delist", result)?;

        info!(id, "Track delisted");
        self.emit(
            ctx,
            LedgerEvent::TrackDelisted {
                id,
                lister: listing.lister,
                reason: DelistReason::Lister,
            },
        );
        self.stats.delistings += 1;
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    fn stream(&mut self, ctx: &CallContext, id: TrackId) -> Result<StreamReceipt, LedgerError> {
        let result = settlement::stream(&mut self.state, &self.payments, ctx, id);
        let receipt = self.reject("stream", result)?;

        info!(
            id,
            seller = %receipt.seller,
            streamer = %receipt.streamer,
            fee = receipt.fee,
            "Track streamed"
        );
        self.emit(
            ctx,
            LedgerEvent::TrackStreamed {
                id,
                seller: receipt.seller,
                streamer: receipt.streamer,
                fee: receipt.fee,
            },
        );
        self.stats.streams += 1;
        self.stats.total_fees_settled += u128::from(receipt.fee);
        Ok(receipt)
    }

    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    fn update_profile(
        &mut self,
        ctx: &CallContext,
        fan_count: u32,
        fame_level: u32,
    ) -> Result<(), LedgerError> {
        let result =
            profiles::update_profile(&mut self.state, &self.config, ctx, fan_count, fame_level);
        let profile = self.reject("update_profile", result)?;

        debug!(fan_count, fame_level, "Profile updated");
        self.emit(
            ctx,
            LedgerEvent::ProfileUpdated {
                who: ctx.caller,
                profile,
            },
        );
        self.stats.profile_updates += 1;
        Ok(())
    }

    fn get_track(&self, id: TrackId) -> Option<&TrackRecord> {
        registry::lookup(&self.state, id)
    }

    fn get_listing(&self, id: TrackId) -> Option<&Listing> {
        marketplace::listing(&self.state, id)
    }

    fn get_profile(&self, who: &Identity) -> Option<&Profile> {
        profiles::profile(&self.state, who)
    }

    fn get_total_tracks(&self) -> u64 {
        self.state.counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryBalances;
    use crate::domain::ErrorKind;

    const ISSUER: Identity = Identity([1u8; 20]);
    const FAN: Identity = Identity([2u8; 20]);

    fn create_test_service() -> TrackLedgerService<InMemoryBalances> {
        TrackLedgerService::new(LedgerConfig::new(ISSUER), InMemoryBalances::new()).unwrap()
    }

    fn issuer(height: u64) -> CallContext {
        CallContext::new(ISSUER, height)
    }

    #[test]
    fn test_mint_increments_counter_and_emits() {
        let mut ledger = create_test_service();
        let before = ledger.get_total_tracks();
        let id = ledger.mint(&issuer(1), "ipfs://a", true).unwrap();

        assert_eq!(id, before + 1);
        assert_eq!(ledger.get_total_tracks(), before + 1);
        let events = ledger.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].index, 0);
        assert!(matches!(events[0].event, LedgerEvent::TrackMinted { .. }));
        assert!(ledger.drain_events().is_empty());
    }

    #[test]
    fn test_rejected_call_counts_and_emits_nothing() {
        let mut ledger = create_test_service();
        let err = ledger
            .mint(&CallContext::new(FAN, 1), "ipfs://a", true)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotIssuer);
        assert_eq!(ledger.stats().rejected_calls, 1);
        assert!(ledger.drain_events().is_empty());
        assert_eq!(ledger.get_total_tracks(), 0);
    }

    #[test]
    fn test_transfer_of_listed_track_emits_delist() {
        let mut ledger = create_test_service();
        ledger.mint(&issuer(1), "ipfs://a", true).unwrap();
        ledger.list_for_streaming(&issuer(2), 1, 100).unwrap();
        ledger.drain_events();

        ledger.transfer(&issuer(3), 1, FAN).unwrap();
        let events = ledger.drain_events();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[1].event,
            LedgerEvent::TrackDelisted {
                id: 1,
                lister: ISSUER,
                reason: DelistReason::Transferred
            }
        );
        assert!(ledger.get_listing(1).is_none());
        assert_eq!(ledger.stats().delistings, 1);
    }

    #[test]
    fn test_stream_updates_stats() {
        let mut ledger = create_test_service();
        ledger.payments().credit(&FAN, 500);
        ledger.mint(&issuer(1), "ipfs://a", true).unwrap();
        ledger.list_for_streaming(&issuer(2), 1, 120).unwrap();

        ledger.stream(&CallContext::new(FAN, 3), 1).unwrap();
        assert_eq!(ledger.stats().streams, 1);
        assert_eq!(ledger.stats().total_fees_settled, 120);
        assert_eq!(ledger.payments().balance_of(&ISSUER), 120);
    }

    #[test]
    fn test_event_indices_are_sequential() {
        let mut ledger = create_test_service();
        ledger
            .mint_batch(
                &issuer(1),
                &["ipfs://a".to_string(), "ipfs://b".to_string()],
                &[true, true],
            )
            .unwrap();
        ledger.update_profile(&issuer(2), 1, 1).unwrap();

        let indices: Vec<u64> = ledger.drain_events().iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_from_snapshot_rejects_inconsistent_state() {
        let mut state = LedgerState::new();
        state.listings.insert(
            4,
            Listing {
                id: 4,
                lister: ISSUER,
                fee: 1,
                listed_at: 0,
            },
        );
        let result = TrackLedgerService::from_snapshot(
            LedgerConfig::new(ISSUER),
            state,
            InMemoryBalances::new(),
        );
        assert!(result.is_err());
    }

    /// One streamable and one locked track, with track 1 listed.
    fn valid_snapshot() -> LedgerState {
        let mut state = LedgerState::new();
        for (id, streamable) in [(1, true), (2, false)] {
            state.tracks.insert(
                id,
                TrackRecord {
                    id,
                    owner: ISSUER,
                    metadata_uri: format!("ipfs://{id}"),
                    streamable,
                },
            );
        }
        state.counter = 2;
        state.listings.insert(
            1,
            Listing {
                id: 1,
                lister: ISSUER,
                fee: 10,
                listed_at: 1,
            },
        );
        state
    }

    fn restore(state: LedgerState) -> Result<TrackLedgerService<InMemoryBalances>, LedgerError> {
        TrackLedgerService::from_snapshot(
            LedgerConfig::new(ISSUER),
            state,
            InMemoryBalances::new(),
        )
    }

    #[test]
    fn test_from_snapshot_accepts_valid_state() {
        let ledger = restore(valid_snapshot()).unwrap();
        assert_eq!(ledger.get_total_tracks(), 2);
        assert_eq!(ledger.get_listing(1).unwrap().fee, 10);
    }

    #[test]
    fn test_from_snapshot_rejects_counter_past_tracks() {
        let mut state = valid_snapshot();
        state.counter = 5;
        assert_eq!(restore(state).err().map(|e| e.kind()), Some(ErrorKind::InvalidInput));
    }

    #[test]
    fn test_from_snapshot_rejects_missing_id() {
        let mut state = valid_snapshot();
        let moved = state.tracks.remove(&2).unwrap();
        state.tracks.insert(3, TrackRecord { id: 3, ..moved });
        assert!(restore(state).is_err());
    }

    #[test]
    fn test_from_snapshot_rejects_zero_fee_listing() {
        let mut state = valid_snapshot();
        state.listings.get_mut(&1).unwrap().fee = 0;
        assert!(restore(state).is_err());
    }

    #[test]
    fn test_from_snapshot_rejects_listing_on_locked_track() {
        let mut state = valid_snapshot();
        state.listings.insert(
            2,
            Listing {
                id: 2,
                lister: ISSUER,
                fee: 10,
                listed_at: 1,
            },
        );
        assert!(restore(state).is_err());
    }

    #[test]
    fn test_transfer_delist_event_names_recorded_lister() {
        let alice = Identity::new([0xA1; 20]);
        // Stale listing: issuer listed track 1, then it moved to alice
        let mut state = valid_snapshot();
        state.tracks.get_mut(&1).unwrap().owner = alice;
        let mut ledger = restore(state).unwrap();

        ledger.transfer(&CallContext::new(alice, 3), 1, FAN).unwrap();
        let events = ledger.drain_events();
        assert_eq!(
            events[1].event,
            LedgerEvent::TrackDelisted {
                id: 1,
                lister: ISSUER,
                reason: DelistReason::Transferred
            }
        );
        assert!(ledger.get_listing(1).is_none());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = LedgerConfig::new(ISSUER);
        config.max_batch_size = 0;
        assert!(TrackLedgerService::new(config, InMemoryBalances::new()).is_err());
    }
}
