//! # Track Registry
//!
//! Append-only catalog of track records. Owns the id counter.

use crate::domain::{
    invariant_batch_shape, invariant_is_issuer, invariant_metadata_uri, CallContext,
    LedgerConfig, LedgerError, LedgerState, MintRequest, TrackId, TrackRecord,
};

/// Mint a single track owned by the issuer.
pub fn mint(
    state: &mut LedgerState,
    config: &LedgerConfig,
    ctx: &CallContext,
    request: MintRequest,
) -> Result<TrackRecord, LedgerError> {
    invariant_is_issuer(&ctx.caller, config)?;
    invariant_metadata_uri(&request.metadata_uri, config)?;
    next_id(state, 1)?;
    Ok(append(state, config, request))
}

/// Mint a batch of tracks, all or none.
///
/// Every element is validated before the first record is appended, so a
/// failure anywhere leaves the counter and registry untouched.
pub fn mint_batch(
    state: &mut LedgerState,
    config: &LedgerConfig,
    ctx: &CallContext,
    metadata_uris: &[String],
    streamables: &[bool],
) -> Result<Vec<TrackRecord>, LedgerError> {
    invariant_is_issuer(&ctx.caller, config)?;
    invariant_batch_shape(metadata_uris.len(), streamables.len(), config)?;
    for uri in metadata_uris {
        invariant_metadata_uri(uri, config)?;
    }
    next_id(state, metadata_uris.len() as u64)?;

    let mut records = Vec::with_capacity(metadata_uris.len());
    for (uri, &streamable) in metadata_uris.iter().zip(streamables) {
        records.push(append(state, config, MintRequest::new(uri.clone(), streamable)));
    }
    Ok(records)
}

/// Get a track by id. Ids past the counter read as absent.
pub fn lookup(state: &LedgerState, id: TrackId) -> Option<&TrackRecord> {
    if id > state.counter {
        return None;
    }
    state.tracks.get(&id)
}

/// Id the `count`-th next mint would receive, failing on counter overflow.
fn next_id(state: &LedgerState, count: u64) -> Result<TrackId, LedgerError> {
    state
        .counter
        .checked_add(count)
        .ok_or_else(|| LedgerError::InvalidInput("track counter overflow".to_string()))
}

/// Append a pre-validated record. Infallible.
fn append(state: &mut LedgerState, config: &LedgerConfig, request: MintRequest) -> TrackRecord {
    let id = state.counter + 1;
    let record = TrackRecord {
        id,
        owner: config.issuer,
        metadata_uri: request.metadata_uri,
        streamable: request.streamable,
    };
    state.tracks.insert(id, record.clone());
    state.counter = id;
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Identity;

    const ISSUER: Identity = Identity([1u8; 20]);
    const USER: Identity = Identity([2u8; 20]);

    fn setup() -> (LedgerState, LedgerConfig) {
        (LedgerState::new(), LedgerConfig::new(ISSUER))
    }

    fn uris(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("ipfs://track-{i}")).collect()
    }

    #[test]
    fn test_mint_assigns_sequential_ids() {
        let (mut state, config) = setup();
        let ctx = CallContext::new(ISSUER, 1);

        let first = mint(&mut state, &config, &ctx, MintRequest::new("ipfs://a", true)).unwrap();
        let second = mint(&mut state, &config, &ctx, MintRequest::new("ipfs://b", false)).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(state.counter, 2);
        assert_eq!(second.owner, ISSUER);
        assert!(!second.streamable);
    }

    #[test]
    fn test_mint_by_non_issuer_fails() {
        let (mut state, config) = setup();
        let ctx = CallContext::new(USER, 1);
        let err = mint(&mut state, &config, &ctx, MintRequest::new("ipfs://a", true)).unwrap_err();
        assert_eq!(err, LedgerError::NotIssuer);
        assert_eq!(state.counter, 0);
    }

    #[test]
    fn test_mint_invalid_uri_leaves_counter() {
        let (mut state, config) = setup();
        let ctx = CallContext::new(ISSUER, 1);

        for uri in [String::new(), "x".repeat(257)] {
            let err = mint(&mut state, &config, &ctx, MintRequest::new(uri, true)).unwrap_err();
            assert!(matches!(err, LedgerError::InvalidInput(_)));
        }
        assert_eq!(state.counter, 0);
        assert!(state.tracks.is_empty());
    }

    #[test]
    fn test_mint_batch_success() {
        let (mut state, config) = setup();
        let ctx = CallContext::new(ISSUER, 1);
        let records =
            mint_batch(&mut state, &config, &ctx, &uris(3), &[true, false, true]).unwrap();

        let ids: Vec<_> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(!records[1].streamable);
        assert_eq!(state.counter, 3);
    }

    #[test]
    fn test_mint_batch_bad_shape_creates_nothing() {
        let (mut state, config) = setup();
        let ctx = CallContext::new(ISSUER, 1);

        assert!(mint_batch(&mut state, &config, &ctx, &uris(2), &[true]).is_err());
        assert!(mint_batch(&mut state, &config, &ctx, &[], &[]).is_err());
        assert!(mint_batch(&mut state, &config, &ctx, &uris(11), &[true; 11]).is_err());
        assert_eq!(state.counter, 0);
    }

    #[test]
    fn test_mint_batch_one_bad_uri_rejects_all() {
        let (mut state, config) = setup();
        let ctx = CallContext::new(ISSUER, 1);
        let mut batch = uris(4);
        batch[3] = String::new();

        let err = mint_batch(&mut state, &config, &ctx, &batch, &[true; 4]).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));
        assert_eq!(state.counter, 0);
        assert!(state.tracks.is_empty());
    }

    #[test]
    fn test_lookup_respects_counter() {
        let (mut state, config) = setup();
        let ctx = CallContext::new(ISSUER, 1);
        mint(&mut state, &config, &ctx, MintRequest::new("ipfs://a", true)).unwrap();

        assert!(lookup(&state, 1).is_some());
        assert!(lookup(&state, 2).is_none());

        state.counter = 0;
        assert!(lookup(&state, 1).is_none());
    }

    #[test]
    fn test_counter_overflow_rejected() {
        let (mut state, config) = setup();
        state.counter = u64::MAX;
        let ctx = CallContext::new(ISSUER, 1);
        let err = mint(&mut state, &config, &ctx, MintRequest::new("ipfs://a", true)).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));
    }
}
