//! # Domain Invariants
//!
//! Bounds and authorization rules shared by every ledger operation.

use super::entities::{LedgerConfig, LedgerState, TrackRecord};
use super::errors::LedgerError;
use super::value_objects::{Identity, TrackId};

/// Invariant: only the issuer mints.
pub fn invariant_is_issuer(caller: &Identity, config: &LedgerConfig) -> Result<(), LedgerError> {
    if *caller != config.issuer {
        return Err(LedgerError::NotIssuer);
    }
    Ok(())
}

/// Invariant: `1 <= len(metadata_uri) <= max_metadata_uri_len`.
///
/// Length is counted in characters, not bytes.
pub fn invariant_metadata_uri(uri: &str, config: &LedgerConfig) -> Result<(), LedgerError> {
    let len = uri.chars().count();
    if len == 0 || len > config.max_metadata_uri_len {
        return Err(LedgerError::InvalidInput(format!(
            "metadata_uri length {len} not in [1, {}]",
            config.max_metadata_uri_len
        )));
    }
    Ok(())
}

/// Invariant: batch inputs have equal length in `[1, max_batch_size]`.
pub fn invariant_batch_shape(
    left: usize,
    right: usize,
    config: &LedgerConfig,
) -> Result<(), LedgerError> {
    if left != right {
        return Err(LedgerError::InvalidInput(format!(
            "batch length mismatch: {left} != {right}"
        )));
    }
    if left == 0 || left > config.max_batch_size {
        return Err(LedgerError::InvalidInput(format!(
            "batch length {left} not in [1, {}]",
            config.max_batch_size
        )));
    }
    Ok(())
}

/// Invariant: a track id is only valid up to the counter.
///
/// Anything past the counter reads as missing, regardless of map contents.
pub fn lookup_track(state: &LedgerState, id: TrackId) -> Result<&TrackRecord, LedgerError> {
    if id > state.counter {
        return Err(LedgerError::TrackMissing(id));
    }
    state.tracks.get(&id).ok_or(LedgerError::TrackMissing(id))
}

/// Invariant: profile counters stay within configured bounds.
pub fn invariant_profile_bounds(
    fan_count: u32,
    fame_level: u32,
    config: &LedgerConfig,
) -> Result<(), LedgerError> {
    if fan_count > config.max_fan_count {
        return Err(LedgerError::InvalidInput(format!(
            "fan_count {fan_count} > {}",
            config.max_fan_count
        )));
    }
    if fame_level > config.max_fame_level {
        return Err(LedgerError::InvalidInput(format!(
            "fame_level {fame_level} > {}",
            config.max_fame_level
        )));
    }
    Ok(())
}

/// Invariant: the registry holds exactly the ids `1..=counter`, keyed
/// consistently, and every listing has a positive fee on a known
/// streamable track.
pub fn invariant_state_consistent(state: &LedgerState) -> Result<(), LedgerError> {
    if state.tracks.len() as u64 != state.counter {
        return Err(LedgerError::InvalidInput(format!(
            "counter {} does not match {} stored tracks",
            state.counter,
            state.tracks.len()
        )));
    }
    for id in 1..=state.counter {
        match state.tracks.get(&id) {
            Some(track) if track.id == id => {}
            _ => {
                return Err(LedgerError::InvalidInput(format!(
                    "track {id} missing or mis-keyed under counter {}",
                    state.counter
                )));
            }
        }
    }
    for (key, listing) in &state.listings {
        let track = match state.tracks.get(key) {
            Some(track) if *key == listing.id => track,
            _ => {
                return Err(LedgerError::InvalidInput(format!(
                    "listing {key} refers to unknown track"
                )));
            }
        };
        if listing.fee == 0 {
            return Err(LedgerError::InvalidInput(format!(
                "listing {key} has zero fee"
            )));
        }
        if !track.streamable {
            return Err(LedgerError::InvalidInput(format!(
                "listing {key} is on a non-streamable track"
            )));
        }
    }
    Ok(())
}
