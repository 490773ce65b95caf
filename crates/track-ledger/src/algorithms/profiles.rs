//! # Profile Store
//!
//! Per-identity reputation counters. Unrelated to tracks.

use crate::domain::{
    invariant_profile_bounds, CallContext, Identity, LedgerConfig, LedgerError, LedgerState,
    Profile,
};

/// Overwrite the caller's profile.
pub fn update_profile(
    state: &mut LedgerState,
    config: &LedgerConfig,
    ctx: &CallContext,
    fan_count: u32,
    fame_level: u32,
) -> Result<Profile, LedgerError> {
    invariant_profile_bounds(fan_count, fame_level, config)?;
    let profile = Profile {
        fan_count,
        fame_level,
    };
    state.profiles.insert(ctx.caller, profile);
    Ok(profile)
}

/// Get an identity's profile.
pub fn profile<'a>(state: &'a LedgerState, who: &Identity) -> Option<&'a Profile> {
    state.profiles.get(who)
}
