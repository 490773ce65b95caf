//! # Track Ledger
//!
//! Deterministic ledger for music-track ownership with an escrow-free
//! streaming-rights marketplace and per-owner reputation profiles.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - Issuer-only minting of sequentially numbered track records
//! - Owner-driven transfers, single or batched (all or none)
//! - Fee listings on streamable tracks; streaming pays the lister and hands
//!   ownership to the streamer in one unit
//! - Bounded reputation profiles per identity
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | `1 <= id <= counter`, ids never reused | `algorithms/registry.rs` |
//! | `1 <= len(metadata_uri) <= 256` | `domain/invariants.rs` |
//! | Batches of `1..=10`, equal-length inputs | `domain/invariants.rs` |
//! | Non-streamable tracks never move or list | `algorithms/ownership.rs`, `marketplace.rs` |
//! | Payment before ownership change | `algorithms/settlement.rs` |
//! | Failed call leaves no trace | every `algorithms/` function validates before writing |
//!
//! ## Module Structure
//!
//! ```text
//! track-ledger/
//! ├── domain/          # Identity, TrackRecord, Listing, Profile, errors
//! ├── algorithms/      # registry, ownership, marketplace, settlement, profiles
//! ├── ports/           # TrackLedgerApi, ValueTransfer
//! ├── adapters/        # InMemoryBalances
//! ├── events.rs        # LedgerEvent, EventEnvelope
//! ├── service.rs       # TrackLedgerService
//! └── logging.rs       # tracing-subscriber setup
//! ```
//!
//! ## Usage Example
//!
//! ```
//! use track_ledger::prelude::*;
//!
//! let issuer = Identity::new([1u8; 20]);
//! let fan = Identity::new([2u8; 20]);
//!
//! let balances = InMemoryBalances::new();
//! balances.credit(&fan, 500);
//! let mut ledger = TrackLedgerService::new(LedgerConfig::new(issuer), balances).unwrap();
//!
//! let id = ledger.mint(&CallContext::new(issuer, 1), "ipfs://track", true).unwrap();
//! ledger.list_for_streaming(&CallContext::new(issuer, 2), id, 100).unwrap();
//! ledger.stream(&CallContext::new(fan, 3), id).unwrap();
//!
//! assert_eq!(ledger.get_track(id).unwrap().owner, fan);
//! assert_eq!(ledger.payments().balance_of(&issuer), 100);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod events;
pub mod logging;
pub mod ports;
pub mod service;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::adapters::InMemoryBalances;
    pub use crate::domain::{
        CallContext, ErrorKind, Identity, LedgerConfig, LedgerError, LedgerState, Listing,
        Profile, StreamReceipt, TrackId, TrackRecord, TransferError, TransferReceipt,
    };
    pub use crate::events::{DelistReason, EventEnvelope, LedgerEvent};
    pub use crate::logging::{init_tracing, LoggingConfig};
    pub use crate::ports::{TrackLedgerApi, ValueTransfer};
    pub use crate::service::{LedgerStats, TrackLedgerService};
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    #[allow(clippy::const_is_empty)]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
