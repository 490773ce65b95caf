//! # Outbound Ports
//!
//! Traits for the host facilities the ledger consumes.

use crate::domain::{Identity, TransferError};

/// Value-transfer primitive - outbound port.
///
/// Used only by streaming settlement. A failed transfer must leave both
/// balances untouched. Implementations synchronize internally.
pub trait ValueTransfer: Send + Sync {
    /// Move `amount` from `from` to `to`.
    fn transfer(&self, amount: u64, from: &Identity, to: &Identity) -> Result<(), TransferError>;

    /// Current balance of `who`.
    fn balance_of(&self, who: &Identity) -> u64;
}
