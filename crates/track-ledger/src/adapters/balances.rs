//! In-Memory Balances Adapter
//!
//! Implements the `ValueTransfer` port over a plain balance map.
//! Hosts with a real value layer plug in their own adapter.

use crate::domain::{Identity, TransferError};
use crate::ports::outbound::ValueTransfer;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// In-memory balance book.
#[derive(Debug, Default)]
pub struct InMemoryBalances {
    balances: RwLock<HashMap<Identity, u64>>,
}

impl InMemoryBalances {
    /// Create an empty balance book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to `who`, saturating at `u64::MAX`.
    pub fn credit(&self, who: &Identity, amount: u64) {
        let mut balances = self.balances.write();
        let balance = balances.entry(*who).or_insert(0);
        *balance = balance.saturating_add(amount);
    }
}

impl ValueTransfer for InMemoryBalances {
    fn transfer(&self, amount: u64, from: &Identity, to: &Identity) -> Result<(), TransferError> {
        let mut balances = self.balances.write();

        let available = balances.get(from).copied().unwrap_or(0);
        if available < amount {
            return Err(TransferError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        if from == to {
            return Ok(());
        }
        let credited = balances
            .get(to)
            .copied()
            .unwrap_or(0)
            .checked_add(amount)
            .ok_or(TransferError::Overflow)?;

        balances.insert(*from, available - amount);
        balances.insert(*to, credited);

        debug!(%from, %to, amount, "Value transferred");
        Ok(())
    }

    fn balance_of(&self, who: &Identity) -> u64 {
        self.balances.read().get(who).copied().unwrap_or(0)
    }
}
