//! # Algorithms Module
//!
//! State transitions over [`LedgerState`](crate::domain::LedgerState).
//! Each function validates fully before its first write.

pub mod marketplace;
pub mod ownership;
pub mod profiles;
pub mod registry;
pub mod settlement;

pub use ownership::{StagedTransfers, TransferOutcome, TransferPlan};
