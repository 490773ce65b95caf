//! # Adapters
//!
//! Implementations of the outbound ports.

pub mod balances;

pub use balances::InMemoryBalances;
