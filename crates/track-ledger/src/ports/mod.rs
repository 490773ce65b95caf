//! # Ports Module
//!
//! Inbound (API) and outbound (value transfer) interfaces.

pub mod inbound;
pub mod outbound;

pub use inbound::TrackLedgerApi;
pub use outbound::ValueTransfer;
