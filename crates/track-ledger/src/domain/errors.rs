//! # Domain Errors
//!
//! Error types for the Track Ledger.

use super::value_objects::TrackId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ledger error types.
///
/// Every failing operation returns one of these with zero state mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Caller lacks minting authority.
    #[error("Caller is not the issuer")]
    NotIssuer,

    /// Track id out of range, record absent, or no listing for the id.
    #[error("Track missing: {0}")]
    TrackMissing(TrackId),

    /// Caller failed an ownership, lister or self-transfer check.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Bounds violation (URI length, batch length, profile bounds).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Zero fee, non-owner lister, or non-streamable track at listing time.
    #[error("Invalid streaming fee")]
    InvalidStreamingFee,

    /// The value-transfer primitive refused the streaming payment.
    #[error("Payment failed: {0}")]
    PaymentFailed(#[from] TransferError),
}

/// Stable error codes for clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// See [`LedgerError::NotIssuer`].
    NotIssuer,
    /// See [`LedgerError::TrackMissing`].
    TrackMissing,
    /// See [`LedgerError::PermissionDenied`].
    PermissionDenied,
    /// See [`LedgerError::InvalidInput`].
    InvalidInput,
    /// See [`LedgerError::InvalidStreamingFee`].
    InvalidStreamingFee,
    /// See [`LedgerError::PaymentFailed`].
    PaymentFailed,
}

impl LedgerError {
    /// Get the stable error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotIssuer => ErrorKind::NotIssuer,
            Self::TrackMissing(_) => ErrorKind::TrackMissing,
            Self::PermissionDenied(_) => ErrorKind::PermissionDenied,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::InvalidStreamingFee => ErrorKind::InvalidStreamingFee,
            Self::PaymentFailed(_) => ErrorKind::PaymentFailed,
        }
    }
}

/// Errors raised by the value-transfer primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// Payer cannot cover the amount.
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// Amount requested
        required: u64,
        /// Payer balance
        available: u64,
    },

    /// Crediting the payee would overflow.
    #[error("Balance overflow")]
    Overflow,
}
