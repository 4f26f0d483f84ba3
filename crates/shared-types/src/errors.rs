//! # Error Types
//!
//! Errors reported by the registry's external collaborators.

use thiserror::Error;

/// Errors from the persistence layer the registry state is flushed to.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// Stored bytes could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The store refused the write.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// An identity string that cannot name a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("principal must not be empty")]
pub struct InvalidPrincipal;

/// Errors from the payment collaborator that moves registration fees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// The payer could not cover the amount.
    #[error("Insufficient funds: {payer} cannot pay {amount}")]
    InsufficientFunds { payer: String, amount: u64 },

    /// The transfer was rejected by the payment rail.
    #[error("Transfer rejected: {0}")]
    Rejected(String),

    /// The payment rail could not be reached or recorded the transfer.
    #[error("Payment rail unavailable: {0}")]
    Unavailable(String),
}
