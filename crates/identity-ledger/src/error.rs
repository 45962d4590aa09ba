//! Error types for the identity ledgers.
//!
//! Every store operation reports a distinguishable kind so callers can
//! branch on it. A failed operation never leaves a partial mutation behind.

use crate::address::Address;
use crate::auth::Role;

/// Ledger error types covering all operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Unauthorized: {caller} does not hold the {role} role")]
    Unauthorized { caller: Address, role: Role },

    #[error("Record already exists for {0}")]
    AlreadyExists(Address),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Subject has no identity record: {0}")]
    SubjectNotFound(Address),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, LedgerError>;
