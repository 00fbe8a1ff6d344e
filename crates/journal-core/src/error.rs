//! Error types for journal core operations.
//!
//! Parsing and validation failures are surfaced to the caller as typed
//! errors; nothing is swallowed or retried. The core performs no logging:
//! user-facing reporting belongs to the CLI layer.

use thiserror::Error;

/// Result type alias for journal operations.
pub type Result<T> = std::result::Result<T, JournalError>;

/// Core error type for journal operations.
#[derive(Debug, Error)]
pub enum JournalError {
    /// Journal header or page header line does not match the grammar.
    /// Fatal to decode; no partial journal is returned.
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    /// An entry line has no recognizable Dr/Cr type marker, so the
    /// account name never terminates.
    #[error("Account name does not end: {0}")]
    UnterminatedAccount(String),

    /// A transaction type token matches none of the recognized aliases
    /// (Dr, Cr, Debit, Credit).
    #[error("Invalid transaction type: {0}")]
    InvalidTransactionType(String),

    /// A currency token matches no recognized currency code.
    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),

    /// Inversion was attempted on a value that is not a recognized
    /// transaction type.
    #[error("Cannot invert value that is not a transaction type: {0}")]
    InvalidTransactionInversion(String),

    /// The token after a `Pr:` marker is not an integer.
    #[error("Invalid post reference: {0}")]
    InvalidPostReference(String),

    /// Both sides of a transaction name the same account.
    #[error("Transaction debits and credits the same account: {0}")]
    DuplicateAccount(String),

    /// Filesystem error from the atomic save helper.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
