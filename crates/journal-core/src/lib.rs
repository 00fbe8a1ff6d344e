//! # Journal Core
//!
//! Core library for Journal - a plain-text, human-readable double-entry
//! bookkeeping ledger.
//!
//! This crate provides the ledger text format and the domain logic,
//! independent of the CLI interface:
//!
//! - **types**: the journal/page/entry model and the debit/credit and
//!   currency enumerations
//! - **entry**: the single-line entry grammar (parse and canonical form)
//! - **format**: the whole-file codec (decode text into a [`Journal`],
//!   encode a [`Journal`] back to text)
//! - **transaction**: balanced debit/credit pair construction
//! - **fs**: atomic whole-file overwrite helper
//!
//! The core performs no prompting and no raw file I/O of its own beyond
//! [`fs::save_atomic`]; callers hand it whole-file text and get whole-file
//! text back.

pub mod entry;
pub mod error;
pub mod format;
pub mod fs;
pub mod transaction;
pub mod types;

pub use error::{JournalError, Result};
pub use transaction::NewTransaction;
pub use types::{Currency, Entry, Journal, Page, TransactionType};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
