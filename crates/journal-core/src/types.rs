//! Core data types for the ledger model.
//!
//! A [`Journal`] is an ordered sequence of numbered pages; a [`Page`] is an
//! ordered sequence of entries; an [`Entry`] is one leg of a double-entry
//! transaction. Entries are immutable once created, and a journal is only
//! ever mutated by appending balanced pairs to its last page.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::JournalError;

/// Debit or credit side of a transaction.
///
/// Serialized as the abbreviation `Dr`/`Cr`. Parsing accepts the
/// case-insensitive aliases `dr`, `cr`, `debit`, and `credit`; raw alias
/// strings never travel past the grammar boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Debit,
    Credit,
}

impl TransactionType {
    /// The opposing side. Every debit is balanced by a credit and
    /// vice versa.
    pub fn invert(self) -> Self {
        match self {
            TransactionType::Debit => TransactionType::Credit,
            TransactionType::Credit => TransactionType::Debit,
        }
    }

    /// Canonical serialized form.
    pub fn abbreviation(self) -> &'static str {
        match self {
            TransactionType::Debit => "Dr",
            TransactionType::Credit => "Cr",
        }
    }
}

impl FromStr for TransactionType {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dr" | "debit" => Ok(TransactionType::Debit),
            "cr" | "credit" => Ok(TransactionType::Credit),
            _ => Err(JournalError::InvalidTransactionType(s.to_string())),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Invert a raw alias string without going through the enum first.
///
/// Useful at boundaries that still hold user-supplied text. Unlike
/// [`TransactionType::invert`], this can fail: the input must normalize to a
/// recognized transaction type.
///
/// # Errors
///
/// Returns [`JournalError::InvalidTransactionInversion`] if `value` matches
/// no recognized alias.
pub fn invert_alias(value: &str) -> crate::error::Result<TransactionType> {
    value
        .parse::<TransactionType>()
        .map(TransactionType::invert)
        .map_err(|_| JournalError::InvalidTransactionInversion(value.to_string()))
}

/// Currency code set. Extensible; only USD at present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    Usd,
}

impl Currency {
    /// Canonical lowercase code.
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "usd",
        }
    }
}

impl FromStr for Currency {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "usd" => Ok(Currency::Usd),
            _ => Err(JournalError::InvalidCurrency(s.to_string())),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One leg of a double-entry transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique-per-journal identifier, `{abbreviation}-{page}-{index}`.
    pub reference: String,

    /// Caller-supplied date string; opaque to the core (no calendar
    /// validation).
    pub date: String,

    /// Free-text account name. May contain internal spaces.
    pub account: String,

    /// Non-negative amount in the smallest currency unit.
    pub amount: u64,

    /// Debit or credit.
    pub kind: TransactionType,

    /// Currency of the amount.
    pub currency: Currency,

    /// Optional free-text description.
    pub description: Option<String>,

    /// Optional ledger page number this entry has been posted to.
    pub post_reference: Option<u32>,
}

/// An ordered, numbered group of entries within a journal.
pub type Page = Vec<Entry>;

/// The full ledger: a title, abbreviation, and ordered sequence of pages.
///
/// Invariant: `pages` is never empty; an empty journal has exactly one
/// empty page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    /// Highest page number seen or declared.
    pub page_count: u32,

    /// Journal title.
    pub name: String,

    /// Short code used in generated entry references.
    pub abbreviation: String,

    /// Pages in ascending page-number order, starting at 1.
    pub pages: Vec<Page>,
}

impl Journal {
    /// Create a fresh journal with a single empty page.
    ///
    /// Encoding it produces the two-line minimal file: the header line and
    /// `Page 1`.
    pub fn new(name: impl Into<String>, abbreviation: impl Into<String>) -> Self {
        Journal {
            page_count: 1,
            name: name.into(),
            abbreviation: abbreviation.into(),
            pages: vec![Page::new()],
        }
    }

    /// Total number of entries across all pages.
    pub fn entry_count(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }
}
