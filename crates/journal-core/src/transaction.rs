//! Balanced transaction construction.
//!
//! Every transaction is exactly one matched debit/credit pair: same amount
//! and currency, opposite type, appended atomically (both entries or
//! neither) to the journal's last page.

use crate::error::{JournalError, Result};
use crate::types::{Currency, Entry, Journal, Page, TransactionType};

/// Input for one balanced transaction.
///
/// `account` takes `kind`; `offset_account` takes the inverted kind. The
/// optional description and post reference are shared by both legs.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub date: String,
    pub account: String,
    pub offset_account: String,
    pub amount: u64,
    pub kind: TransactionType,
    pub currency: Currency,
    pub description: Option<String>,
    pub post_reference: Option<u32>,
}

impl NewTransaction {
    pub fn new(
        date: impl Into<String>,
        account: impl Into<String>,
        offset_account: impl Into<String>,
        amount: u64,
        kind: TransactionType,
        currency: Currency,
    ) -> Self {
        Self {
            date: date.into(),
            account: account.into(),
            offset_account: offset_account.into(),
            amount,
            kind,
            currency,
            description: None,
            post_reference: None,
        }
    }

    /// Attach a description; blank text is treated as absent.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = if description.trim().is_empty() {
            None
        } else {
            Some(description)
        };
        self
    }

    pub fn with_post_reference(mut self, post_reference: u32) -> Self {
        self.post_reference = Some(post_reference);
        self
    }
}

impl Journal {
    /// Append one balanced debit/credit pair to the last page.
    ///
    /// The two entries receive sequential references
    /// `{abbreviation}-{page_count}-{k+1}` and `{abbreviation}-{page_count}-{k+2}`,
    /// where `k` is the number of entries already on the last page. Returns
    /// the two references in entry order.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::DuplicateAccount`] when both sides name the
    /// same account (case-insensitive). The journal is left untouched on
    /// error.
    pub fn append_transaction(&mut self, transaction: NewTransaction) -> Result<[String; 2]> {
        if transaction
            .account
            .eq_ignore_ascii_case(&transaction.offset_account)
        {
            return Err(JournalError::DuplicateAccount(transaction.account));
        }

        // Uphold the at-least-one-page invariant for hand-built journals.
        if self.pages.is_empty() {
            self.pages.push(Page::new());
        }
        let last = self.pages.len() - 1;
        let occupied = self.pages[last].len();

        let first_reference = self.entry_reference(occupied + 1);
        let second_reference = self.entry_reference(occupied + 2);

        let first = Entry {
            reference: first_reference.clone(),
            date: transaction.date.clone(),
            account: transaction.account,
            amount: transaction.amount,
            kind: transaction.kind,
            currency: transaction.currency,
            description: transaction.description.clone(),
            post_reference: transaction.post_reference,
        };
        let second = Entry {
            reference: second_reference.clone(),
            date: transaction.date,
            account: transaction.offset_account,
            amount: transaction.amount,
            kind: transaction.kind.invert(),
            currency: transaction.currency,
            description: transaction.description,
            post_reference: transaction.post_reference,
        };

        self.pages[last].push(first);
        self.pages[last].push(second);

        Ok([first_reference, second_reference])
    }

    fn entry_reference(&self, index_in_page: usize) -> String {
        format!("{}-{}-{}", self.abbreviation, self.page_count, index_in_page)
    }
}
