//! Entry line grammar.
//!
//! One entry occupies one line of space-separated tokens:
//!
//! ```text
//! <reference> <date> <account...> <Dr|Cr> <amount> <currency> [Pr:<n>] [Description: <text>]
//! ```
//!
//! The account name may contain spaces, so the scanner accumulates tokens
//! into the account until it sees a type marker (`Dr`/`Cr`, case-insensitive)
//! immediately followed by an all-digit amount token. The first such pair
//! wins. An account name that itself contains a standalone `Dr`/`Cr` token
//! followed by a numeric-looking word is indistinguishable from the marker;
//! that is a known limitation of the format, not resolved here.

use std::fmt;

use crate::error::{JournalError, Result};
use crate::types::{Currency, Entry, TransactionType};

const POST_REF_MARKER: &str = "Pr:";
const DESCRIPTION_MARKER: &str = "Description:";

/// Parse one ledger line into an [`Entry`].
///
/// # Errors
///
/// - [`JournalError::UnterminatedAccount`] when no type marker terminates
///   the account name.
/// - [`JournalError::InvalidTransactionType`] / [`JournalError::InvalidCurrency`]
///   when the marker or currency token matches no recognized alias.
/// - [`JournalError::InvalidPostReference`] when a `Pr:` marker is not
///   followed by an integer.
pub fn parse_entry(line: &str) -> Result<Entry> {
    let mut tokens = line.split(' ');
    let reference = tokens
        .next()
        .ok_or_else(|| JournalError::UnterminatedAccount(line.to_string()))?;
    let date = tokens
        .next()
        .ok_or_else(|| JournalError::UnterminatedAccount(line.to_string()))?;
    let rest: Vec<&str> = tokens.collect();

    // Two states: accumulating the account name, or terminated by a type
    // marker. A token only counts as the marker when the next token is an
    // amount; "Dr" on its own can still be part of an account name.
    let mut account_words: Vec<&str> = Vec::new();
    for (position, &word) in rest.iter().enumerate() {
        let amount = rest.get(position + 1).copied().and_then(parse_amount);
        if is_type_marker(word) {
            if let Some(amount) = amount {
                let kind: TransactionType = word.parse()?;
                let currency: Currency = rest
                    .get(position + 2)
                    .ok_or_else(|| JournalError::InvalidCurrency("<missing>".to_string()))?
                    .parse()?;
                let tail = rest[position + 3..].join(" ");
                let (post_reference, description) = parse_optionals(&tail)?;

                return Ok(Entry {
                    reference: reference.to_string(),
                    date: date.to_string(),
                    account: account_words.join(" "),
                    amount,
                    kind,
                    currency,
                    description,
                    post_reference,
                });
            }
        }
        account_words.push(word);
    }

    Err(JournalError::UnterminatedAccount(line.to_string()))
}

fn is_type_marker(token: &str) -> bool {
    token.eq_ignore_ascii_case("dr") || token.eq_ignore_ascii_case("cr")
}

/// An amount token is a non-empty run of ASCII digits that fits in u64.
fn parse_amount(token: &str) -> Option<u64> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Parse the optional tail of an entry line: a `Pr:<n>` post reference and a
/// `Description: <text>` field, in whichever order they appear.
///
/// The canonical encoder writes `Pr:{n}` with no space; historical files
/// carry `Pr: {n}`. Both are accepted so that decode inverts encode. When the
/// post reference is written after the description marker, the `Pr:` text is
/// excluded from the description.
fn parse_optionals(tail: &str) -> Result<(Option<u32>, Option<String>)> {
    let post_ref_at = tail.find(POST_REF_MARKER);
    let description_at = tail.find(DESCRIPTION_MARKER);

    let post_reference = match post_ref_at {
        Some(at) => {
            let after = tail[at + POST_REF_MARKER.len()..].trim_start();
            let token = after.split(' ').next().unwrap_or("");
            let number = token
                .parse()
                .map_err(|_| JournalError::InvalidPostReference(token.to_string()))?;
            Some(number)
        }
        None => None,
    };

    let description = match description_at {
        Some(at) => {
            let end = match post_ref_at {
                Some(pr_at) if pr_at > at => pr_at,
                _ => tail.len(),
            };
            let text = tail[at + DESCRIPTION_MARKER.len()..end].trim();
            if text.is_empty() {
                None
            } else {
                Some(text.to_string())
            }
        }
        None => None,
    };

    Ok((post_reference, description))
}

/// Canonical single-line form: `reference date account type amount currency`,
/// then ` Pr:{n}` and ` Description: {text}` when present. Free-text fields
/// are trimmed before formatting.
impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.reference.trim(),
            self.date.trim(),
            self.account.trim(),
            self.kind,
            self.amount,
            self.currency
        )?;
        if let Some(post_reference) = self.post_reference {
            write!(f, " Pr:{}", post_reference)?;
        }
        if let Some(description) = &self.description {
            let description = description.trim();
            if !description.is_empty() {
                write!(f, " Description: {}", description)?;
            }
        }
        Ok(())
    }
}
