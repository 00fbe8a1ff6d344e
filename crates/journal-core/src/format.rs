//! Whole-file ledger codec.
//!
//! The file grammar is line-oriented:
//!
//! ```text
//! <name> - <abbreviation>
//! Page <N>
//! <entry-line>
//! ...
//! Page <N+1>
//! ...
//! ```
//!
//! [`decode`] and [`encode`] are inverses of each other for well-formed
//! input. One bad line aborts the whole decode; no partial journal is ever
//! returned.

use crate::entry::parse_entry;
use crate::error::{JournalError, Result};
use crate::types::{Journal, Page};

/// Decode whole-file ledger text into a [`Journal`].
///
/// Page headers are matched case-insensitively. Empty lines are skipped.
/// The accumulator for the final page is flushed at end of input even when
/// empty, and a file that produced no pages at all still yields one empty
/// page.
///
/// # Errors
///
/// Returns [`JournalError::MalformedHeader`] for a bad first line or a page
/// header without a parseable number, and propagates entry grammar errors
/// from the line parser.
pub fn decode(text: &str) -> Result<Journal> {
    let mut lines = text.split('\n');

    let header = lines
        .next()
        .ok_or_else(|| JournalError::MalformedHeader("empty input".to_string()))?;
    let (name, abbreviation) = split_header(header)?;

    let first_page_line = lines
        .next()
        .ok_or_else(|| JournalError::MalformedHeader("missing first page header".to_string()))?;
    if !is_page_header(first_page_line) {
        return Err(JournalError::MalformedHeader(format!(
            "expected \"Page <n>\", found: {first_page_line}"
        )));
    }
    let mut page_count = parse_page_number(first_page_line)?;

    let mut pages: Vec<Page> = Vec::new();
    let mut current = Page::new();
    for line in lines {
        if is_page_header(line) {
            // A new page header closes the page being accumulated.
            let number = parse_page_number(line)?;
            page_count = page_count.max(number);
            pages.push(std::mem::take(&mut current));
        } else if !line.is_empty() {
            current.push(parse_entry(line)?);
        }
    }
    pages.push(current);

    if pages.is_empty() {
        pages.push(Page::new());
    }

    Ok(Journal {
        page_count,
        name,
        abbreviation,
        pages,
    })
}

/// Encode a [`Journal`] back to whole-file ledger text.
///
/// Pages are numbered by position, 1-indexed. Every written line is followed
/// by exactly one newline, so the output ends with a newline.
pub fn encode(journal: &Journal) -> String {
    let mut out = String::new();
    out.push_str(&journal.name);
    out.push_str(" - ");
    out.push_str(&journal.abbreviation);
    out.push('\n');
    for (index, page) in journal.pages.iter().enumerate() {
        out.push_str(&format!("Page {}\n", index + 1));
        for entry in page {
            out.push_str(&format!("{entry}\n"));
        }
    }
    out
}

/// Split the header line on the *last* `" - "` occurrence, so a name may
/// itself contain the separator but the abbreviation is always the final
/// segment.
fn split_header(line: &str) -> Result<(String, String)> {
    let (name, abbreviation) = line.rsplit_once(" - ").ok_or_else(|| {
        JournalError::MalformedHeader(format!("missing \" - \" separator: {line}"))
    })?;
    if abbreviation.is_empty() {
        return Err(JournalError::MalformedHeader(format!(
            "empty abbreviation: {line}"
        )));
    }
    Ok((name.to_string(), abbreviation.to_string()))
}

fn is_page_header(line: &str) -> bool {
    line.get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("page"))
}

fn parse_page_number(line: &str) -> Result<u32> {
    line.split(' ')
        .nth(1)
        .and_then(|token| token.parse().ok())
        .ok_or_else(|| {
            JournalError::MalformedHeader(format!("page header without a number: {line}"))
        })
}
