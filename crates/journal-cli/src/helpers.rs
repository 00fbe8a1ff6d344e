//! Prompting, parsing, and rendering helpers.
//!
//! Interactive input is validated in loops here, so the core only ever
//! receives already-validated strings. Every prompt has a flag equivalent;
//! with `--no-input`, prompts fall back to their defaults or fail.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use dialoguer::Input;

use journal_core::{Currency, Entry, Journal, NewTransaction, TransactionType};

const DEFAULT_NAME: &str = "General";

/// Flag-supplied pieces of a transaction; anything missing is prompted for.
#[derive(Debug, Default)]
pub struct TransactionInput {
    pub date: Option<String>,
    pub account: Option<String>,
    pub offset_account: Option<String>,
    pub kind: Option<String>,
    pub amount: Option<u64>,
    pub currency: Option<String>,
    pub post_ref: Option<u32>,
    pub description: Option<String>,
}

/// Resolve the journal name from the flag, a prompt, or the default.
pub fn resolve_name(flag: Option<String>, no_input: bool) -> anyhow::Result<String> {
    if let Some(value) = flag {
        if value.trim().is_empty() {
            return Err(anyhow::anyhow!("--name cannot be empty"));
        }
        return Ok(value);
    }
    if no_input {
        return Ok(DEFAULT_NAME.to_string());
    }
    let value = Input::<String>::new()
        .with_prompt("Journal name")
        .default(DEFAULT_NAME.to_string())
        .interact_text()?;
    Ok(value)
}

/// Resolve the abbreviation; the default is the first three letters of the
/// name, uppercased.
pub fn resolve_abbreviation(
    flag: Option<String>,
    name: &str,
    no_input: bool,
) -> anyhow::Result<String> {
    if let Some(value) = flag {
        if value.trim().is_empty() {
            return Err(anyhow::anyhow!("--abbreviation cannot be empty"));
        }
        return Ok(value);
    }
    let default = default_abbreviation(name);
    if no_input {
        return Ok(default);
    }
    let value = Input::<String>::new()
        .with_prompt("Journal abbreviation")
        .default(default)
        .interact_text()?;
    Ok(value)
}

pub fn default_abbreviation(name: &str) -> String {
    name.chars().take(3).collect::<String>().to_uppercase()
}

/// Prompt for the journal filename; the default is the lowercased name with
/// a `.jnl` extension.
pub fn prompt_filename(name: &str, no_input: bool) -> anyhow::Result<String> {
    let default = format!("{}.jnl", name.to_lowercase());
    if no_input {
        return Ok(default);
    }
    let value = Input::<String>::new()
        .with_prompt("Journal filename")
        .default(default)
        .interact_text()?;
    Ok(value)
}

/// Turn flags plus prompts into a validated [`NewTransaction`].
///
/// Required fields without a natural default (accounts, kind, amount) fail
/// under `--no-input`; date and currency fall back to today and `usd`.
pub fn resolve_transaction(
    input: TransactionInput,
    no_input: bool,
) -> anyhow::Result<NewTransaction> {
    let date = match input.date {
        Some(value) => value,
        None => prompt_date(no_input)?,
    };
    let account = match input.account {
        Some(value) => value,
        None => prompt_account(no_input)?,
    };
    let offset_account = match input.offset_account {
        Some(value) => value,
        None => prompt_offset_account(&account, no_input)?,
    };
    let kind: TransactionType = match input.kind {
        Some(value) => value.parse()?,
        None => prompt_kind(no_input)?,
    };
    let amount = match input.amount {
        Some(value) => value,
        None => prompt_amount(no_input)?,
    };
    let currency: Currency = match input.currency {
        Some(value) => value.parse()?,
        None => prompt_currency(no_input)?,
    };
    let post_ref = match input.post_ref {
        Some(value) => Some(value),
        None => prompt_post_reference(no_input)?,
    };
    let description = match input.description {
        Some(value) => Some(value),
        None => prompt_description(no_input)?,
    };

    let mut transaction =
        NewTransaction::new(date, account, offset_account, amount, kind, currency);
    if let Some(value) = description {
        transaction = transaction.with_description(value);
    }
    if let Some(value) = post_ref {
        transaction = transaction.with_post_reference(value);
    }
    Ok(transaction)
}

fn prompt_date(no_input: bool) -> anyhow::Result<String> {
    let today = chrono::Local::now().format("%d.%m.%Y").to_string();
    if no_input {
        return Ok(today);
    }
    let value = Input::<String>::new()
        .with_prompt("Date (dd.mm.yyyy)")
        .default(today)
        .interact_text()?;
    Ok(value)
}

fn prompt_account(no_input: bool) -> anyhow::Result<String> {
    if no_input {
        return Err(anyhow::anyhow!("--no-input requires --account"));
    }
    let value = Input::<String>::new()
        .with_prompt("First account")
        .validate_with(|value: &String| -> Result<(), &str> {
            if value.trim().is_empty() {
                Err("account name cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(value)
}

fn prompt_offset_account(account: &str, no_input: bool) -> anyhow::Result<String> {
    if no_input {
        return Err(anyhow::anyhow!("--no-input requires --offset-account"));
    }
    let first = account.to_string();
    let value = Input::<String>::new()
        .with_prompt("Balancing account")
        .validate_with(move |value: &String| -> Result<(), String> {
            if value.trim().is_empty() {
                Err("account name cannot be empty".to_string())
            } else if value.eq_ignore_ascii_case(&first) {
                Err(format!("must name a different account than {}", first))
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(value)
}

fn prompt_kind(no_input: bool) -> anyhow::Result<TransactionType> {
    if no_input {
        return Err(anyhow::anyhow!("--no-input requires --kind"));
    }
    let value = Input::<String>::new()
        .with_prompt("Debit or credit for the first account? (dr/cr)")
        .validate_with(|value: &String| -> Result<(), String> {
            value
                .parse::<TransactionType>()
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()?;
    Ok(value.parse()?)
}

fn prompt_amount(no_input: bool) -> anyhow::Result<u64> {
    if no_input {
        return Err(anyhow::anyhow!("--no-input requires --amount"));
    }
    let value = Input::<u64>::new()
        .with_prompt("Amount (smallest currency unit)")
        .interact_text()?;
    Ok(value)
}

fn prompt_currency(no_input: bool) -> anyhow::Result<Currency> {
    if no_input {
        return Ok(Currency::Usd);
    }
    let value = Input::<String>::new()
        .with_prompt("Currency")
        .default("usd".to_string())
        .validate_with(|value: &String| -> Result<(), String> {
            value
                .parse::<Currency>()
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()?;
    Ok(value.parse()?)
}

fn prompt_post_reference(no_input: bool) -> anyhow::Result<Option<u32>> {
    if no_input {
        return Ok(None);
    }
    let value = Input::<String>::new()
        .with_prompt("Post reference (leave blank if unposted)")
        .allow_empty(true)
        .validate_with(|value: &String| -> Result<(), &str> {
            if value.is_empty() || value.parse::<u32>().is_ok() {
                Ok(())
            } else {
                Err("post reference must be an integer")
            }
        })
        .interact_text()?;
    if value.is_empty() {
        Ok(None)
    } else {
        Ok(Some(value.parse()?))
    }
}

fn prompt_description(no_input: bool) -> anyhow::Result<Option<String>> {
    if no_input {
        return Ok(None);
    }
    let value = Input::<String>::new()
        .with_prompt("Description (optional)")
        .allow_empty(true)
        .interact_text()?;
    if value.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(value))
    }
}

#[derive(Clone, Copy)]
pub enum OutputFormat {
    Table,
    Plain,
}

pub fn parse_output_format(value: Option<&str>) -> anyhow::Result<Option<OutputFormat>> {
    match value {
        None => Ok(None),
        Some("table") => Ok(Some(OutputFormat::Table)),
        Some("plain") => Ok(Some(OutputFormat::Plain)),
        Some(other) => Err(anyhow::anyhow!(
            "Unsupported format: {} (use table or plain)",
            other
        )),
    }
}

/// Render one table per page, numbered by position.
pub fn render_tables(journal: &Journal) -> String {
    let mut out = String::new();
    for (index, page) in journal.pages.iter().enumerate() {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            "Ref",
            "Date",
            "Account",
            "Type",
            "Amount",
            "Currency",
            "Pr",
            "Description",
        ]);
        for entry in page {
            table.add_row(entry_row(entry));
        }
        out.push_str(&format!("Page {}\n{}\n", index + 1, table));
    }
    out
}

fn entry_row(entry: &Entry) -> Vec<String> {
    vec![
        entry.reference.clone(),
        entry.date.clone(),
        entry.account.clone(),
        entry.kind.to_string(),
        entry.amount.to_string(),
        entry.currency.to_string(),
        entry
            .post_reference
            .map(|n| n.to_string())
            .unwrap_or_default(),
        entry.description.clone().unwrap_or_default(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_abbreviation() {
        assert_eq!(default_abbreviation("General"), "GEN");
        assert_eq!(default_abbreviation("ab"), "AB");
        assert_eq!(default_abbreviation("Sales Journal"), "SAL");
    }

    #[test]
    fn test_resolve_transaction_from_flags_only() {
        let transaction = resolve_transaction(
            TransactionInput {
                date: Some("01.01.2024".to_string()),
                account: Some("Cash".to_string()),
                offset_account: Some("Revenue".to_string()),
                kind: Some("debit".to_string()),
                amount: Some(100),
                currency: Some("usd".to_string()),
                post_ref: Some(2),
                description: Some("opening".to_string()),
            },
            true,
        )
        .unwrap();

        assert_eq!(transaction.kind, TransactionType::Debit);
        assert_eq!(transaction.currency, Currency::Usd);
        assert_eq!(transaction.post_reference, Some(2));
        assert_eq!(transaction.description.as_deref(), Some("opening"));
    }

    #[test]
    fn test_resolve_transaction_defaults_under_no_input() {
        let transaction = resolve_transaction(
            TransactionInput {
                account: Some("Cash".to_string()),
                offset_account: Some("Revenue".to_string()),
                kind: Some("cr".to_string()),
                amount: Some(10),
                ..TransactionInput::default()
            },
            true,
        )
        .unwrap();

        // Date defaults to today, currency to usd; optionals stay unset.
        assert!(!transaction.date.is_empty());
        assert_eq!(transaction.currency, Currency::Usd);
        assert_eq!(transaction.post_reference, None);
        assert_eq!(transaction.description, None);
    }

    #[test]
    fn test_resolve_transaction_requires_accounts_without_prompts() {
        let err = resolve_transaction(
            TransactionInput {
                kind: Some("dr".to_string()),
                amount: Some(10),
                ..TransactionInput::default()
            },
            true,
        )
        .unwrap_err();
        assert!(err.to_string().contains("--account"));
    }

    #[test]
    fn test_resolve_transaction_rejects_bad_kind() {
        let err = resolve_transaction(
            TransactionInput {
                account: Some("Cash".to_string()),
                offset_account: Some("Revenue".to_string()),
                kind: Some("sideways".to_string()),
                amount: Some(10),
                ..TransactionInput::default()
            },
            true,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Invalid transaction type"));
    }

    #[test]
    fn test_parse_output_format() {
        assert!(parse_output_format(None).unwrap().is_none());
        assert!(matches!(
            parse_output_format(Some("table")).unwrap(),
            Some(OutputFormat::Table)
        ));
        assert!(matches!(
            parse_output_format(Some("plain")).unwrap(),
            Some(OutputFormat::Plain)
        ));
        assert!(parse_output_format(Some("yaml")).is_err());
    }

    #[test]
    fn test_render_tables_lists_accounts() {
        let mut journal = Journal::new("General", "GEN");
        journal
            .append_transaction(NewTransaction::new(
                "01.01.2024",
                "Cash",
                "Revenue",
                100,
                TransactionType::Debit,
                Currency::Usd,
            ))
            .unwrap();

        let rendered = render_tables(&journal);
        assert!(rendered.starts_with("Page 1\n"));
        assert!(rendered.contains("Cash"));
        assert!(rendered.contains("Revenue"));
        assert!(rendered.contains("Dr"));
        assert!(rendered.contains("Cr"));
    }
}
