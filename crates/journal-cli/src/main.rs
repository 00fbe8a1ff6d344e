//! Journal CLI - double-entry bookkeeping on plain-text journal files.
//!
//! This is the command-line interface for Journal. It owns everything the
//! core deliberately does not: argument handling, interactive prompting with
//! validation loops, and reading/writing the journal file. The whole file is
//! read, decoded, mutated, re-encoded, and written back in full on every
//! mutation.

use std::path::Path;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};

use journal_core::{format, fs, VERSION};

mod helpers;

/// Journal - a plain-text, human-readable double-entry bookkeeping ledger
#[derive(Parser)]
#[command(name = "journal")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the journal file
    #[arg(short, long, global = true, env = "JOURNAL_PATH")]
    journal: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new journal file
    Init {
        /// Path where the journal will be created
        #[arg(value_name = "PATH")]
        path: Option<String>,

        /// Journal name
        #[arg(long)]
        name: Option<String>,

        /// Short code used in generated entry references
        #[arg(long)]
        abbreviation: Option<String>,

        /// Disable interactive prompts
        #[arg(long)]
        no_input: bool,
    },

    /// Append a balanced debit/credit pair to the journal's last page
    Add {
        /// Transaction date (dd.mm.yyyy by convention; stored as-is)
        #[arg(long)]
        date: Option<String>,

        /// Account for the first leg
        #[arg(long)]
        account: Option<String>,

        /// Account for the balancing leg
        #[arg(long)]
        offset_account: Option<String>,

        /// Side of the first leg (dr, cr, debit, credit)
        #[arg(long)]
        kind: Option<String>,

        /// Amount in the smallest currency unit
        #[arg(long)]
        amount: Option<u64>,

        /// Currency code
        #[arg(long)]
        currency: Option<String>,

        /// Ledger page number the entries are posted to
        #[arg(long)]
        post_ref: Option<u32>,

        /// Free-text description shared by both legs
        #[arg(long)]
        description: Option<String>,

        /// Disable interactive prompts
        #[arg(long)]
        no_input: bool,
    },

    /// Print the journal
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Output format (table, plain)
        #[arg(long, value_name = "FORMAT")]
        format: Option<String>,
    },

    /// Verify the journal file's syntax
    Check,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init {
            path,
            name,
            abbreviation,
            no_input,
        }) => {
            let name = helpers::resolve_name(name, no_input)?;
            let abbreviation = helpers::resolve_abbreviation(abbreviation, &name, no_input)?;
            let target = match path.or(cli.journal) {
                Some(value) => value,
                None => helpers::prompt_filename(&name, no_input)?,
            };

            if Path::new(&target).exists() {
                return Err(anyhow::anyhow!(
                    "Refusing to overwrite existing file: {}",
                    target
                ));
            }

            let journal = journal_core::Journal::new(name, abbreviation);
            fs::save_atomic(Path::new(&target), &format::encode(&journal))?;

            if !cli.quiet {
                println!("Initialized new journal at {}", target);
            }
        }
        Some(Commands::Add {
            date,
            account,
            offset_account,
            kind,
            amount,
            currency,
            post_ref,
            description,
            no_input,
        }) => {
            let target = cli.journal.ok_or_else(|| {
                anyhow::anyhow!("No journal path provided. Use --journal or set JOURNAL_PATH.")
            })?;
            let text = std::fs::read_to_string(&target)
                .map_err(|e| anyhow::anyhow!("Failed to read journal {}: {}", target, e))?;
            let mut journal = format::decode(&text)?;

            let transaction = helpers::resolve_transaction(
                helpers::TransactionInput {
                    date,
                    account,
                    offset_account,
                    kind,
                    amount,
                    currency,
                    post_ref,
                    description,
                },
                no_input,
            )?;

            let references = journal.append_transaction(transaction)?;
            fs::save_atomic(Path::new(&target), &format::encode(&journal))?;

            if !cli.quiet {
                println!("Added entries {} and {}", references[0], references[1]);
            }
        }
        Some(Commands::Show { json, format }) => {
            let target = cli.journal.ok_or_else(|| {
                anyhow::anyhow!("No journal path provided. Use --journal or set JOURNAL_PATH.")
            })?;
            let text = std::fs::read_to_string(&target)
                .map_err(|e| anyhow::anyhow!("Failed to read journal {}: {}", target, e))?;
            let journal = format::decode(&text)?;

            let format = helpers::parse_output_format(format.as_deref())?;
            if json {
                if format.is_some() {
                    return Err(anyhow::anyhow!("--format cannot be used with --json"));
                }
                println!("{}", serde_json::to_string_pretty(&journal)?);
            } else {
                match format.unwrap_or(helpers::OutputFormat::Table) {
                    helpers::OutputFormat::Table => {
                        if !cli.quiet {
                            println!("{} - {}", journal.name, journal.abbreviation);
                        }
                        print!("{}", helpers::render_tables(&journal));
                    }
                    helpers::OutputFormat::Plain => {
                        print!("{}", format::encode(&journal));
                    }
                }
            }
        }
        Some(Commands::Check) => {
            let target = cli.journal.ok_or_else(|| {
                anyhow::anyhow!("No journal path provided. Use --journal or set JOURNAL_PATH.")
            })?;
            let text = std::fs::read_to_string(&target)
                .map_err(|e| anyhow::anyhow!("Failed to read journal {}: {}", target, e))?;

            match format::decode(&text) {
                Ok(journal) => {
                    if !cli.quiet {
                        println!("Syntax check: OK");
                        println!("- pages: {}", journal.pages.len());
                        println!("- entries: {}", journal.entry_count());
                    }
                }
                Err(err) => {
                    eprintln!("Syntax check: FAILED");
                    eprintln!("- error: {}", err);
                    return Err(anyhow::anyhow!("Syntax check failed"));
                }
            }
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "journal", &mut std::io::stdout());
        }
        None => {
            println!("Journal v{}", VERSION);
            println!("\nRun `journal --help` for usage information.");
        }
    }

    Ok(())
}
