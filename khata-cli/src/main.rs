use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use khata_analysis::{
    FlowSummary, category_totals, daily_flows, outliers, top_merchants, weekday_flows,
};
use khata_core::Ruleset;
use khata_extract::{AmountPick, ParseOptions, StatementExtractor, TransactionTable};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(name = "khata", version, about = "UPI statement extraction and analysis")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract the transaction table from a statement PDF
    Extract {
        /// Path to the statement PDF
        pdf: PathBuf,

        /// Decryption password (takes precedence over --password-env)
        #[arg(long)]
        password: Option<String>,

        /// Environment variable to read the password from
        #[arg(long, value_name = "VAR")]
        password_env: Option<String>,

        /// Write the table as CSV to this path
        #[arg(long)]
        out: Option<PathBuf>,

        /// Take the last decimal in a block instead of the first
        #[arg(long)]
        amount_last: bool,

        /// Limit number of rows printed (default: 10)
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Summarize flows, categories, merchants, and outliers
    Report {
        /// Path to the statement PDF
        pdf: PathBuf,

        /// Decryption password (takes precedence over --password-env)
        #[arg(long)]
        password: Option<String>,

        /// Environment variable to read the password from
        #[arg(long, value_name = "VAR")]
        password_env: Option<String>,

        /// Number of top merchants to list (default: 10)
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Extract {
            pdf,
            password,
            password_env,
            out,
            amount_last,
            limit,
        } => {
            let password = resolve_password(password, password_env)?;
            let options = ParseOptions {
                amount_pick: if amount_last {
                    AmountPick::Last
                } else {
                    AmountPick::First
                },
            };
            let table = extract_table(&pdf, password, options)?;

            println!("Extracted {} transactions from {}\n", table.len(), pdf.display());
            print_rows(&table, limit);

            if let Some(out_path) = out {
                let file = File::create(&out_path)
                    .with_context(|| format!("creating {}", out_path.display()))?;
                table
                    .write_csv(file)
                    .with_context(|| format!("writing {}", out_path.display()))?;
                println!("\nWrote CSV to {}", out_path.display());
            }
        }

        Command::Report {
            pdf,
            password,
            password_env,
            top,
        } => {
            let password = resolve_password(password, password_env)?;
            let table = extract_table(&pdf, password, ParseOptions::default())?;
            print_report(&table, top);
        }
    }

    Ok(())
}

/// Explicit flag wins; otherwise read the named environment variable.
/// No password at all is fine for unencrypted statements.
fn resolve_password(flag: Option<String>, env_var: Option<String>) -> Result<Option<String>> {
    if flag.is_some() {
        return Ok(flag);
    }
    match env_var {
        Some(name) => {
            let value = std::env::var(&name)
                .with_context(|| format!("reading password from ${name}"))?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

fn extract_table(
    pdf: &Path,
    password: Option<String>,
    options: ParseOptions,
) -> Result<TransactionTable> {
    if !pdf.exists() {
        bail!("statement not found: {}", pdf.display());
    }

    let table = StatementExtractor::new(pdf)
        .with_password(password)
        .with_options(options)
        .extract()
        .with_context(|| format!("extracting {}", pdf.display()))?;
    tracing::debug!("extracted {} rows from {}", table.len(), pdf.display());
    Ok(table)
}

fn print_rows(table: &TransactionTable, limit: usize) {
    for txn in table.iter().take(limit) {
        println!(
            "{} | {:>8} | {:>10} | {}",
            txn.timestamp
                .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "<no time>".to_string()),
            txn.direction.map(|d| d.as_str()).unwrap_or("?"),
            txn.amount
                .map(|a| format!("{a:.2}"))
                .unwrap_or_else(|| "-".to_string()),
            txn.description.as_deref().unwrap_or("<no description>"),
        );
    }
    if table.len() > limit {
        println!("... and {} more", table.len() - limit);
    }
}

fn print_report(table: &TransactionTable, top: usize) {
    let rules = Ruleset::default();
    let summary = FlowSummary::from_table(table);

    println!("Transactions: {}", summary.transaction_count);
    println!("Total debited:  {:.2}", summary.total_debited);
    println!("Total credited: {:.2}", summary.total_credited);
    println!("Net flow:       {:.2}\n", summary.net_flow());

    println!("By category:");
    for (category, total) in category_totals(table, &rules) {
        println!("  {:<10} {:>12.2}", category.as_str(), total);
    }

    println!("\nTop merchants (debits):");
    for (merchant, total) in top_merchants(table, top) {
        println!("  {merchant:<32} {total:>12.2}");
    }

    let days = daily_flows(table);
    if let (Some(first), Some(last)) = (days.keys().next(), days.keys().next_back()) {
        println!("\nActivity from {first} to {last} across {} days", days.len());
    }

    let week = weekday_flows(table);
    if let Some((weekday, flow)) = week
        .iter()
        .max_by(|a, b| a.1.debited.partial_cmp(&b.1.debited).unwrap())
    {
        if flow.debited > 0.0 {
            println!("Heaviest spending weekday: {weekday} ({:.2} debited)", flow.debited);
        }
    }

    let big = outliers(table);
    if !big.is_empty() {
        println!("\nUnusually large transactions:");
        for txn in &big {
            println!(
                "  {} | {:>10} | {}",
                txn.timestamp
                    .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "<no time>".to_string()),
                txn.amount.map(|a| format!("{a:.2}")).unwrap_or_default(),
                txn.description.as_deref().unwrap_or("<no description>"),
            );
        }
    }
}
