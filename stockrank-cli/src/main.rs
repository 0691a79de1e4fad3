//! StockRank CLI — fetch the symbol universe and rank it.
//!
//! Commands:
//! - `fetch-universe` — download NSE and BSE listings, write the symbol table
//! - `rank` — score every symbol in the table and write one result row each

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use stockrank_core::data::{
    read_symbols, write_rows, write_symbols, ExchangeListings, YahooProvider,
};
use stockrank_core::rank::{rank_symbols, StdoutProgress};

#[derive(Parser)]
#[command(
    name = "stockrank",
    about = "StockRank CLI — momentum/fundamentals stock screener"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download NSE and BSE listings and write the symbol table.
    FetchUniverse {
        /// Output path for the symbol table.
        #[arg(long, default_value = "stocks.csv")]
        output: PathBuf,
    },
    /// Score every symbol in the table and write the result rows.
    Rank {
        /// Symbol table to read (single Stock column).
        #[arg(long, default_value = "stocks.csv")]
        input: PathBuf,

        /// Output path for result rows. Defaults to the input path,
        /// replacing the symbol table with the result table.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::FetchUniverse { output } => run_fetch_universe(output),
        Commands::Rank { input, output } => run_rank(input, output),
    }
}

fn run_fetch_universe(output: PathBuf) -> Result<()> {
    println!("Fetching exchange listings...");

    let listings = ExchangeListings::new();
    let fetch = listings
        .fetch_all()
        .context("failed to fetch the NSE listing")?;

    println!("NSE symbols: {}", fetch.nse_count);
    match &fetch.bse_error {
        Some(e) => eprintln!("Warning: BSE fetch failed, universe is NSE-only: {e}"),
        None => println!("BSE symbols: {}", fetch.bse_count),
    }

    write_symbols(&output, &fetch.symbols)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "Saved {} symbols to {}",
        fetch.symbols.len(),
        output.display()
    );
    Ok(())
}

fn run_rank(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let symbols = read_symbols(&input)
        .with_context(|| format!("failed to read symbol table {}", input.display()))?;

    if symbols.is_empty() {
        bail!(
            "symbol table {} is empty — run `stockrank fetch-universe` first",
            input.display()
        );
    }

    let provider = YahooProvider::new();
    let summary = rank_symbols(&provider, &symbols, &StdoutProgress);

    let output = output.unwrap_or(input);
    write_rows(&output, &summary.rows)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("Saved rankings to {}", output.display());
    Ok(())
}
