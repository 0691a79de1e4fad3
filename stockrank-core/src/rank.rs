//! Batch ranking orchestrator — fetch, score, and collect one row per symbol.
//!
//! Strictly sequential. A failed symbol becomes an ERROR row carrying the
//! failure message and the batch moves on; one bad symbol never halts a run.

use serde::{Deserialize, Serialize};

use crate::data::provider::{DataError, MarketDataProvider};
use crate::scoring::{self, Action, Scorecard};

/// One persisted result row, serialized with the report's column headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankRow {
    #[serde(rename = "Stock")]
    pub stock: String,
    /// Composite rank; empty for ERROR rows.
    #[serde(rename = "Rank")]
    pub rank: Option<f64>,
    /// Comma-joined flag names, the literal `None`, or `Error: <message>`.
    #[serde(rename = "Flags")]
    pub flags: String,
    #[serde(rename = "Action")]
    pub action: Action,
}

impl RankRow {
    /// Row for a successfully scored symbol.
    pub fn scored(symbol: &str, card: &Scorecard) -> Self {
        let flags = if card.flags.is_empty() {
            "None".to_string()
        } else {
            card.flags
                .iter()
                .map(|f| f.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };

        Self {
            stock: symbol.to_string(),
            rank: Some(card.rank),
            flags,
            action: card.action,
        }
    }

    /// Row for a symbol whose retrieval or scoring failed.
    pub fn failed(symbol: &str, err: &DataError) -> Self {
        Self {
            stock: symbol.to_string(),
            rank: None,
            flags: format!("Error: {err}"),
            action: Action::Error,
        }
    }
}

/// Progress callbacks for a batch run.
pub trait RankProgress {
    /// Called before fetching a symbol.
    fn on_start(&self, symbol: &str, index: usize, total: usize);

    /// Called with the finished row for a symbol.
    fn on_complete(&self, symbol: &str, index: usize, total: usize, row: &RankRow);

    /// Called once when the whole batch is done.
    fn on_batch_complete(&self, scored: usize, failed: usize, total: usize);
}

/// Progress reporter that prints to stdout.
pub struct StdoutProgress;

impl RankProgress for StdoutProgress {
    fn on_start(&self, symbol: &str, index: usize, total: usize) {
        println!("[{}/{}] Scoring {symbol}...", index + 1, total);
    }

    fn on_complete(&self, _symbol: &str, _index: usize, _total: usize, row: &RankRow) {
        match row.rank {
            Some(rank) => println!("    {} ({rank:.2}) — {}", row.action, row.flags),
            None => println!("    {} — {}", row.action, row.flags),
        }
    }

    fn on_batch_complete(&self, scored: usize, failed: usize, total: usize) {
        println!("Done: {scored} scored, {failed} failed, {total} total");
    }
}

/// Progress reporter that stays quiet.
pub struct SilentProgress;

impl RankProgress for SilentProgress {
    fn on_start(&self, _symbol: &str, _index: usize, _total: usize) {}
    fn on_complete(&self, _symbol: &str, _index: usize, _total: usize, _row: &RankRow) {}
    fn on_batch_complete(&self, _scored: usize, _failed: usize, _total: usize) {}
}

/// Summary of a batch ranking run.
#[derive(Debug)]
pub struct RankSummary {
    /// One row per input symbol, in input order.
    pub rows: Vec<RankRow>,
    pub scored: usize,
    pub failed: usize,
}

/// Fetch and score one symbol.
pub fn rank_symbol(
    provider: &dyn MarketDataProvider,
    symbol: &str,
) -> Result<Scorecard, DataError> {
    let data = provider.fetch(symbol)?;
    Ok(scoring::scorecard(&data.history, &data.fundamentals))
}

/// Rank every symbol in order, one at a time, collecting a row per symbol.
///
/// Retrieval failures are recorded as ERROR rows with no retry; the batch
/// itself cannot abort.
pub fn rank_symbols(
    provider: &dyn MarketDataProvider,
    symbols: &[String],
    progress: &dyn RankProgress,
) -> RankSummary {
    let total = symbols.len();
    let mut rows = Vec::with_capacity(total);
    let mut scored = 0;
    let mut failed = 0;

    for (i, symbol) in symbols.iter().enumerate() {
        progress.on_start(symbol, i, total);

        let row = match rank_symbol(provider, symbol) {
            Ok(card) => {
                scored += 1;
                RankRow::scored(symbol, &card)
            }
            Err(e) => {
                failed += 1;
                RankRow::failed(symbol, &e)
            }
        };

        progress.on_complete(symbol, i, total, &row);
        rows.push(row);
    }

    progress.on_batch_complete(scored, failed, total);

    RankSummary {
        rows,
        scored,
        failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Flag;

    #[test]
    fn scored_row_joins_flags_with_comma() {
        let card = Scorecard {
            rank: 6.15,
            flags: vec![Flag::HighDebt, Flag::VeryExpensive],
            action: Action::Ignore,
        };
        let row = RankRow::scored("RELIANCE.NS", &card);
        assert_eq!(row.flags, "High Debt, Very Expensive");
        assert_eq!(row.rank, Some(6.15));
    }

    #[test]
    fn scored_row_without_flags_says_none() {
        let card = Scorecard {
            rank: 4.35,
            flags: vec![],
            action: Action::Ignore,
        };
        let row = RankRow::scored("TCS.NS", &card);
        assert_eq!(row.flags, "None");
    }

    #[test]
    fn failed_row_carries_the_error_message() {
        let err = DataError::SymbolNotFound {
            symbol: "BOGUS.NS".into(),
        };
        let row = RankRow::failed("BOGUS.NS", &err);
        assert_eq!(row.rank, None);
        assert_eq!(row.flags, "Error: symbol not found: BOGUS.NS");
        assert_eq!(row.action, Action::Error);
    }
}
