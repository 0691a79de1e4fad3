//! Market data provider trait and structured error types.
//!
//! The MarketDataProvider trait abstracts over the upstream source (Yahoo
//! Finance in production, mocks in tests) so the batch orchestrator and the
//! scoring engine never touch HTTP directly.

use thiserror::Error;

use crate::domain::{FundamentalsSnapshot, PriceBar};

/// Everything the scoring engine needs for one symbol: a trailing six-month
/// daily price series plus a fundamentals snapshot.
#[derive(Debug, Clone)]
pub struct MarketData {
    pub history: Vec<PriceBar>,
    pub fundamentals: FundamentalsSnapshot,
}

/// Structured error types for data retrieval.
///
/// Any of these is terminal for the affected symbol within a run: the batch
/// records an ERROR row and moves on, with no retry.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("data error: {0}")]
    Other(String),
}

/// Trait for market data providers.
///
/// A fetch is per-symbol and independent of every other symbol; providers
/// hold no cross-call state beyond their HTTP client.
pub trait MarketDataProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the trailing price history and fundamentals for one symbol.
    fn fetch(&self, symbol: &str) -> Result<MarketData, DataError>;
}
