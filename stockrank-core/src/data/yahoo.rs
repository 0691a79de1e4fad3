//! Yahoo Finance data provider.
//!
//! Two endpoints per symbol: the v8 chart API for six months of daily closes
//! and the v10 quoteSummary API for fundamentals (`returnOnEquity` and
//! `debtToEquity` from the financialData module, `trailingPE` from
//! summaryDetail). Yahoo has no official API and changes formats without
//! notice, so parse failures surface as `ResponseFormatChanged` rather than
//! panics.

use std::time::Duration;

use serde::Deserialize;

use super::provider::{DataError, MarketData, MarketDataProvider};
use crate::domain::{FundamentalsSnapshot, PriceBar};

// ── Chart API payload ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    close: Vec<Option<f64>>,
}

// ── quoteSummary payload ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryResult,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResult {
    result: Option<Vec<SummaryModules>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct SummaryModules {
    #[serde(rename = "financialData")]
    financial_data: Option<FinancialData>,
    #[serde(rename = "summaryDetail")]
    summary_detail: Option<SummaryDetail>,
}

#[derive(Debug, Deserialize)]
struct FinancialData {
    #[serde(rename = "returnOnEquity")]
    return_on_equity: Option<RawValue>,
    #[serde(rename = "debtToEquity")]
    debt_to_equity: Option<RawValue>,
}

#[derive(Debug, Deserialize)]
struct SummaryDetail {
    #[serde(rename = "trailingPE")]
    trailing_pe: Option<RawValue>,
}

/// Yahoo wraps numerics as `{"raw": 0.18, "fmt": "18.00%"}`; only `raw`
/// matters, and it too may be absent.
#[derive(Debug, Deserialize)]
struct RawValue {
    raw: Option<f64>,
}

// ── Provider ─────────────────────────────────────────────────────────

/// Yahoo Finance market data provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
}

impl YahooProvider {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");

        Self { client }
    }

    /// Chart API URL for a trailing six-month daily window.
    fn chart_url(symbol: &str) -> String {
        format!(
            "https://query2.finance.yahoo.com/v8/finance/chart/{symbol}\
             ?range=6mo&interval=1d"
        )
    }

    /// quoteSummary URL requesting the two modules that carry our ratios.
    fn quote_summary_url(symbol: &str) -> String {
        format!(
            "https://query2.finance.yahoo.com/v10/finance/quoteSummary/{symbol}\
             ?modules=financialData%2CsummaryDetail"
        )
    }

    /// Parse the chart API response into a close-price series.
    ///
    /// Rows with a missing close (holidays, halted sessions) are skipped
    /// rather than carried as NaN.
    fn parse_chart(symbol: &str, resp: ChartResponse) -> Result<Vec<PriceBar>, DataError> {
        let result = resp.chart.result.ok_or_else(|| {
            if let Some(err) = resp.chart.error {
                if err.code == "Not Found" {
                    DataError::SymbolNotFound {
                        symbol: symbol.to_string(),
                    }
                } else {
                    DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
                }
            } else {
                DataError::ResponseFormatChanged("empty result with no error".into())
            }
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))?;

        let timestamps = data
            .timestamp
            .ok_or_else(|| DataError::ResponseFormatChanged("no timestamps".into()))?;

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

        let mut bars = Vec::with_capacity(timestamps.len());

        for (i, &ts) in timestamps.iter().enumerate() {
            let Some(close) = quote.close.get(i).copied().flatten() else {
                continue;
            };

            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| {
                    DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                })?;

            bars.push(PriceBar::new(date, close));
        }

        Ok(bars)
    }

    /// Parse the quoteSummary response into a fundamentals snapshot.
    ///
    /// A missing module or field leaves that ratio unknown; only a malformed
    /// envelope is an error. Yahoo reports `debtToEquity` in its own scale
    /// and the value is passed through untouched.
    fn parse_quote_summary(
        symbol: &str,
        resp: QuoteSummaryResponse,
    ) -> Result<FundamentalsSnapshot, DataError> {
        let result = resp.quote_summary.result.ok_or_else(|| {
            if let Some(err) = resp.quote_summary.error {
                if err.code == "Not Found" {
                    DataError::SymbolNotFound {
                        symbol: symbol.to_string(),
                    }
                } else {
                    DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
                }
            } else {
                DataError::ResponseFormatChanged("empty result with no error".into())
            }
        })?;

        let modules = result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))?;

        let financial = modules.financial_data;
        let summary = modules.summary_detail;

        Ok(FundamentalsSnapshot {
            return_on_equity: financial
                .as_ref()
                .and_then(|f| f.return_on_equity.as_ref())
                .and_then(|v| v.raw),
            trailing_pe: summary
                .as_ref()
                .and_then(|s| s.trailing_pe.as_ref())
                .and_then(|v| v.raw),
            debt_to_equity: financial
                .as_ref()
                .and_then(|f| f.debt_to_equity.as_ref())
                .and_then(|v| v.raw),
        })
    }

    /// Execute one GET and map HTTP-level failures onto DataError.
    ///
    /// Single attempt: a transient failure is terminal for the symbol in
    /// this run and the caller records it as an ERROR row.
    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        symbol: &str,
        url: &str,
    ) -> Result<T, DataError> {
        let resp = self.client.get(url).send().map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                DataError::NetworkUnreachable(e.to_string())
            } else {
                DataError::Other(e.to_string())
            }
        })?;

        let status = resp.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(DataError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            return Err(DataError::Other(format!("HTTP {status} for {symbol}")));
        }

        resp.json().map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
        })
    }
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketDataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch(&self, symbol: &str) -> Result<MarketData, DataError> {
        let chart: ChartResponse = self.get_json(symbol, &Self::chart_url(symbol))?;
        let history = Self::parse_chart(symbol, chart)?;

        let summary: QuoteSummaryResponse =
            self.get_json(symbol, &Self::quote_summary_url(symbol))?;
        let fundamentals = Self::parse_quote_summary(symbol, summary)?;

        Ok(MarketData {
            history,
            fundamentals,
        })
    }
}
