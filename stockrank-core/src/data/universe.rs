//! Symbol universe retrieval from exchange listings.
//!
//! Two sources: the NSE equity master CSV and the BSE scrip list JSON API.
//! Symbols get the Yahoo exchange suffix (`.NS` / `.BO`) on the way in.
//! The NSE listing is authoritative — its failure aborts the fetch — while a
//! BSE failure degrades to an NSE-only universe, reported but not fatal.

use std::time::Duration;

use super::provider::DataError;

const NSE_LISTING_URL: &str = "https://archives.nseindia.com/content/equities/EQUITY_L.csv";
const BSE_LISTING_URL: &str = "https://api.bseindia.com/BseIndiaAPI/api/ListofScripData/w";

const NSE_SUFFIX: &str = ".NS";
const BSE_SUFFIX: &str = ".BO";

/// Result of a universe fetch: suffixed symbols in listing order, NSE first.
#[derive(Debug)]
pub struct UniverseFetch {
    pub symbols: Vec<String>,
    pub nse_count: usize,
    pub bse_count: usize,
    /// Set when the BSE listing could not be fetched and the universe is
    /// NSE-only.
    pub bse_error: Option<DataError>,
}

/// Symbol source backed by the NSE and BSE listing endpoints.
pub struct ExchangeListings {
    client: reqwest::blocking::Client,
}

impl ExchangeListings {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(60))
            .user_agent("Mozilla/5.0")
            .build()
            .expect("failed to build HTTP client");

        Self { client }
    }

    /// Fetch both listings and combine them, NSE symbols first.
    pub fn fetch_all(&self) -> Result<UniverseFetch, DataError> {
        let mut symbols = self.fetch_nse()?;
        let nse_count = symbols.len();

        let (bse_count, bse_error) = match self.fetch_bse() {
            Ok(bse) => {
                let count = bse.len();
                symbols.extend(bse);
                (count, None)
            }
            Err(e) => (0, Some(e)),
        };

        Ok(UniverseFetch {
            symbols,
            nse_count,
            bse_count,
            bse_error,
        })
    }

    /// Fetch the NSE equity master and return `.NS`-suffixed symbols.
    pub fn fetch_nse(&self) -> Result<Vec<String>, DataError> {
        let body = self.get_text(NSE_LISTING_URL)?;
        parse_nse_csv(&body)
    }

    /// Fetch the BSE scrip list and return `.BO`-suffixed scrip codes.
    pub fn fetch_bse(&self) -> Result<Vec<String>, DataError> {
        let body = self.get_text(BSE_LISTING_URL)?;
        parse_bse_json(&body)
    }

    fn get_text(&self, url: &str) -> Result<String, DataError> {
        let resp = self.client.get(url).send().map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                DataError::NetworkUnreachable(e.to_string())
            } else {
                DataError::Other(e.to_string())
            }
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DataError::Other(format!("HTTP {status} for {url}")));
        }

        resp.text()
            .map_err(|e| DataError::ResponseFormatChanged(e.to_string()))
    }
}

impl Default for ExchangeListings {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the NSE equity master CSV, keeping the `SYMBOL` column.
///
/// The header carries stray spaces around some column names, so cells are
/// trimmed before matching. Blank symbols are dropped.
fn parse_nse_csv(body: &str) -> Result<Vec<String>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| DataError::ResponseFormatChanged(format!("NSE CSV header: {e}")))?;

    let symbol_idx = headers
        .iter()
        .position(|h| h == "SYMBOL")
        .ok_or_else(|| DataError::ResponseFormatChanged("NSE CSV has no SYMBOL column".into()))?;

    let mut symbols = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| DataError::ResponseFormatChanged(format!("NSE CSV row: {e}")))?;
        if let Some(symbol) = record.get(symbol_idx) {
            if !symbol.is_empty() {
                symbols.push(format!("{symbol}{NSE_SUFFIX}"));
            }
        }
    }

    Ok(symbols)
}

/// Parse the BSE scrip list JSON, keeping the `SCRIP_CD` field.
///
/// Scrip codes arrive as numbers or strings depending on the endpoint mood;
/// both forms are accepted. Entries without a code are dropped.
fn parse_bse_json(body: &str) -> Result<Vec<String>, DataError> {
    let scrips: Vec<serde_json::Value> = serde_json::from_str(body)
        .map_err(|e| DataError::ResponseFormatChanged(format!("BSE scrip list: {e}")))?;

    let symbols = scrips
        .iter()
        .filter_map(|scrip| {
            let code = scrip.get("SCRIP_CD")?;
            let code = match code {
                serde_json::Value::String(s) if !s.is_empty() => s.clone(),
                serde_json::Value::Number(n) => n.to_string(),
                _ => return None,
            };
            Some(format!("{code}{BSE_SUFFIX}"))
        })
        .collect();

    Ok(symbols)
}
