//! PriceBar — one daily closing observation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Closing price for a single symbol on a single day.
///
/// A price series is a chronologically ascending `Vec<PriceBar>` covering a
/// trailing window (six months of daily bars for ranking). A series may be
/// empty or shorter than the window if the provider has little data; every
/// scoring function must degrade rather than error on a short series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: f64,
}

impl PriceBar {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}
