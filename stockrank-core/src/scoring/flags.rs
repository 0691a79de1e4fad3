//! Sanity checks — independent warning flags evaluated from raw inputs.
//!
//! Flags are computed from the same raw series/snapshot the sub-scores see,
//! not from the bucketed sub-scores, so their thresholds may disagree with
//! the buckets. Each check is independent; when its underlying datum is
//! absent the check is silently skipped.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{FundamentalsSnapshot, PriceBar};
use crate::scoring::subscores::{trailing_sma, DMA_PERIOD};

/// A single warning that can veto a high-scoring symbol's action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flag {
    /// Last close sits below the 200-day moving average.
    Below200Dma,
    /// Debt-to-equity above 1 in the provider-reported scale.
    HighDebt,
    /// Trailing P/E above 50.
    VeryExpensive,
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Flag::Below200Dma => "Below 200 DMA",
            Flag::HighDebt => "High Debt",
            Flag::VeryExpensive => "Very Expensive",
        };
        f.write_str(name)
    }
}

/// Evaluate all sanity checks for one symbol.
///
/// The trend check needs at least [`DMA_PERIOD`] observations; shorter series
/// skip it rather than flagging.
pub fn sanity_checks(series: &[PriceBar], fundamentals: &FundamentalsSnapshot) -> Vec<Flag> {
    let mut flags = Vec::new();

    if let Some(dma) = trailing_sma(series, DMA_PERIOD) {
        let last = series[series.len() - 1].close;
        if last < dma {
            flags.push(Flag::Below200Dma);
        }
    }

    if let Some(de) = fundamentals.debt_to_equity {
        if de > 1.0 {
            flags.push(Flag::HighDebt);
        }
    }

    if let Some(pe) = fundamentals.trailing_pe {
        if pe > 50.0 {
            flags.push(Flag::VeryExpensive);
        }
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn flat_series(close: f64, n: usize) -> Vec<PriceBar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..n)
            .map(|i| PriceBar::new(start + chrono::Duration::days(i as i64), close))
            .collect()
    }

    #[test]
    fn empty_inputs_raise_no_flags() {
        let flags = sanity_checks(&[], &FundamentalsSnapshot::empty());
        assert!(flags.is_empty());
    }

    #[test]
    fn trend_check_needs_full_dma_window() {
        // 199 bars in free fall: the DMA is undefined, so no trend flag.
        let mut series = flat_series(100.0, 199);
        if let Some(last) = series.last_mut() {
            last.close = 10.0;
        }
        assert!(!sanity_checks(&series, &FundamentalsSnapshot::empty())
            .contains(&Flag::Below200Dma));

        // 200 bars with the last close below the average: flagged.
        let mut series = flat_series(100.0, 200);
        if let Some(last) = series.last_mut() {
            last.close = 10.0;
        }
        assert!(sanity_checks(&series, &FundamentalsSnapshot::empty())
            .contains(&Flag::Below200Dma));
    }

    #[test]
    fn debt_and_valuation_flags() {
        let fundamentals = FundamentalsSnapshot {
            return_on_equity: None,
            trailing_pe: Some(55.0),
            debt_to_equity: Some(1.5),
        };
        let flags = sanity_checks(&[], &fundamentals);
        assert_eq!(flags, vec![Flag::HighDebt, Flag::VeryExpensive]);
    }

    #[test]
    fn thresholds_are_strict() {
        let fundamentals = FundamentalsSnapshot {
            return_on_equity: None,
            trailing_pe: Some(50.0),
            debt_to_equity: Some(1.0),
        };
        assert!(sanity_checks(&[], &fundamentals).is_empty());
    }

    #[test]
    fn flag_names_match_report_wording() {
        assert_eq!(Flag::Below200Dma.to_string(), "Below 200 DMA");
        assert_eq!(Flag::HighDebt.to_string(), "High Debt");
        assert_eq!(Flag::VeryExpensive.to_string(), "Very Expensive");
    }
}
