//! Per-signal sub-scores.
//!
//! Each function maps one signal dimension onto a four-tier bucket
//! {1, 4, 7, 10}. The bucket ranges are half-open and ordered, so exactly one
//! bucket applies to any input. Missing input degrades to the neutral bucket
//! (4), except momentum, where a history too short to carry a signal degrades
//! to the lowest bucket (1).

use crate::domain::PriceBar;

/// Minimum observations before momentum is considered meaningful.
pub const MIN_MOMENTUM_BARS: usize = 50;

/// Window of the long-term trend moving average.
pub const DMA_PERIOD: usize = 200;

/// Simple moving average of the last `period` closes, evaluated at the final
/// observation. `None` when the series is shorter than `period`.
pub fn trailing_sma(series: &[PriceBar], period: usize) -> Option<f64> {
    if period == 0 || series.len() < period {
        return None;
    }
    let window = &series[series.len() - period..];
    Some(window.iter().map(|bar| bar.close).sum::<f64>() / period as f64)
}

/// Momentum bucket from the trailing price window.
///
/// Simple return over the full window, with the 200 DMA as a trend filter for
/// the top bucket. Below [`DMA_PERIOD`] observations the DMA is undefined and
/// the "price above DMA" condition is treated as false, capping the bucket
/// at 7.
pub fn momentum_score(series: &[PriceBar]) -> u8 {
    if series.len() < MIN_MOMENTUM_BARS {
        return 1;
    }

    let first = series[0].close;
    let last = series[series.len() - 1].close;
    let ret = (last - first) / first * 100.0;

    let above_dma = trailing_sma(series, DMA_PERIOD).is_some_and(|dma| last > dma);

    if ret > 20.0 && above_dma {
        10
    } else if ret > 10.0 {
        7
    } else if ret > 0.0 {
        4
    } else {
        1
    }
}

/// Quality bucket from return on equity (fraction, 0.18 = 18%).
pub fn quality_score(roe: Option<f64>) -> u8 {
    let Some(roe) = roe else {
        return 4;
    };

    let pct = roe * 100.0;
    if pct > 20.0 {
        10
    } else if pct > 15.0 {
        7
    } else if pct > 10.0 {
        4
    } else {
        1
    }
}

/// Valuation bucket from the trailing P/E ratio.
pub fn valuation_score(pe: Option<f64>) -> u8 {
    let Some(pe) = pe else {
        return 4;
    };

    if pe < 15.0 {
        10
    } else if pe < 25.0 {
        7
    } else if pe < 40.0 {
        4
    } else {
        1
    }
}

/// Stability bucket from debt-to-equity.
pub fn stability_score(de: Option<f64>) -> u8 {
    let Some(de) = de else {
        return 4;
    };

    if de < 0.3 {
        10
    } else if de < 0.7 {
        7
    } else if de < 1.0 {
        4
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    /// Build a daily series from closes, dates ascending from 2024-01-01.
    pub(crate) fn make_series(closes: &[f64]) -> Vec<PriceBar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar::new(start + chrono::Duration::days(i as i64), close))
            .collect()
    }

    /// Linear ramp from `start` to `end` over `n` bars.
    pub(crate) fn ramp(start: f64, end: f64, n: usize) -> Vec<PriceBar> {
        let closes: Vec<f64> = (0..n)
            .map(|i| start + (end - start) * i as f64 / (n - 1) as f64)
            .collect();
        make_series(&closes)
    }

    #[test]
    fn trailing_sma_short_series_is_none() {
        let series = make_series(&[10.0, 11.0, 12.0]);
        assert_eq!(trailing_sma(&series, 4), None);
        assert_eq!(trailing_sma(&[], 1), None);
    }

    #[test]
    fn trailing_sma_uses_last_window() {
        let series = make_series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        // mean(3, 4, 5) = 4.0
        assert_eq!(trailing_sma(&series, 3), Some(4.0));
        // full window
        assert_eq!(trailing_sma(&series, 5), Some(3.0));
    }

    #[test]
    fn momentum_insufficient_history_is_lowest_bucket() {
        assert_eq!(momentum_score(&[]), 1);
        // 49 bars of a strong rally still score 1
        assert_eq!(momentum_score(&ramp(100.0, 200.0, 49)), 1);
        // 50 bars is enough
        assert_eq!(momentum_score(&ramp(100.0, 200.0, 50)), 7);
    }

    #[test]
    fn momentum_top_bucket_needs_dma_confirmation() {
        // 60 bars up 50%: return qualifies for 10 but the 200 DMA is
        // undefined, so the trend condition is false and the bucket caps at 7.
        assert_eq!(momentum_score(&ramp(100.0, 150.0, 60)), 7);

        // 250 bars up 50%: last close sits above the 200 DMA of a rising
        // series, so the top bucket applies.
        assert_eq!(momentum_score(&ramp(100.0, 150.0, 250)), 10);
    }

    #[test]
    fn momentum_middle_and_bottom_buckets() {
        assert_eq!(momentum_score(&ramp(100.0, 115.0, 60)), 7);
        assert_eq!(momentum_score(&ramp(100.0, 105.0, 60)), 4);
        assert_eq!(momentum_score(&ramp(100.0, 100.0, 60)), 1);
        assert_eq!(momentum_score(&ramp(100.0, 80.0, 60)), 1);
    }

    #[test]
    fn quality_buckets() {
        assert_eq!(quality_score(Some(0.21)), 10);
        assert_eq!(quality_score(Some(0.16)), 7);
        assert_eq!(quality_score(Some(0.11)), 4);
        assert_eq!(quality_score(Some(0.05)), 1);
        assert_eq!(quality_score(None), 4);
    }

    #[test]
    fn valuation_buckets() {
        assert_eq!(valuation_score(Some(14.0)), 10);
        assert_eq!(valuation_score(Some(24.0)), 7);
        assert_eq!(valuation_score(Some(39.0)), 4);
        assert_eq!(valuation_score(Some(100.0)), 1);
        assert_eq!(valuation_score(None), 4);
    }

    #[test]
    fn stability_buckets() {
        assert_eq!(stability_score(Some(0.2)), 10);
        assert_eq!(stability_score(Some(0.5)), 7);
        assert_eq!(stability_score(Some(0.9)), 4);
        assert_eq!(stability_score(Some(2.5)), 1);
        assert_eq!(stability_score(None), 4);
    }

    #[test]
    fn boundary_values_fall_in_exactly_one_bucket() {
        // Thresholds are strict comparisons; landing exactly on one falls
        // into the lower bucket.
        assert_eq!(quality_score(Some(0.20)), 7);
        assert_eq!(quality_score(Some(0.10)), 1);
        assert_eq!(valuation_score(Some(15.0)), 7);
        assert_eq!(valuation_score(Some(40.0)), 1);
        assert_eq!(stability_score(Some(0.3)), 7);
        assert_eq!(stability_score(Some(1.0)), 1);
    }
}
