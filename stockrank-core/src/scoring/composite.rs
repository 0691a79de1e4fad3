//! Composite rank and the final BUY/WATCH/IGNORE decision.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{FundamentalsSnapshot, PriceBar};
use crate::scoring::flags::{sanity_checks, Flag};
use crate::scoring::subscores::{
    momentum_score, quality_score, stability_score, valuation_score,
};

pub const MOMENTUM_WEIGHT: f64 = 0.20;
pub const QUALITY_WEIGHT: f64 = 0.20;
pub const VALUATION_WEIGHT: f64 = 0.20;
pub const STABILITY_WEIGHT: f64 = 0.15;

/// Rank threshold for BUY (also requires zero flags).
pub const BUY_THRESHOLD: f64 = 8.0;
/// Rank threshold for WATCH (tolerates one flag).
pub const WATCH_THRESHOLD: f64 = 6.0;

/// What to do with a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "WATCH")]
    Watch,
    #[serde(rename = "IGNORE")]
    Ignore,
    /// Data retrieval or scoring failed for the symbol; the row carries the
    /// error message instead of flags.
    #[serde(rename = "ERROR")]
    Error,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Buy => "BUY",
            Action::Watch => "WATCH",
            Action::Ignore => "IGNORE",
            Action::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// Scoring result for one symbol on frozen inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    /// Weighted composite, rounded to 2 decimals.
    pub rank: f64,
    pub flags: Vec<Flag>,
    pub action: Action,
}

/// Weighted sum of the four sub-score buckets, rounded to 2 decimals.
///
/// The weights sum to 0.75, so the rank lives in [0.75, 7.5]; the BUY and
/// WATCH thresholds are only reachable if the weights change.
pub fn composite_score(momentum: u8, quality: u8, valuation: u8, stability: u8) -> f64 {
    let rank = f64::from(momentum) * MOMENTUM_WEIGHT
        + f64::from(quality) * QUALITY_WEIGHT
        + f64::from(valuation) * VALUATION_WEIGHT
        + f64::from(stability) * STABILITY_WEIGHT;
    round2(rank)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Map a rank and its flags onto an action. BUY is checked before WATCH, so
/// a high rank that fails BUY's zero-flag test can still fall to WATCH.
pub fn decide(rank: f64, flags: &[Flag]) -> Action {
    if rank >= BUY_THRESHOLD && flags.is_empty() {
        Action::Buy
    } else if rank >= WATCH_THRESHOLD && flags.len() <= 1 {
        Action::Watch
    } else {
        Action::Ignore
    }
}

/// Score one symbol's frozen data: sub-scores, composite rank, sanity flags,
/// decision. Pure and total — any series length and any combination of
/// missing fundamentals produces a scorecard, never an error.
pub fn scorecard(series: &[PriceBar], fundamentals: &FundamentalsSnapshot) -> Scorecard {
    let rank = composite_score(
        momentum_score(series),
        quality_score(fundamentals.return_on_equity),
        valuation_score(fundamentals.trailing_pe),
        stability_score(fundamentals.debt_to_equity),
    );
    let flags = sanity_checks(series, fundamentals);
    let action = decide(rank, &flags);

    Scorecard { rank, flags, action }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_weights_and_rounding() {
        // 10*0.20 + 7*0.20 + 4*0.20 + 1*0.15 = 4.35
        assert_eq!(composite_score(10, 7, 4, 1), 4.35);
        // all-neutral inputs
        assert_eq!(composite_score(4, 4, 4, 4), 3.0);
    }

    #[test]
    fn composite_bounds() {
        assert_eq!(composite_score(1, 1, 1, 1), 0.75);
        assert_eq!(composite_score(10, 10, 10, 10), 7.5);
    }

    #[test]
    fn buy_requires_zero_flags() {
        assert_eq!(decide(8.5, &[]), Action::Buy);
        // Fails BUY's zero-flag test but passes WATCH's looser one.
        assert_eq!(decide(8.5, &[Flag::HighDebt]), Action::Watch);
        assert_eq!(decide(8.5, &[Flag::HighDebt, Flag::VeryExpensive]), Action::Ignore);
    }

    #[test]
    fn low_rank_is_ignored_even_clean() {
        assert_eq!(decide(5.0, &[]), Action::Ignore);
    }

    #[test]
    fn watch_tolerates_one_flag() {
        assert_eq!(decide(6.0, &[Flag::Below200Dma]), Action::Watch);
        assert_eq!(decide(6.0, &[Flag::Below200Dma, Flag::HighDebt]), Action::Ignore);
    }

    #[test]
    fn scorecard_on_empty_inputs_is_neutral_ignore() {
        let card = scorecard(&[], &FundamentalsSnapshot::empty());
        // momentum 1, everything else neutral: 1*0.20 + 4*0.20 + 4*0.20 + 4*0.15
        assert_eq!(card.rank, 2.4);
        assert!(card.flags.is_empty());
        assert_eq!(card.action, Action::Ignore);
    }

    #[test]
    fn scorecard_is_deterministic_on_frozen_inputs() {
        let fundamentals = FundamentalsSnapshot {
            return_on_equity: Some(0.22),
            trailing_pe: Some(12.0),
            debt_to_equity: Some(0.2),
        };
        let first = scorecard(&[], &fundamentals);
        let second = scorecard(&[], &fundamentals);
        assert_eq!(first, second);
    }
}
