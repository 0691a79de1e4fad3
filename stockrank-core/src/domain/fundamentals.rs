//! FundamentalsSnapshot — optional ratio fields as reported by the provider.

use serde::{Deserialize, Serialize};

/// Point-in-time fundamental ratios for a single symbol.
///
/// Every field may be absent: providers omit ratios they cannot compute
/// (negative equity, no trailing earnings, unreported debt). Absent means
/// unknown, never zero — scoring maps unknown onto the neutral bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FundamentalsSnapshot {
    /// Return on equity as a fraction (0.18 = 18%).
    pub return_on_equity: Option<f64>,
    /// Trailing twelve-month price-to-earnings ratio.
    pub trailing_pe: Option<f64>,
    /// Debt-to-equity in the provider-reported scale. The stability buckets
    /// read it as a plain multiple while the high-debt flag fires above 1;
    /// the two thresholds are independent and deliberately not reconciled.
    pub debt_to_equity: Option<f64>,
}

impl FundamentalsSnapshot {
    /// Snapshot with every field unknown.
    pub fn empty() -> Self {
        Self::default()
    }
}
