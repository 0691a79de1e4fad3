//! Scoring engine — per-signal sub-scores, sanity flags, composite rank, decision.
//!
//! Everything here is a pure function over explicit inputs: a price series
//! and a fundamentals snapshot go in, a [`Scorecard`] comes out. No fetching,
//! no I/O, no shared state — re-scoring frozen inputs always yields the same
//! `(rank, flags, action)` triple.

pub mod composite;
pub mod flags;
pub mod subscores;

pub use composite::{composite_score, decide, scorecard, Action, Scorecard};
pub use flags::{sanity_checks, Flag};
pub use subscores::{
    momentum_score, quality_score, stability_score, trailing_sma, valuation_score,
};
