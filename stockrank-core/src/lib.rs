//! StockRank Core — scoring engine, market data access, batch ranking.
//!
//! This crate contains the heart of the screener:
//! - Domain types (price bars, fundamentals snapshots)
//! - Per-signal sub-scores mapping raw inputs onto {1, 4, 7, 10} buckets
//! - Sanity-check flags that can veto a high-scoring symbol
//! - Composite rank and the BUY/WATCH/IGNORE decision
//! - Market data provider trait with the Yahoo Finance implementation
//! - Symbol universe retrieval from NSE and BSE listings
//! - Sequential batch orchestration producing one result row per symbol

pub mod data;
pub mod domain;
pub mod rank;
pub mod scoring;
