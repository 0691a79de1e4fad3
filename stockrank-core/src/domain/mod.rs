//! Domain types shared by data access and scoring.

pub mod bar;
pub mod fundamentals;

pub use bar::PriceBar;
pub use fundamentals::FundamentalsSnapshot;
