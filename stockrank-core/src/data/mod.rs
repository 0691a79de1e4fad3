//! Market data access: provider trait, Yahoo Finance implementation,
//! exchange listings, and CSV table persistence.

pub mod provider;
pub mod table;
pub mod universe;
pub mod yahoo;

pub use provider::{DataError, MarketData, MarketDataProvider};
pub use table::{read_rows, read_symbols, write_rows, write_symbols, TableError};
pub use universe::{ExchangeListings, UniverseFetch};
pub use yahoo::YahooProvider;
