//! CSV table persistence — the symbol table in, the result table out.
//!
//! The symbol table is a single `Stock` column. The result table keeps that
//! column and adds `Rank`, `Flags`, and `Action`, so a result file can be
//! fed back in as a symbol table for the next run.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rank::RankRow;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to open table {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("csv error in {path}: {message}")]
    Csv { path: String, message: String },
}

#[derive(Debug, Serialize, Deserialize)]
struct SymbolRecord {
    #[serde(rename = "Stock")]
    stock: String,
}

/// Read the ordered symbol list from the `Stock` column. Blank cells are
/// dropped; order is preserved.
pub fn read_symbols(path: &Path) -> Result<Vec<String>, TableError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| map_csv(path, e))?;

    let mut symbols = Vec::new();
    for record in reader.deserialize::<SymbolRecord>() {
        let record = record.map_err(|e| map_csv(path, e))?;
        let symbol = record.stock.trim().to_string();
        if !symbol.is_empty() {
            symbols.push(symbol);
        }
    }

    Ok(symbols)
}

/// Write the symbol table with a `Stock` header.
pub fn write_symbols(path: &Path, symbols: &[String]) -> Result<(), TableError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| map_csv(path, e))?;

    for symbol in symbols {
        writer
            .serialize(SymbolRecord {
                stock: symbol.clone(),
            })
            .map_err(|e| map_csv(path, e))?;
    }

    writer.flush().map_err(|e| map_io(path, e))?;
    Ok(())
}

/// Write the result table (`Stock,Rank,Flags,Action`), one row per symbol.
pub fn write_rows(path: &Path, rows: &[RankRow]) -> Result<(), TableError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| map_csv(path, e))?;

    for row in rows {
        writer.serialize(row).map_err(|e| map_csv(path, e))?;
    }

    writer.flush().map_err(|e| map_io(path, e))?;
    Ok(())
}

/// Read a result table back, mostly for inspection and tests.
pub fn read_rows(path: &Path) -> Result<Vec<RankRow>, TableError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| map_csv(path, e))?;

    let mut rows = Vec::new();
    for record in reader.deserialize::<RankRow>() {
        rows.push(record.map_err(|e| map_csv(path, e))?);
    }

    Ok(rows)
}

fn map_csv(path: &Path, e: csv::Error) -> TableError {
    let message = e.to_string();
    let path = path.display().to_string();
    match e.into_kind() {
        csv::ErrorKind::Io(source) => TableError::Io { path, source },
        _ => TableError::Csv { path, message },
    }
}

fn map_io(path: &Path, e: std::io::Error) -> TableError {
    TableError::Io {
        path: path.display().to_string(),
        source: e,
    }
}
