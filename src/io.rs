//! Import and export of solve lists as JSON or CSV text.
//!
//! Both formats use the record shape the browser stores: camelCase field
//! names, penalty as `"+2"` / `"DNF"` / empty, RFC 3339 timestamps.

use crate::Solve;
use log::info;
use std::fmt;

#[derive(Debug)]
pub enum TransferError {
    Json(serde_json::Error),
    Csv(csv::Error),
    Io(std::io::Error),
    Utf8(std::string::FromUtf8Error),
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::Json(e) => write!(f, "Invalid solve JSON: {}", e),
            TransferError::Csv(e) => write!(f, "Invalid solve CSV: {}", e),
            TransferError::Io(e) => write!(f, "Failed to write solves: {}", e),
            TransferError::Utf8(e) => write!(f, "Exported solves are not valid UTF-8: {}", e),
        }
    }
}

impl std::error::Error for TransferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransferError::Json(e) => Some(e),
            TransferError::Csv(e) => Some(e),
            TransferError::Io(e) => Some(e),
            TransferError::Utf8(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for TransferError {
    fn from(e: serde_json::Error) -> Self {
        TransferError::Json(e)
    }
}

impl From<csv::Error> for TransferError {
    fn from(e: csv::Error) -> Self {
        TransferError::Csv(e)
    }
}

pub fn solves_to_json(solves: &[Solve]) -> Result<String, TransferError> {
    Ok(serde_json::to_string_pretty(solves)?)
}

pub fn solves_from_json(json: &str) -> Result<Vec<Solve>, TransferError> {
    let solves: Vec<Solve> = serde_json::from_str(json)?;
    info!("Loaded {} solves from JSON", solves.len());
    Ok(solves)
}

/// Write solves as CSV with a header row.
pub fn solves_to_csv(solves: &[Solve]) -> Result<String, TransferError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for solve in solves {
        writer.serialize(solve)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| TransferError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(TransferError::Utf8)
}

/// Read solves from CSV text with a header row. The first malformed row aborts the import.
pub fn solves_from_csv(csv_content: &str) -> Result<Vec<Solve>, TransferError> {
    let mut reader = csv::Reader::from_reader(csv_content.as_bytes());
    let solves = reader
        .deserialize()
        .collect::<Result<Vec<Solve>, csv::Error>>()?;
    info!("Loaded {} solves from CSV content", solves.len());
    Ok(solves)
}
