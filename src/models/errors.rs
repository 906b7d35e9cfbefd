use csv::{ErrorKind, Position};
use thiserror::Error;

use crate::types::PriceError;

/// Reasons a CSV row is discarded instead of being imported.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("Row at line [{line}] has invalid UTF-8 in field [{field}]")]
    Encoding {
        line: u64,
        field: usize
    },
    #[error("Row at line [{line}] could not be read: {reason}")]
    Malformed {
        line: u64,
        reason: String
    },
    #[error("Price [{value}] cannot be stored: {source}")]
    Price {
        value: String,
        #[source]
        source: PriceError
    }
}

impl RowError {
    /// Line of the offending record, when the CSV reader reported one.
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::Encoding { line, .. } | Self::Malformed { line, .. } => Some(*line),
            Self::Price { .. } => None
        }
    }
}

impl From<csv::Error> for RowError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map_or(0, Position::line);

        match error.kind() {
            ErrorKind::Utf8 { err, .. } => Self::Encoding { line, field: err.field() },
            _ => Self::Malformed { line, reason: error.to_string() }
        }
    }
}
