use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::storage::StorageError;

/// Failures that abort the whole import.
///
/// Batches committed before the failure stay in the database.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("CSV file '{}' not found!", .0.display())]
    InputNotFound(PathBuf),
    #[error("Failed to read CSV input: {0}")]
    Input(#[from] csv::Error),
    #[error("{0}")]
    Storage(#[from] StorageError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error)
}
