use std::fs::File;
use std::io::{BufReader, ErrorKind, Read, Write};

use tracing::{debug, info, warn};

use crate::config::ImportConfig;
use crate::engine::{BatchLoader, ImportError};
use crate::models::{transform_row, RawRow};
use crate::storage::{SqliteStorage, Storage};

/// Outcome of a completed import run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ImportSummary {
    /// Rows written by this run.
    pub imported: u64,
    /// Rows skipped because they could not be read.
    pub errors: u64,
    /// Rows in the table after the run, including earlier imports.
    pub stored: u64
}

/// Drives a CSV file through normalization and into storage.
pub struct Importer {
    config: ImportConfig
}

impl Importer {
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    /// Opens the configured CSV file and database, then loads every row.
    ///
    /// The input file is opened first so a missing file never touches the database.
    pub fn run<W: Write>(&self, output: &mut W) -> Result<ImportSummary, ImportError> {
        let file = File::open(&self.config.csv_path).map_err(|error| match error.kind() {
            ErrorKind::NotFound => ImportError::InputNotFound(self.config.csv_path.clone()),
            _ => ImportError::Io(error)
        })?;

        let storage = SqliteStorage::open(&self.config.database)?;
        writeln!(output, "Connected to database: {}", self.config.database.path.display())?;
        writeln!(output, "Reading CSV file: {}", self.config.csv_path.display())?;

        self.load(file, storage, output)
    }

    /// Reads CSV rows from `input`, writes normalized records to `storage` and reports progress to `output`.
    ///
    /// # Errors
    /// Unreadable rows are counted and skipped. Storage failures and I/O failures on the
    /// input stop the import immediately.
    pub fn load<R, S, W>(&self, input: R, storage: S, output: &mut W) -> Result<ImportSummary, ImportError>
    where
        R: Read,
        S: Storage,
        W: Write,
    {
        let mut reader = RawRow::reader(BufReader::new(input));

        let mut loader = BatchLoader::new(storage, self.config.batch_size);
        let mut errors: u64 = 0;

        for result in reader.deserialize::<RawRow>() {
            let result = match result {
                Err(error) if error.is_io_error() => return Err(ImportError::Input(error)),
                result => result
            };

            match transform_row(result) {
                Ok(record) => {
                    if let Some(imported) = loader.push(record)? {
                        writeln!(output, "Imported {imported} rows...")?;
                    }
                }
                Err(error) => {
                    errors += 1;
                    debug!(line = ?error.line(), "Skipping row: {error}");

                    if errors <= self.config.error_report_limit as u64 {
                        writeln!(output, "Error processing row: {error}")?;
                    }
                }
            }
        }

        let (storage, imported) = loader.finish()?;

        writeln!(output, "\nImport completed!")?;
        writeln!(output, "Total rows imported: {imported}")?;
        writeln!(output, "Errors encountered: {errors}")?;

        let stored = storage.count()?;
        writeln!(output, "Total records in database: {stored}")?;

        if errors > 0 {
            warn!("{errors} rows could not be imported");
        }

        info!("Imported {imported} rows, {stored} rows now stored");

        Ok(ImportSummary { imported, errors, stored })
    }
}
