use std::mem;

use tracing::info;

use crate::models::TransactionRecord;
use crate::storage::{Storage, StorageError};

/// Buffers records and writes them to storage in fixed-size batches.
pub struct BatchLoader<S: Storage> {
    storage: S,
    batch: Vec<TransactionRecord>,
    batch_size: usize,
    imported: u64
}

impl<S: Storage> BatchLoader<S> {
    pub fn new(storage: S, batch_size: usize) -> Self {
        let batch_size = batch_size.max(1);

        Self {
            storage,
            batch: Vec::with_capacity(batch_size),
            batch_size,
            imported: 0
        }
    }

    /// Buffers a record, flushing once the batch is full.
    ///
    /// Returns the cumulative number of imported rows when a flush happened.
    ///
    /// # Errors
    /// Returns `StorageError` if the flush fails. The rows of that batch are dropped,
    /// earlier batches are already committed.
    pub fn push(&mut self, record: TransactionRecord) -> Result<Option<u64>, StorageError> {
        self.batch.push(record);

        if self.batch.len() < self.batch_size {
            return Ok(None);
        }

        self.flush().map(Some)
    }

    /// Writes and commits the buffered records, then clears the buffer.
    pub fn flush(&mut self) -> Result<u64, StorageError> {
        if self.batch.is_empty() {
            return Ok(self.imported);
        }

        let batch = mem::replace(&mut self.batch, Vec::with_capacity(self.batch_size));
        self.storage.insert_batch(&batch)?;
        self.imported += batch.len() as u64;

        info!("Flushed batch of {} records ({} imported so far)", batch.len(), self.imported);

        Ok(self.imported)
    }

    /// Flushes whatever is left and hands the storage back with the final row count.
    pub fn finish(mut self) -> Result<(S, u64), StorageError> {
        let imported = self.flush()?;

        Ok((self.storage, imported))
    }
}
