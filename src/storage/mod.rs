mod errors;
mod sqlite_storage;

use crate::models::TransactionRecord;

pub use errors::StorageError;
pub use sqlite_storage::SqliteStorage;

/// Destination for normalized transaction records.
pub trait Storage {
    /// Inserts every record of the batch and commits them as one unit.
    fn insert_batch(&mut self, batch: &[TransactionRecord]) -> Result<(), StorageError>;

    /// Total number of rows currently stored.
    fn count(&self) -> Result<u64, StorageError>;
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn insert_batch(&mut self, batch: &[TransactionRecord]) -> Result<(), StorageError> {
        (**self).insert_batch(batch)
    }

    fn count(&self) -> Result<u64, StorageError> {
        (**self).count()
    }
}
