use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Could not open database at [{}]: {source}", path.display())]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error
    },
    #[error("{0}")]
    Query(#[from] rusqlite::Error)
}
