use rusqlite::{params, Connection};
use tracing::debug;

use crate::config::DatabaseConfig;
use crate::models::TransactionRecord;
use crate::storage::{Storage, StorageError};

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS raw_transactions (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    invoice      TEXT,
    stock_code   TEXT,
    description  TEXT,
    quantity     INTEGER NOT NULL,
    invoice_date TEXT NOT NULL,
    price        DECIMAL(10, 2) NOT NULL,
    customer_id  TEXT,
    country      TEXT
);
"#;

const INSERT_TRANSACTION: &str = "INSERT INTO raw_transactions \
    (invoice, stock_code, description, quantity, invoice_date, price, customer_id, country) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

/// SQLite-backed storage writing into the `raw_transactions` table.
pub struct SqliteStorage {
    connection: Connection
}

impl SqliteStorage {
    /// Opens (or creates) the database file and makes sure the target table exists.
    pub fn open(config: &DatabaseConfig) -> Result<Self, StorageError> {
        let connection = Connection::open(&config.path).map_err(|source| StorageError::Connection {
            path: config.path.clone(),
            source
        })?;

        Self::with_connection(connection)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(connection: Connection) -> Result<Self, StorageError> {
        connection.execute_batch(CREATE_TABLE)?;

        Ok(Self { connection })
    }

    #[cfg(test)]
    pub fn connection(&self) -> &Connection {
        &self.connection
    }
}

impl Storage for SqliteStorage {
    fn insert_batch(&mut self, batch: &[TransactionRecord]) -> Result<(), StorageError> {
        let transaction = self.connection.transaction()?;

        {
            let mut statement = transaction.prepare_cached(INSERT_TRANSACTION)?;

            for record in batch {
                statement.execute(params![
                    record.invoice,
                    record.stock_code,
                    record.description,
                    record.quantity,
                    record.invoice_date,
                    record.price.as_decimal().to_string(),
                    record.customer_id,
                    record.country
                ])?;
            }
        }

        transaction.commit()?;
        debug!("Committed batch of {} records", batch.len());

        Ok(())
    }

    fn count(&self) -> Result<u64, StorageError> {
        let total: i64 = self.connection.query_row("SELECT COUNT(*) FROM raw_transactions", [], |row| row.get(0))?;

        Ok(u64::try_from(total).unwrap_or_default())
    }
}
