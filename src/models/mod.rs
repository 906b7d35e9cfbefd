mod errors;
mod raw_row;
mod transaction;

pub use errors::RowError;
pub use raw_row::RawRow;
pub use transaction::{transform_row, TransactionRecord};
