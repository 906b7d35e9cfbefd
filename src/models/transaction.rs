use chrono::{Local, NaiveDateTime};

use crate::models::{RawRow, RowError};
use crate::normalize::{clean_value, normalize_customer_id, parse_date, parse_quantity};
use crate::types::Price;

/// A normalized retail transaction, ready to be written to storage.
///
/// `quantity`, `invoice_date` and `price` are always populated thanks to their
/// fallback defaults, every other field may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub invoice: Option<String>,
    pub stock_code: Option<String>,
    pub description: Option<String>,
    pub quantity: i64,
    /// Falls back to the local time of the import when the source date is unreadable.
    pub invoice_date: NaiveDateTime,
    pub price: Price,
    pub customer_id: Option<String>,
    pub country: Option<String>
}

impl TransactionRecord {
    /// Builds a record from a raw row, applying each field's fallback independently.
    ///
    /// # Errors
    /// Returns `RowError::Price` when the price is a valid number too large to store.
    pub fn from_row(row: &RawRow) -> Result<Self, RowError> {
        //NOTE: Defaulting an unreadable date to "now" instead of rejecting the row is the historical
        //      behaviour of this import and downstream reports rely on the row being present.
        let invoice_date = row.invoice_date.as_deref()
            .and_then(parse_date)
            .unwrap_or_else(|| Local::now().naive_local());

        let price = Price::or_minimum(row.price.as_deref()).map_err(|source| RowError::Price {
            value: row.price.clone().unwrap_or_default(),
            source
        })?;

        Ok(Self {
            invoice: clean_value(row.invoice.as_deref()),
            stock_code: clean_value(row.stock_code.as_deref()),
            description: clean_value(row.description.as_deref()),
            quantity: parse_quantity(row.quantity.as_deref()),
            invoice_date,
            price,
            customer_id: normalize_customer_id(row.customer_id.as_deref()),
            country: clean_value(row.country.as_deref())
        })
    }
}

/// Turns the outcome of reading one CSV row into either a record or the reason it was skipped.
pub fn transform_row(row: Result<RawRow, csv::Error>) -> Result<TransactionRecord, RowError> {
    TransactionRecord::from_row(&row?)
}
