use std::io::Read;

use csv::{Reader, ReaderBuilder, Trim};
use serde::Deserialize;

/// A single row of the retail export exactly as it appears in the CSV file.
///
/// Every column is optional: blank cells, missing columns and short rows all
/// deserialize to `None` and are resolved later by [`TransactionRecord::from_row`].
///
/// [`TransactionRecord::from_row`]: crate::models::TransactionRecord::from_row
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRow {
    #[serde(rename = "Invoice")]
    pub invoice: Option<String>,
    #[serde(rename = "StockCode")]
    pub stock_code: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Quantity")]
    pub quantity: Option<String>,
    #[serde(rename = "InvoiceDate")]
    pub invoice_date: Option<String>,
    #[serde(rename = "Price")]
    pub price: Option<String>,
    #[serde(rename = "Customer ID")]
    pub customer_id: Option<String>,
    #[serde(rename = "Country")]
    pub country: Option<String>
}

impl RawRow {
    /// Builds a reader for the retail export.
    ///
    /// Only headers are trimmed: a whitespace-only quantity is not the same as an empty one,
    /// so cells reach the normalizers verbatim and each of them trims on its own.
    pub fn reader<R: Read>(input: R) -> Reader<R> {
        ReaderBuilder::new()
            .trim(Trim::Headers)
            .flexible(true)
            .from_reader(input)
    }
}
