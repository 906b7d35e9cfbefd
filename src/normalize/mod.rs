mod date;
mod value;

pub use date::parse_date;
pub use value::{clean_value, normalize_customer_id, parse_quantity};
