use std::num::ParseFloatError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PriceError {
    #[error("Price error: {0}")]
    InvalidFormat(#[from] ParseFloatError),
    #[error("Price error: {0} is not a finite number")]
    NotFinite(f64),
    #[error("Price error: {0} is not positive")]
    NotPositive(f64),
    #[error("Price error: {0} cannot be represented as a decimal")]
    Unrepresentable(f64)
}
