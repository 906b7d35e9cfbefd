use crate::types::errors::PriceError;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A strictly positive unit price.
///
/// Values that cannot be parsed, or that are not positive, never reach storage:
/// [`Price::or_minimum`] substitutes [`Price::MINIMUM`] for them. Values too large for a
/// decimal are reported instead, they are real prices and must not be rewritten.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub struct Price(Decimal);

impl Price {
    /// Sentinel used whenever the source value is missing, malformed or non-positive.
    pub const MINIMUM: Price = Price(Decimal::from_parts(1, 0, 0, false, 2));

    /// Parses a raw price cell, falling back to [`Price::MINIMUM`] when it is malformed or not positive.
    ///
    /// An absent cell counts as zero and therefore also maps to the minimum. Positive values
    /// below the minimum are raised to it, the target column only keeps two decimal places.
    ///
    /// # Errors
    /// Returns `PriceError::Unrepresentable` for positive values beyond the decimal range.
    pub fn or_minimum(raw: Option<&str>) -> Result<Price, PriceError> {
        let Some(value) = raw else {
            return Ok(Price::MINIMUM)
        };

        match Price::from_str(value) {
            Ok(price) => Ok(price.max(Price::MINIMUM)),
            Err(error @ PriceError::Unrepresentable(_)) => Err(error),
            Err(_) => Ok(Price::MINIMUM)
        }
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl Display for Price {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        let float: f64 = value.parse()?;

        if !float.is_finite() {
            return Err(PriceError::NotFinite(float));
        }

        if float <= 0.0 {
            return Err(PriceError::NotPositive(float));
        }

        //NOTE: The float is only used for validation, the stored value comes from the source text so
        //      that "2.55" stays exactly 2.55 instead of its nearest binary approximation.
        let decimal = Decimal::from_str(value)
            .or_else(|_| Decimal::from_scientific(value))
            .ok()
            .or_else(|| Decimal::from_f64(float))
            .ok_or(PriceError::Unrepresentable(float))?;

        Ok(Price(decimal.normalize()))
    }
}
