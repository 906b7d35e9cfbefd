/// Quantity substituted when a non-empty cell is not a usable number.
pub const DEFAULT_QUANTITY: i64 = 1;

/// Trims a raw cell and maps absent, blank and `nan` (any case) values to `None`.
pub fn clean_value(value: Option<&str>) -> Option<String> {
    let value = value?.trim();

    if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        return None;
    }

    Some(value.to_string())
}

/// Parses a quantity cell as a float and truncates it toward zero.
///
/// A missing or empty cell is read as `0`, anything else that does not yield a finite
/// number inside the `i64` range becomes [`DEFAULT_QUANTITY`], whitespace-only cells included.
pub fn parse_quantity(value: Option<&str>) -> i64 {
    let Some(value) = value.filter(|value| !value.is_empty()) else {
        return 0
    };

    value.trim().parse::<f64>()
        .ok()
        .and_then(truncate_to_i64)
        .unwrap_or(DEFAULT_QUANTITY)
}

/// Strips float formatting artifacts from a customer id, `"17850.0"` becomes `"17850"`.
///
/// Ids that do not parse as a finite number are dropped.
pub fn normalize_customer_id(value: Option<&str>) -> Option<String> {
    let value = clean_value(value)?;
    let number = value.parse::<f64>().ok().filter(|number| number.is_finite())?;

    //NOTE: Adding 0.0 folds a negative zero into positive zero so "-0.4" renders as "0"
    Some(format!("{:.0}", number.trunc() + 0.0))
}

fn truncate_to_i64(value: f64) -> Option<i64> {
    let truncated = value.trunc();

    //NOTE: i64::MAX is not representable as f64, the cast rounds it up to 2^63 which is already out of range
    if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        Some(truncated as i64)
    } else {
        None
    }
}
