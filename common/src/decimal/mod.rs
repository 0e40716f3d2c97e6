//! Decimal type utilities for prices

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
pub use rust_decimal_macros::dec;

use crate::error::{Error, Result};

/// Price type with high precision
pub type Price = Decimal;

/// Convert a JSON number into a price.
///
/// Integers and floats are both accepted; the textual form is tried first so
/// that values like `0.1` keep their exact decimal representation. A nonzero
/// number that would round to zero is rejected.
pub fn price_from_number(number: &serde_json::Number) -> Result<Price> {
    let text = number.to_string();
    let price = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
        .or_else(|| number.as_f64().and_then(Decimal::from_f64))
        .ok_or_else(|| Error::DecimalError(format!("not representable as a price: {}", number)))?;

    if price.is_zero() && number.as_f64().map_or(false, |f| f != 0.0) {
        return Err(Error::DecimalError(format!("price underflows to zero: {}", number)));
    }
    Ok(price)
}

/// Parse a price from its textual form, accepting scientific notation
pub fn price_from_str(value: &str) -> Result<Price> {
    let value = value.trim();
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(Error::from)
}
