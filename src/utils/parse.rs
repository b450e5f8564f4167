//! Lenient parsing of numeric form input

use bigdecimal::BigDecimal;
use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;

/// Parse a currency amount or percentage, falling back to zero
pub fn parse_amount(input: &str) -> BigDecimal {
    BigDecimal::from_str(input.trim()).unwrap_or_else(|_| BigDecimal::from(0))
}

/// Parse a quantity, falling back to 1 for anything that is not a
/// positive whole number
pub fn parse_quantity(input: &str) -> u32 {
    match input.trim().parse::<u32>() {
        Ok(quantity) if quantity > 0 => quantity,
        _ => 1,
    }
}

/// Deserialize a stored money or percentage value.
///
/// Older records kept these as JSON numbers. A number is read through its
/// shortest decimal text, so `99.99` stays `99.99` instead of picking up the
/// binary expansion of the float. Strings are parsed as decimals.
pub fn deserialize_decimal<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_optional_decimal(deserializer)?
        .ok_or_else(|| D::Error::custom("expected a decimal number, found null"))
}

/// Like [`deserialize_decimal`], mapping `null` to `None`
pub fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<BigDecimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(None),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text,
        other => {
            return Err(D::Error::custom(format!(
                "expected a decimal number, found {}",
                other
            )))
        }
    };

    BigDecimal::from_str(text.trim())
        .map(Some)
        .map_err(|e| D::Error::custom(format!("invalid decimal '{}': {}", text, e)))
}
