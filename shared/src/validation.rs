//! Input validation for the scanner UI payloads
//!
//! The UI sends prices and quantities either as JSON numbers or as strings
//! typed into form fields, so the parsers here accept both.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{de::Error as _, Deserialize, Deserializer};
use serde_json::Value;

/// Longest barcode accepted by the catalog
pub const MAX_BARCODE_LEN: usize = 128;

/// Prices are stored as NUMERIC(12,2)
const MAX_PRICE_SCALE: u32 = 2;
const MAX_PRICE_INTEGER_DIGITS: u32 = 10;

// ============================================================================
// Identifiers
// ============================================================================

/// Validate a scanned barcode and return it trimmed
pub fn validate_barcode(barcode: &str) -> Result<String, &'static str> {
    let barcode = barcode.trim();
    if barcode.is_empty() {
        return Err("Barcode is required");
    }
    if barcode.chars().count() > MAX_BARCODE_LEN {
        return Err("Barcode must be at most 128 characters");
    }
    if barcode.chars().any(char::is_control) {
        return Err("Barcode cannot contain control characters");
    }
    Ok(barcode.to_string())
}

/// Blank strings become `None`, everything else is trimmed
pub fn normalize_optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Barcode as text; scanners that emit EAN/UPC codes often send them as
/// JSON numbers. `null` reads as an empty barcode.
pub fn barcode_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        Value::Number(n) if n.is_u64() || n.is_i64() => Ok(n.to_string()),
        _ => Err(D::Error::custom("barcode must be a string or a whole number")),
    }
}

/// Keeps `null` apart from a missing key: a present key yields `Some`,
/// with `Some(None)` for an explicit `null`. Use with `#[serde(default)]`.
pub fn supplied<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ============================================================================
// Money
// ============================================================================

/// Parse a non-negative price with at most two fractional digits
pub fn parse_price(value: &Value) -> Result<Decimal, &'static str> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err("Price must be a number"),
    };

    let price = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| "Price must be a number")?;

    if price.is_sign_negative() && !price.is_zero() {
        return Err("Price cannot be negative");
    }
    let price = price.normalize();
    if price.scale() > MAX_PRICE_SCALE {
        return Err("Price cannot have more than 2 decimal places");
    }
    if price.trunc() >= Decimal::from(10u64.pow(MAX_PRICE_INTEGER_DIGITS)) {
        return Err("Price is too large");
    }
    // `normalize` turns -0 into 0 but keep the sign explicit
    Ok(price.abs())
}

// ============================================================================
// Quantities
// ============================================================================

fn parse_whole_number(value: &Value) -> Result<i64, &'static str> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if n.is_u64() {
                Err("Quantity is too large")
            } else {
                let f = n.as_f64().ok_or("Quantity must be a whole number")?;
                if f.fract() != 0.0 || !f.is_finite() {
                    return Err("Quantity must be a whole number");
                }
                if f.abs() > i64::MAX as f64 {
                    return Err("Quantity is too large");
                }
                Ok(f as i64)
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| "Quantity must be a whole number"),
        _ => Err("Quantity must be a whole number"),
    }
}

/// Parse a stock level (zero allowed)
pub fn parse_stock_quantity(value: &Value) -> Result<i32, &'static str> {
    let quantity = parse_whole_number(value)?;
    if quantity < 0 {
        return Err("Quantity cannot be negative");
    }
    i32::try_from(quantity).map_err(|_| "Quantity is too large")
}

/// Parse the quantity of a receipt or sale (must be positive)
pub fn parse_movement_quantity(value: &Value) -> Result<i32, &'static str> {
    let quantity = parse_whole_number(value)?;
    if quantity <= 0 {
        return Err("Quantity must be greater than 0");
    }
    i32::try_from(quantity).map_err(|_| "Quantity is too large")
}
