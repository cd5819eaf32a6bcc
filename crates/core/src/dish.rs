//! Dish catalog rules.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::CoreError;

/// Prices are stored with two decimal places.
pub const PRICE_SCALE: u32 = 2;

/// Parse a price typed by an admin.
///
/// Both `12.50` and `12,50` are accepted. Negative amounts are rejected and
/// the result is rounded to [`PRICE_SCALE`] places.
pub fn parse_price(raw: &str) -> Result<Decimal, CoreError> {
    let normalized = raw.trim().replace(',', ".");
    let price = Decimal::from_str(&normalized)
        .map_err(|_| CoreError::Validation(format!("Invalid price format '{raw}'")))?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(CoreError::Validation("Price cannot be negative".into()));
    }
    Ok(price.round_dp(PRICE_SCALE))
}
