//! Serde helpers for monetary amounts.
//!
//! The remote site administration API exchanges amounts as plain JSON
//! numbers in whole currency units. Incoming values may be integers, floats,
//! numeric strings or `null`; outgoing values are written as JSON integers
//! whenever the amount is integral.
//!
//! Amounts are bounded by [`MAX_AMOUNT`] in magnitude, so summing every
//! amount on a record stays far inside `Decimal`'s range.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

/// Largest accepted magnitude for a single amount: 10^15 currency units.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Returns true if `amount` is within `-MAX_AMOUNT..=MAX_AMOUNT`.
pub fn is_within_limit(amount: &Decimal) -> bool {
    amount.abs() <= MAX_AMOUNT
}

/// Serializes an amount as a JSON integer when integral, otherwise as a float.
pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract().is_zero() {
        if let Some(whole) = value.to_i64() {
            return serializer.serialize_i64(whole);
        }
    }
    match value.to_f64() {
        Some(float) => serializer.serialize_f64(float),
        None => serializer.serialize_str(&value.to_string()),
    }
}

/// Deserializes an amount, treating `null` as zero. Amounts beyond
/// [`MAX_AMOUNT`] are rejected.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = Option::<Decimal>::deserialize(deserializer)?.unwrap_or_default();
    if !is_within_limit(&amount) {
        return Err(D::Error::custom(format!(
            "amount {amount} is out of range (limit {MAX_AMOUNT})"
        )));
    }
    Ok(amount)
}
