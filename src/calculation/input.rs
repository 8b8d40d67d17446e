//! Parsing of raw user input for editable payroll fields.
//!
//! Parsing always yields a `Result`; what happens to unparseable input is
//! decided by a [`NumericInputPolicy`] supplied by the caller.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::money;

/// What to do with input that does not parse as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericInputPolicy {
    /// Treat invalid input as zero and carry on. This is how the site
    /// administration front-end has always behaved.
    #[default]
    DefaultToZero,
    /// Return [`EngineError::InvalidInput`] (or
    /// [`EngineError::AmountOutOfRange`]) and leave the record unchanged.
    Reject,
}

impl NumericInputPolicy {
    /// The snake_case name used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            NumericInputPolicy::DefaultToZero => "default_to_zero",
            NumericInputPolicy::Reject => "reject",
        }
    }

    fn zeroes_invalid_input(&self) -> bool {
        *self == NumericInputPolicy::DefaultToZero
    }
}

impl fmt::Display for NumericInputPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NumericInputPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "default_to_zero" => Ok(NumericInputPolicy::DefaultToZero),
            "reject" => Ok(NumericInputPolicy::Reject),
            other => Err(format!(
                "unknown numeric input policy '{other}' (expected 'default_to_zero' or 'reject')"
            )),
        }
    }
}

/// Strips whitespace and ASCII comma grouping, e.g. `" 1,000,000 "`.
fn normalize(raw: &str) -> String {
    raw.trim().chars().filter(|c| *c != ',').collect()
}

/// Parses a monetary amount. Empty input is zero.
///
/// Exponent notation such as `"1e5"` is accepted, matching how a browser
/// coerces the same text. Amounts beyond [`money::MAX_AMOUNT`] in magnitude
/// are [`EngineError::AmountOutOfRange`].
///
/// # Examples
///
/// ```
/// use site_payroll::calculation::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount("incomeTax", "1,500,000").unwrap(), Decimal::from(1_500_000));
/// assert_eq!(parse_amount("incomeTax", "1e5").unwrap(), Decimal::from(100_000));
/// assert_eq!(parse_amount("incomeTax", "").unwrap(), Decimal::ZERO);
/// assert!(parse_amount("incomeTax", "abc").is_err());
/// ```
pub fn parse_amount(field: &str, raw: &str) -> EngineResult<Decimal> {
    let cleaned = normalize(raw);
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let amount = Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| EngineError::InvalidInput {
            field: field.to_string(),
            value: raw.to_string(),
        })?;
    if !money::is_within_limit(&amount) {
        return Err(EngineError::AmountOutOfRange {
            field: field.to_string(),
            value: raw.to_string(),
        });
    }
    Ok(amount)
}

/// Parses a day count. Empty input clears the value.
pub fn parse_days(field: &str, raw: &str) -> EngineResult<Option<u32>> {
    let cleaned = normalize(raw);
    if cleaned.is_empty() {
        return Ok(None);
    }
    cleaned
        .parse::<u32>()
        .map(Some)
        .map_err(|_| EngineError::InvalidInput {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

/// Parses a monetary amount and applies `policy` to invalid input.
///
/// Out-of-range amounts count as invalid input.
pub fn amount_with_policy(
    field: &str,
    raw: &str,
    policy: NumericInputPolicy,
) -> EngineResult<Decimal> {
    match parse_amount(field, raw) {
        Err(EngineError::InvalidInput { .. } | EngineError::AmountOutOfRange { .. })
            if policy.zeroes_invalid_input() =>
        {
            Ok(Decimal::ZERO)
        }
        parsed => parsed,
    }
}

/// Parses a day count and applies `policy` to invalid input.
///
/// Under [`NumericInputPolicy::DefaultToZero`] invalid input becomes
/// `Some(0)`, not `None`, so the field stays populated.
pub fn days_with_policy(
    field: &str,
    raw: &str,
    policy: NumericInputPolicy,
) -> EngineResult<Option<u32>> {
    match parse_days(field, raw) {
        Err(EngineError::InvalidInput { .. }) if policy.zeroes_invalid_input() => Ok(Some(0)),
        parsed => parsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parses_plain_and_grouped_amounts() {
        assert_eq!(parse_amount("incomeTax", "50000").unwrap(), dec("50000"));
        assert_eq!(parse_amount("incomeTax", " 50,000 ").unwrap(), dec("50000"));
        assert_eq!(parse_amount("incomeTax", "-1200").unwrap(), dec("-1200"));
        assert_eq!(parse_amount("incomeTax", "12.5").unwrap(), dec("12.5"));
    }

    #[test]
    fn test_blank_amount_is_zero() {
        assert_eq!(parse_amount("incomeTax", "   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_invalid_amount_reports_field_and_raw_value() {
        let err = parse_amount("localIncomeTax", "12abc").unwrap_err();
        match err {
            EngineError::InvalidInput { field, value } => {
                assert_eq!(field, "localIncomeTax");
                assert_eq!(value, "12abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_default_to_zero_policy_zeroes_invalid_amount() {
        let amount =
            amount_with_policy("incomeTax", "abc", NumericInputPolicy::DefaultToZero).unwrap();
        assert_eq!(amount, Decimal::ZERO);
    }

    #[test]
    fn test_reject_policy_surfaces_invalid_amount() {
        let result = amount_with_policy("incomeTax", "abc", NumericInputPolicy::Reject);
        assert!(matches!(result, Err(EngineError::InvalidInput { .. })));
    }

    #[test]
    fn test_exponent_notation_is_accepted() {
        assert_eq!(parse_amount("incomeTax", "1e5").unwrap(), dec("100000"));
        assert_eq!(parse_amount("incomeTax", "2.5e3").unwrap(), dec("2500"));
        assert_eq!(parse_amount("incomeTax", "-1e2").unwrap(), dec("-100"));
        assert!(parse_amount("incomeTax", "1e").is_err());
    }

    #[test]
    fn test_amount_beyond_limit_is_out_of_range() {
        let max = "79228162514264337593543950335";
        let err = parse_amount("incomeTax", max).unwrap_err();
        assert!(matches!(
            err,
            EngineError::AmountOutOfRange { ref field, ref value }
                if field == "incomeTax" && value == max
        ));
        assert!(matches!(
            parse_amount("incomeTax", "1,000,000,000,000,001"),
            Err(EngineError::AmountOutOfRange { .. })
        ));
        assert!(matches!(
            parse_amount("incomeTax", "-1e16"),
            Err(EngineError::AmountOutOfRange { .. })
        ));
        assert_eq!(
            parse_amount("incomeTax", "1,000,000,000,000,000").unwrap(),
            money::MAX_AMOUNT
        );
    }

    #[test]
    fn test_out_of_range_follows_policy() {
        let huge = "1e20";
        assert_eq!(
            amount_with_policy("incomeTax", huge, NumericInputPolicy::DefaultToZero).unwrap(),
            Decimal::ZERO
        );
        assert!(matches!(
            amount_with_policy("incomeTax", huge, NumericInputPolicy::Reject),
            Err(EngineError::AmountOutOfRange { .. })
        ));
    }

    #[test]
    fn test_days_parse_and_clear() {
        assert_eq!(parse_days("retirementDeductionDays", "22").unwrap(), Some(22));
        assert_eq!(parse_days("retirementDeductionDays", "").unwrap(), None);
        assert!(parse_days("retirementDeductionDays", "-3").is_err());
    }

    #[test]
    fn test_days_policy_handling() {
        let field = "retirementDeductionDays";
        assert_eq!(
            days_with_policy(field, "x", NumericInputPolicy::DefaultToZero).unwrap(),
            Some(0)
        );
        assert_eq!(
            days_with_policy(field, "", NumericInputPolicy::DefaultToZero).unwrap(),
            None
        );
        assert_eq!(
            days_with_policy(field, "15", NumericInputPolicy::Reject).unwrap(),
            Some(15)
        );
        assert!(days_with_policy(field, "x", NumericInputPolicy::Reject).is_err());
    }

    #[test]
    fn test_policy_parses_from_config_names() {
        assert_eq!(
            "reject".parse::<NumericInputPolicy>().unwrap(),
            NumericInputPolicy::Reject
        );
        assert_eq!(
            "default_to_zero".parse::<NumericInputPolicy>().unwrap(),
            NumericInputPolicy::DefaultToZero
        );
        assert!("strict".parse::<NumericInputPolicy>().is_err());
    }

    #[test]
    fn test_default_policy_is_permissive() {
        assert_eq!(NumericInputPolicy::default(), NumericInputPolicy::DefaultToZero);
    }
}
