//! Best-effort numeric coercion.
//!
//! Recommendation data is generated by a language model and enriched from
//! third-party market data feeds, so numeric fields show up as JSON numbers,
//! numeric strings, percentage strings, `"N/A"`, `null` and worse. Every
//! calculator goes through these helpers: a raw value either coerces to a
//! [`Decimal`] or yields `None`, and the caller decides what the default is.
//! Nothing here ever returns an error.

use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

/// Parse a numeric string, tolerating surrounding whitespace, an optional
/// sign, scientific notation and a single trailing `%`.
///
/// The `%` is only stripped, never interpreted: `"25%"` and `"25"` both give
/// `25`.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    let trimmed = match trimmed.strip_suffix('%') {
        Some(rest) => rest.trim_end(),
        None => trimmed,
    };
    if trimmed.is_empty() {
        return None;
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Coerce a JSON value to a [`Decimal`].
///
/// Numbers and numeric strings coerce; `null`, booleans, arrays, objects and
/// non-numeric text give `None`. A JSON number whose text form does not
/// parse goes through `f64`, so only magnitudes outside the [`Decimal`] range
/// are rejected.
pub fn coerce_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            parse_decimal(&n.to_string()).or_else(|| n.as_f64().and_then(Decimal::from_f64))
        }
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

/// Coerce an optional JSON value, substituting `default` when the value is
/// absent or does not coerce.
pub fn coerce_or(value: Option<&Value>, default: Decimal) -> Decimal {
    value.and_then(coerce_decimal).unwrap_or(default)
}

/// Round for display using round-half-to-even.
pub fn round_display(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn parses_percentage_strings() {
        assert_eq!(parse_decimal("25%"), Some(dec!(25)));
        assert_eq!(parse_decimal("-15%"), Some(dec!(-15)));
        assert_eq!(parse_decimal(" 12.5 % "), Some(dec!(12.5)));
        assert_eq!(parse_decimal("+10%"), Some(dec!(10)));
        assert_eq!(parse_decimal("40"), Some(dec!(40)));
    }

    #[test]
    fn parses_scientific_notation() {
        assert_eq!(parse_decimal("1e1"), Some(dec!(10)));
        assert_eq!(parse_decimal("2.5e-1%"), Some(dec!(0.25)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("%"), None);
        assert_eq!(parse_decimal("not-a-number"), None);
        assert_eq!(parse_decimal("N/A"), None);
        assert_eq!(parse_decimal("NaN"), None);
        assert_eq!(parse_decimal("25%%"), None);
    }

    #[test]
    fn coerces_json_values() {
        assert_eq!(coerce_decimal(&json!(1.2)), Some(dec!(1.2)));
        assert_eq!(coerce_decimal(&json!(-3)), Some(dec!(-3)));
        assert_eq!(coerce_decimal(&json!("0.9")), Some(dec!(0.9)));
        assert_eq!(coerce_decimal(&json!(null)), None);
        assert_eq!(coerce_decimal(&json!(true)), None);
        assert_eq!(coerce_decimal(&json!([1, 2])), None);
        assert_eq!(coerce_decimal(&json!({"v": 1})), None);
    }

    #[test]
    fn coerce_or_falls_back_to_default() {
        assert_eq!(coerce_or(None, Decimal::ONE), Decimal::ONE);
        assert_eq!(coerce_or(Some(&json!("N/A")), Decimal::ONE), Decimal::ONE);
        assert_eq!(coerce_or(Some(&json!(1.8)), Decimal::ONE), dec!(1.8));
    }

    #[test]
    fn display_rounding_is_half_even() {
        assert_eq!(round_display(dec!(0.125), 2), dec!(0.12));
        assert_eq!(round_display(dec!(0.135), 2), dec!(0.14));
        assert_eq!(round_display(dec!(0.1) + dec!(0.2), 1), dec!(0.3));
    }

    #[test]
    fn large_json_numbers_coerce() {
        assert_eq!(coerce_decimal(&json!(1e20)), Some(dec!(100000000000000000000)));
        assert_eq!(coerce_decimal(&json!(-2.5e27)), Some(dec!(-2500000000000000000000000000)));
        assert_eq!(coerce_or(Some(&json!(1e20)), dec!(1)), dec!(100000000000000000000));
    }

    #[test]
    fn json_numbers_beyond_decimal_range_do_not_coerce() {
        assert_eq!(coerce_decimal(&json!(1e30)), None);
        assert_eq!(coerce_or(Some(&json!(-1e30)), dec!(1)), dec!(1));
    }
}
