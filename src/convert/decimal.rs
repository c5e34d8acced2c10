//! Exact numeric bridge: fixed-point decimal <-> exact rational.
//!
//! The decimal -> rational direction is lossless. The rational -> decimal
//! direction is bounded to `fraction_digits` and rounds half-to-even (the
//! decimal library's default midpoint mode); callers needing more
//! precision pass a larger `fraction_digits`.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};
use rust_decimal::Decimal;

use crate::sdk::SdkValue;

/// Fractional length used at the engine boundary unless a caller asks for
/// more.
pub const DEFAULT_FRACTION_DIGITS: u32 = 6;

/// Exact conversion; never rounds. `"1.25"` becomes `125/100`.
pub fn decimal_to_rational(value: &Decimal) -> BigRational {
    BigRational::new(
        BigInt::from(value.mantissa()),
        BigInt::from(10u8).pow(value.scale()),
    )
}

/// Rounds to `fraction_digits` fractional digits, half-to-even.
///
/// Returns `None` when the result does not fit the decimal type (scale
/// above 28 or a mantissa beyond 96 bits). This direction loses precision
/// by design.
pub fn rational_to_decimal(value: &BigRational, fraction_digits: u32) -> Option<Decimal> {
    let numerator = value.numer() * BigInt::from(10u8).pow(fraction_digits);
    let denominator = value.denom();

    // Truncated quotient, then a half-even correction away from zero.
    let (mut quotient, remainder) = numerator.div_rem(denominator);
    if !remainder.is_zero() {
        let away_from_zero = if numerator.is_negative() {
            BigInt::from(-1)
        } else {
            BigInt::from(1)
        };
        match (remainder.abs() * BigInt::from(2)).cmp(denominator) {
            Ordering::Greater => quotient += &away_from_zero,
            Ordering::Equal => {
                if quotient.is_odd() {
                    quotient += &away_from_zero;
                }
            }
            Ordering::Less => {}
        }
    }

    let mantissa = quotient.to_i128()?;
    Decimal::try_from_i128_with_scale(mantissa, fraction_digits).ok()
}

/// Recursively replaces every decimal leaf with its exact rational
/// equivalent. Opaque leaves and non-decimal primitives pass through.
pub fn deep_decimals_to_rationals(value: SdkValue) -> SdkValue {
    match value {
        SdkValue::Decimal(decimal) => SdkValue::Rational(decimal_to_rational(&decimal)),
        SdkValue::Array(items) => {
            SdkValue::Array(items.into_iter().map(deep_decimals_to_rationals).collect())
        }
        SdkValue::Record(fields) => SdkValue::Record(
            fields
                .into_iter()
                .map(|(key, field)| (key, deep_decimals_to_rationals(field)))
                .collect(),
        ),
        other => other,
    }
}

/// Inverse walk: rational leaves become bounded decimals. A rational that
/// does not fit is left unchanged (best-effort, never an error).
pub fn deep_rationals_to_decimals(value: SdkValue, fraction_digits: u32) -> SdkValue {
    match value {
        SdkValue::Rational(rational) => match rational_to_decimal(&rational, fraction_digits) {
            Some(decimal) => SdkValue::Decimal(decimal),
            None => SdkValue::Rational(rational),
        },
        SdkValue::Array(items) => SdkValue::Array(
            items
                .into_iter()
                .map(|item| deep_rationals_to_decimals(item, fraction_digits))
                .collect(),
        ),
        SdkValue::Record(fields) => SdkValue::Record(
            fields
                .into_iter()
                .map(|(key, field)| (key, deep_rationals_to_decimals(field, fraction_digits)))
                .collect(),
        ),
        other => other,
    }
}
