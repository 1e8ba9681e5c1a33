//! Common utility functions for tax calculations.
//!
//! Rounding and the guarded arithmetic shared by the period annualizer and
//! the aggregator.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Arguments
///
/// * `value` - The decimal value to round
///
/// # Returns
///
/// The value rounded to two decimal places.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Arguments
///
/// * `a` - First decimal value
/// * `b` - Second decimal value
///
/// # Returns
///
/// The larger of the two values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::max;
///
/// assert_eq!(max(dec!(200000), dec!(60000)), dec!(200000));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Clamps negative values to zero.
///
/// Taxable income never goes below zero, however large the reliefs.
///
/// # Arguments
///
/// * `value` - The decimal value to clamp
///
/// # Returns
///
/// `value` when it is positive, otherwise zero.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::floor_at_zero;
///
/// assert_eq!(floor_at_zero(dec!(-1500)), Decimal::ZERO);
/// assert_eq!(floor_at_zero(dec!(1500)), dec!(1500));
/// ```
pub fn floor_at_zero(value: Decimal) -> Decimal {
    max(value, Decimal::ZERO)
}

/// Divides, returning zero instead of failing when the divisor is zero.
///
/// # Arguments
///
/// * `numerator` - The dividend
/// * `denominator` - The divisor, possibly zero
///
/// # Returns
///
/// `numerator / denominator`, or zero when the division is undefined or
/// overflows.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::safe_div;
///
/// assert_eq!(safe_div(dec!(531600), dec!(12)), dec!(44300));
/// assert_eq!(safe_div(dec!(10), Decimal::ZERO), Decimal::ZERO);
/// ```
pub fn safe_div(
    numerator: Decimal,
    denominator: Decimal,
) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}
