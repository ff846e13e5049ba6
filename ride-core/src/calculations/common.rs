//! Rounding helpers shared by formatting and reporting.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use ride_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    round_half_up_dp(value, 2)
}

/// Rounds to `dp` decimal places, midpoint away from zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use ride_core::calculations::common::round_half_up_dp;
///
/// assert_eq!(round_half_up_dp(dec!(12.25), 1), dec!(12.3));
/// assert_eq!(round_half_up_dp(dec!(12.24), 1), dec!(12.2));
/// ```
pub fn round_half_up_dp(
    value: Decimal,
    dp: u32,
) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
