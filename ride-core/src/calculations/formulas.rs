//! Per-record financial formulas.
//!
//! | Metric      | Formula |
//! |-------------|---------|
//! | Fuel cost   | distance / autonomy × fuel price |
//! | Net profit  | sum of platform earnings − fuel cost |
//! | Efficiency  | earnings / distance |
//!
//! Fuel cost requires a positive autonomy and reports an error otherwise.
//! Efficiency and per-day averages treat a zero divisor as a boundary case
//! and return zero.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use ride_core::Earnings;
//! use ride_core::calculations::{fuel_cost, net_profit};
//!
//! let cost = fuel_cost(dec!(120), dec!(12), dec!(5.5)).unwrap();
//! assert_eq!(cost, dec!(55.0));
//!
//! let earnings = Earnings::from([
//!     ("Uber".to_string(), dec!(100)),
//!     ("99".to_string(), dec!(50)),
//! ]);
//! assert_eq!(net_profit(&earnings, cost), dec!(95.0));
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::models::Earnings;

/// Earnings per kilometer below which a day is flagged as unproductive.
pub const LOW_EFFICIENCY_THRESHOLD: Decimal = Decimal::TWO;

/// Cost of the fuel burned over `distance` kilometers.
///
/// # Errors
///
/// Returns [`ValidationError::NonPositiveAutonomy`] when `autonomy` is zero
/// or negative, and [`ValidationError::AmountOutOfRange`] when the result
/// does not fit in a `Decimal`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use ride_core::ValidationError;
/// use ride_core::calculations::fuel_cost;
///
/// assert_eq!(
///     fuel_cost(dec!(50), dec!(0), dec!(5.5)),
///     Err(ValidationError::NonPositiveAutonomy(dec!(0)))
/// );
/// ```
pub fn fuel_cost(
    distance: Decimal,
    autonomy: Decimal,
    price_per_liter: Decimal,
) -> Result<Decimal, ValidationError> {
    if autonomy <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAutonomy(autonomy));
    }
    distance
        .checked_div(autonomy)
        .and_then(|liters| liters.checked_mul(price_per_liter))
        .ok_or(ValidationError::AmountOutOfRange)
}

/// Sum of all platform earnings, saturating at the `Decimal` bounds.
pub fn total_earnings(earnings: &Earnings) -> Decimal {
    earnings
        .values()
        .fold(Decimal::ZERO, |total, amount| total.saturating_add(*amount))
}

/// Earnings minus fuel cost. Negative when fuel outweighs earnings.
///
/// Saturates instead of overflowing; use [`checked_net_profit`] where an
/// out-of-range value must be rejected.
pub fn net_profit(
    earnings: &Earnings,
    fuel_cost: Decimal,
) -> Decimal {
    total_earnings(earnings).saturating_sub(fuel_cost)
}

/// [`net_profit`] that reports overflow instead of saturating.
pub fn checked_net_profit(
    earnings: &Earnings,
    fuel_cost: Decimal,
) -> Result<Decimal, ValidationError> {
    earnings
        .values()
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(*amount))
        .and_then(|total| total.checked_sub(fuel_cost))
        .ok_or(ValidationError::AmountOutOfRange)
}

/// Earnings per kilometer, or zero when nothing was driven.
///
/// A distance so small that the ratio overflows yields `Decimal::MAX`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use ride_core::calculations::efficiency;
///
/// assert_eq!(efficiency(dec!(150), dec!(100)), dec!(1.5));
/// assert_eq!(efficiency(dec!(150), dec!(0)), dec!(0));
/// ```
pub fn efficiency(
    earnings: Decimal,
    distance: Decimal,
) -> Decimal {
    if distance <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    earnings.checked_div(distance).unwrap_or(Decimal::MAX)
}

/// `total` spread over `days`, or zero when there are no days.
pub fn average_per_day(
    total: Decimal,
    days: i64,
) -> Decimal {
    if days <= 0 {
        return Decimal::ZERO;
    }
    total / Decimal::from(days)
}

/// True when a measured efficiency is positive but under
/// [`LOW_EFFICIENCY_THRESHOLD`].
pub fn is_low_efficiency(efficiency: Decimal) -> bool {
    efficiency > Decimal::ZERO && efficiency < LOW_EFFICIENCY_THRESHOLD
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn earnings(entries: &[(&str, Decimal)]) -> Earnings {
        entries
            .iter()
            .map(|(platform, amount)| (platform.to_string(), *amount))
            .collect()
    }

    // =========================================================================
    // fuel_cost tests
    // =========================================================================

    #[test]
    fn fuel_cost_reference_scenario() {
        let result = fuel_cost(dec!(120), dec!(12), dec!(5.5));

        assert_eq!(result, Ok(dec!(55.0)));
    }

    #[test]
    fn fuel_cost_matches_formula() {
        for (distance, autonomy, price) in [
            (dec!(37.5), dec!(9.8), dec!(6.19)),
            (dec!(1), dec!(15), dec!(4.99)),
            (dec!(0), dec!(12), dec!(5.5)),
        ] {
            let result = fuel_cost(distance, autonomy, price).unwrap();

            assert_eq!(result, distance / autonomy * price);
        }
    }

    #[test]
    fn fuel_cost_increases_with_distance() {
        let shorter = fuel_cost(dec!(80), dec!(12), dec!(5.5)).unwrap();
        let longer = fuel_cost(dec!(81), dec!(12), dec!(5.5)).unwrap();

        assert!(longer > shorter);
    }

    #[test]
    fn fuel_cost_increases_with_price() {
        let cheaper = fuel_cost(dec!(80), dec!(12), dec!(5.5)).unwrap();
        let pricier = fuel_cost(dec!(80), dec!(12), dec!(5.51)).unwrap();

        assert!(pricier > cheaper);
    }

    #[test]
    fn fuel_cost_rejects_zero_autonomy() {
        let result = fuel_cost(dec!(80), dec!(0), dec!(5.5));

        assert_eq!(result, Err(ValidationError::NonPositiveAutonomy(dec!(0))));
    }

    #[test]
    fn fuel_cost_rejects_negative_autonomy() {
        let result = fuel_cost(dec!(80), dec!(-3), dec!(5.5));

        assert_eq!(result, Err(ValidationError::NonPositiveAutonomy(dec!(-3))));
    }

    #[test]
    fn fuel_cost_reports_overflow_instead_of_panicking() {
        let result = fuel_cost(Decimal::MAX, dec!(0.5), dec!(5.5));

        assert_eq!(result, Err(ValidationError::AmountOutOfRange));
    }

    #[test]
    fn fuel_cost_reports_overflow_in_price_multiplication() {
        let result = fuel_cost(Decimal::MAX, dec!(1), dec!(2));

        assert_eq!(result, Err(ValidationError::AmountOutOfRange));
    }

    // =========================================================================
    // net_profit tests
    // =========================================================================

    #[test]
    fn net_profit_reference_scenario() {
        let map = earnings(&[("Uber", dec!(100)), ("99", dec!(50))]);

        assert_eq!(net_profit(&map, dec!(55)), dec!(95));
    }

    #[test]
    fn net_profit_can_be_negative() {
        let map = earnings(&[("InDrive", dec!(20))]);

        assert_eq!(net_profit(&map, dec!(55)), dec!(-35));
    }

    #[test]
    fn net_profit_of_empty_earnings_is_negative_fuel_cost() {
        assert_eq!(net_profit(&Earnings::new(), dec!(12.5)), dec!(-12.5));
    }

    #[test]
    fn net_profit_saturates_on_huge_earnings() {
        let map = earnings(&[("Uber", Decimal::MAX), ("99", Decimal::MAX)]);

        assert_eq!(net_profit(&map, Decimal::ZERO), Decimal::MAX);
    }

    #[test]
    fn checked_net_profit_matches_net_profit_in_range() {
        let map = earnings(&[("Uber", dec!(100)), ("99", dec!(50))]);

        assert_eq!(checked_net_profit(&map, dec!(55)), Ok(dec!(95)));
    }

    #[test]
    fn checked_net_profit_rejects_overflowing_sum() {
        let map = earnings(&[("Uber", Decimal::MAX), ("99", dec!(1))]);

        assert_eq!(
            checked_net_profit(&map, dec!(10)),
            Err(ValidationError::AmountOutOfRange)
        );
    }

    // =========================================================================
    // efficiency / average tests
    // =========================================================================

    #[test]
    fn efficiency_divides_earnings_by_distance() {
        assert_eq!(efficiency(dec!(300), dec!(120)), dec!(2.5));
    }

    #[test]
    fn efficiency_of_tiny_distance_saturates() {
        assert_eq!(efficiency(Decimal::MAX, dec!(0.0000000001)), Decimal::MAX);
    }

    #[test]
    fn efficiency_is_zero_for_negative_distance() {
        assert_eq!(efficiency(dec!(300), dec!(-1)), Decimal::ZERO);
    }

    #[test]
    fn average_per_day_divides_total() {
        assert_eq!(average_per_day(dec!(300), 4), dec!(75));
    }

    #[test]
    fn average_per_day_guards_zero_and_negative_days() {
        assert_eq!(average_per_day(dec!(300), 0), Decimal::ZERO);
        assert_eq!(average_per_day(dec!(300), -2), Decimal::ZERO);
    }

    // =========================================================================
    // is_low_efficiency tests
    // =========================================================================

    #[test]
    fn low_efficiency_below_threshold() {
        assert!(is_low_efficiency(dec!(1.99)));
    }

    #[test]
    fn threshold_itself_is_not_low() {
        assert!(!is_low_efficiency(dec!(2)));
    }

    #[test]
    fn zero_efficiency_is_not_flagged() {
        assert!(!is_low_efficiency(Decimal::ZERO));
    }
}
