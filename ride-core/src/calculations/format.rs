//! Display formatting and input parsing for amounts and distances.
//!
//! Currency follows the Brazilian real convention (`R$ 1.234,56`); distance
//! and percentages use a dot as decimal separator with one decimal place.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::common::{round_half_up, round_half_up_dp};
use crate::error::ValidationError;

const CURRENCY_SYMBOL: &str = "R$";

/// Formats a currency amount with two decimals, `.` thousands and `,` decimals.
///
/// ```
/// use rust_decimal_macros::dec;
/// use ride_core::calculations::format::format_currency;
///
/// assert_eq!(format_currency(dec!(1234.5)), "R$ 1.234,50");
/// assert_eq!(format_currency(dec!(-35)), "-R$ 35,00");
/// ```
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    format!(
        "{sign}{CURRENCY_SYMBOL} {},{frac_part}",
        group_thousands(int_part)
    )
}

/// Formats kilometers with one decimal place, e.g. `120.0 km`.
pub fn format_distance(distance: Decimal) -> String {
    format!("{:.1} km", round_half_up_dp(distance, 1))
}

/// Formats a 0-100 percentage with one decimal place, e.g. `66.7%`.
pub fn format_percentage(percentage: Decimal) -> String {
    format!("{:.1}%", round_half_up_dp(percentage, 1))
}

/// Short day label for chart axes (`dd/MM`).
pub fn format_day_label(date: NaiveDate) -> String {
    date.format("%d/%m").to_string()
}

/// Parses an amount written the way [`format_currency`] prints it.
///
/// `,` separates decimals and `.` groups thousands in threes. A leading
/// `-` and `R$` are accepted, so `"-R$ 1.234,50"` reads back as `-1234.50`.
/// Blank input is zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use ride_core::calculations::format::parse_amount;
///
/// assert_eq!(parse_amount("12,50"), Ok(dec!(12.50)));
/// assert_eq!(parse_amount("R$ 1.234,50"), Ok(dec!(1234.50)));
/// ```
pub fn parse_amount(s: &str) -> Result<Decimal, ValidationError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };
    let digits = unsigned
        .strip_prefix(CURRENCY_SYMBOL)
        .unwrap_or(unsigned)
        .trim_start();

    let invalid = || {
        tracing::warn!(input = %s, "invalid amount");
        ValidationError::InvalidAmount(s.to_string())
    };

    let (int_part, frac_part) = match digits.split_once(',') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits, None),
    };
    if int_part.contains('.') && !is_grouped(int_part) {
        return Err(invalid());
    }

    let mut plain = int_part.replace('.', "");
    if let Some(frac_part) = frac_part {
        plain.push('.');
        plain.push_str(frac_part);
    }
    if plain.is_empty() || plain.starts_with(['+', '-']) {
        return Err(invalid());
    }

    let value: Decimal = plain.parse().map_err(|_| invalid())?;
    Ok(if negative { -value } else { value })
}

/// `1.234.567`: a leading group of one to three digits, then groups of three.
fn is_grouped(int_part: &str) -> bool {
    let mut groups = int_part.split('.');
    let leading_ok = groups
        .next()
        .is_some_and(|g| (1..=3).contains(&g.len()) && g.chars().all(|c| c.is_ascii_digit()));
    leading_ok && groups.all(|g| g.len() == 3 && g.chars().all(|c| c.is_ascii_digit()))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}
