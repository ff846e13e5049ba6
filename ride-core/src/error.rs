//! Error kinds surfaced by the tracker and its stores.

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::db::GatewayError;

/// Invalid numeric or textual input, detected before any mutation happens.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Distance driven must be greater than zero.
    #[error("distance must be positive, got {0}")]
    NonPositiveDistance(Decimal),

    /// Vehicle autonomy is used as a divisor and must be greater than zero.
    #[error("vehicle autonomy must be positive, got {0}")]
    NonPositiveAutonomy(Decimal),

    /// Fuel price per liter must be greater than zero.
    #[error("fuel price must be positive, got {0}")]
    NonPositiveFuelPrice(Decimal),

    /// A record needs at least one platform with earnings above zero.
    #[error("at least one platform must have positive earnings")]
    NoEarnings,

    /// Earnings for a single platform cannot be negative.
    #[error("earnings for '{platform}' cannot be negative, got {amount}")]
    NegativeEarning { platform: String, amount: Decimal },

    /// Platform names cannot be empty or whitespace.
    #[error("platform name cannot be blank")]
    BlankPlatformName,

    /// A derived amount does not fit in a decimal.
    #[error("amount is too large to compute")]
    AmountOutOfRange,

    /// Free-form amount input that does not parse as a number.
    #[error("invalid amount '{0}'")]
    InvalidAmount(String),
}

/// The entity an operation referenced but could not find.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Missing {
    Record(String),
    Platform(String),
}

impl fmt::Display for Missing {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Record(id) => write!(f, "record '{id}'"),
            Self::Platform(name) => write!(f, "platform '{name}'"),
        }
    }
}

/// Top-level error for tracker operations.
#[derive(Debug, Error, PartialEq)]
pub enum TrackerError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("platform '{0}' is already configured")]
    Duplicate(String),

    #[error("{0} not found")]
    NotFound(Missing),

    #[error("persistence failed: {0}")]
    Persistence(#[from] GatewayError),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn validation_messages_include_offending_value() {
        let err = ValidationError::NonPositiveAutonomy(dec!(-1));

        assert_eq!(err.to_string(), "vehicle autonomy must be positive, got -1");
    }

    #[test]
    fn out_of_range_message() {
        assert_eq!(
            ValidationError::AmountOutOfRange.to_string(),
            "amount is too large to compute"
        );
    }

    #[test]
    fn not_found_names_the_missing_entity() {
        let err = TrackerError::NotFound(Missing::Platform("Lyft".to_string()));

        assert_eq!(err.to_string(), "platform 'Lyft' not found");
    }

    #[test]
    fn gateway_errors_convert_into_persistence() {
        let err: TrackerError = GatewayError::Backend("disk full".to_string()).into();

        assert!(matches!(err, TrackerError::Persistence(_)));
    }
}
