use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const DEFAULT_FUEL_PRICE_PER_LITER: Decimal = Decimal::from_parts(55, 0, 0, false, 1);
pub const DEFAULT_VEHICLE_AUTONOMY: Decimal = Decimal::from_parts(12, 0, 0, false, 0);
pub const DEFAULT_APPS: [&str; 3] = ["Uber", "99", "InDrive"];

/// Vehicle and fuel configuration plus the platforms offered on record entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Currency per liter.
    pub fuel_price_per_liter: Decimal,
    /// Kilometers per liter.
    pub vehicle_autonomy: Decimal,
    pub apps: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fuel_price_per_liter: DEFAULT_FUEL_PRICE_PER_LITER,
            vehicle_autonomy: DEFAULT_VEHICLE_AUTONOMY,
            apps: DEFAULT_APPS.iter().map(|app| app.to_string()).collect(),
        }
    }
}

impl Settings {
    /// Checks the numeric fields used by the fuel cost formula.
    ///
    /// Platform list rules (non-blank, unique) are enforced by the settings
    /// store, which reports duplicates as their own error kind.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fuel_price(self.fuel_price_per_liter)?;
        validate_autonomy(self.vehicle_autonomy)?;
        Ok(())
    }

    pub fn has_app(
        &self,
        name: &str,
    ) -> bool {
        self.apps.iter().any(|app| app == name)
    }
}

pub(crate) fn validate_fuel_price(price: Decimal) -> Result<(), ValidationError> {
    if price <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveFuelPrice(price));
    }
    Ok(())
}

pub(crate) fn validate_autonomy(autonomy: Decimal) -> Result<(), ValidationError> {
    if autonomy <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAutonomy(autonomy));
    }
    Ok(())
}

/// Changes only the fuel price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateFuelPriceRequest {
    pub price: Decimal,
}

/// Changes only the vehicle autonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAutonomyRequest {
    pub autonomy: Decimal,
}

/// Changes both vehicle figures at once, as the settings form saves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateVehicleRequest {
    pub fuel_price_per_liter: Decimal,
    pub vehicle_autonomy: Decimal,
}
