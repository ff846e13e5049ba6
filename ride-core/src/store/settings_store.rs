use std::collections::HashSet;

use tracing::{info, warn};

use crate::error::{Missing, TrackerError, ValidationError};
use crate::models::{
    Settings, UpdateAutonomyRequest, UpdateFuelPriceRequest, UpdateVehicleRequest,
    validate_autonomy, validate_fuel_price,
};

/// Owns the session's [`Settings`].
///
/// Every change is validated before it is applied, so the held settings
/// always have a positive fuel price, a positive autonomy and a unique,
/// non-blank platform list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsStore {
    settings: Settings,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store around `settings` after validating them.
    pub fn with_settings(settings: Settings) -> Result<Self, TrackerError> {
        validate_settings(&settings)?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replaces the settings wholesale.
    pub fn update(
        &mut self,
        settings: Settings,
    ) -> Result<(), TrackerError> {
        validate_settings(&settings)?;
        info!(
            fuel_price = %settings.fuel_price_per_liter,
            autonomy = %settings.vehicle_autonomy,
            apps = settings.apps.len(),
            "settings replaced"
        );
        self.settings = settings;
        Ok(())
    }

    pub fn apply_fuel_price(
        &mut self,
        request: UpdateFuelPriceRequest,
    ) -> Result<(), TrackerError> {
        validate_fuel_price(request.price)?;
        info!(fuel_price = %request.price, "fuel price updated");
        self.settings.fuel_price_per_liter = request.price;
        Ok(())
    }

    pub fn apply_autonomy(
        &mut self,
        request: UpdateAutonomyRequest,
    ) -> Result<(), TrackerError> {
        validate_autonomy(request.autonomy)?;
        info!(autonomy = %request.autonomy, "vehicle autonomy updated");
        self.settings.vehicle_autonomy = request.autonomy;
        Ok(())
    }

    /// Updates fuel price and autonomy together; neither changes if either is invalid.
    pub fn apply_vehicle(
        &mut self,
        request: UpdateVehicleRequest,
    ) -> Result<(), TrackerError> {
        validate_fuel_price(request.fuel_price_per_liter)?;
        validate_autonomy(request.vehicle_autonomy)?;
        info!(
            fuel_price = %request.fuel_price_per_liter,
            autonomy = %request.vehicle_autonomy,
            "vehicle settings updated"
        );
        self.settings.fuel_price_per_liter = request.fuel_price_per_liter;
        self.settings.vehicle_autonomy = request.vehicle_autonomy;
        Ok(())
    }

    /// Appends a platform after trimming surrounding whitespace.
    ///
    /// Returns the stored (trimmed) name. Matching is exact and
    /// case-sensitive, so `"uber"` and `"Uber"` are different platforms.
    pub fn add_platform(
        &mut self,
        name: &str,
    ) -> Result<String, TrackerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::BlankPlatformName.into());
        }
        if self.settings.has_app(name) {
            warn!(platform = %name, "platform already configured");
            return Err(TrackerError::Duplicate(name.to_string()));
        }

        info!(platform = %name, "platform added");
        self.settings.apps.push(name.to_string());
        Ok(name.to_string())
    }

    /// Removes a platform from the configured list.
    ///
    /// Records already holding earnings for the platform keep them.
    pub fn remove_platform(
        &mut self,
        name: &str,
    ) -> Result<(), TrackerError> {
        let position = self
            .settings
            .apps
            .iter()
            .position(|app| app == name)
            .ok_or_else(|| TrackerError::NotFound(Missing::Platform(name.to_string())))?;

        self.settings.apps.remove(position);
        info!(platform = %name, "platform removed");
        Ok(())
    }

    /// Restores first-run defaults.
    pub fn reset(&mut self) {
        self.settings = Settings::default();
    }
}

fn validate_settings(settings: &Settings) -> Result<(), TrackerError> {
    settings.validate()?;

    let mut seen = HashSet::new();
    for app in &settings.apps {
        if app.trim().is_empty() {
            return Err(ValidationError::BlankPlatformName.into());
        }
        if !seen.insert(app.as_str()) {
            return Err(TrackerError::Duplicate(app.clone()));
        }
    }
    Ok(())
}
