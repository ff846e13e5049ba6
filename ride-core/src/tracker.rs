//! The tracker session: records, settings and their persistence.
//!
//! A [`Tracker`] holds the in-memory state and writes it through a
//! [`PersistenceGateway`] after every successful mutation. Validation always
//! happens before the state changes. A failed save never undoes the change;
//! it is logged and handed back in [`Saved::save_error`] so the caller can
//! retry with [`Tracker::save`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, error, info};

use crate::calculations::{compute_stats, filter_by_window, formulas, summarize};
use crate::clock::Clock;
use crate::db::{GatewayConfig, GatewayError, GatewayRegistry, PersistenceGateway, StorageKey};
use crate::error::TrackerError;
use crate::models::{
    AggregateStats, DailyRecord, Earnings, NewDailyRecord, RecordPreview, Settings,
    UpdateAutonomyRequest, UpdateFuelPriceRequest, UpdateVehicleRequest, Window, WindowSummary,
};
use crate::store::{RecordStore, SettingsStore};

/// Result of a mutation that was applied in memory.
///
/// `save_error` is `Some` when the follow-up write to storage failed; the
/// mutation itself still stands.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct Saved<T> {
    pub value: T,
    pub save_error: Option<GatewayError>,
}

impl<T> Saved<T> {
    pub fn is_persisted(&self) -> bool {
        self.save_error.is_none()
    }

    /// Treats a failed save as an error, discarding the value.
    pub fn into_result(self) -> Result<T, TrackerError> {
        match self.save_error {
            None => Ok(self.value),
            Some(err) => Err(TrackerError::Persistence(err)),
        }
    }
}

pub struct Tracker {
    records: RecordStore,
    settings: SettingsStore,
    gateway: Box<dyn PersistenceGateway>,
    clock: Box<dyn Clock>,
}

impl Tracker {
    /// Empty session with default settings. Nothing is read from storage
    /// until [`Tracker::load`] runs.
    pub fn new(
        gateway: Box<dyn PersistenceGateway>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            records: RecordStore::new(),
            settings: SettingsStore::new(),
            gateway,
            clock,
        }
    }

    /// Opens the backend `config` selects and loads whatever it holds.
    pub async fn open(
        registry: &GatewayRegistry,
        config: &GatewayConfig,
        clock: Box<dyn Clock>,
    ) -> Result<Self, TrackerError> {
        info!(backend = %config.backend, "opening tracker");
        let gateway = registry.open(config).await?;
        let mut tracker = Self::new(gateway, clock);
        tracker.load().await?;
        Ok(tracker)
    }

    // ── persistence ──────────────────────────────────────────────────────

    /// Replaces the in-memory state with the stored blobs.
    ///
    /// A missing key leaves the matching part of the state as it is. Both
    /// blobs are decoded and the settings validated before either is
    /// applied, so a corrupt blob changes nothing.
    pub async fn load(&mut self) -> Result<(), TrackerError> {
        let records_blob = self.gateway.get(StorageKey::Records).await?;
        let settings_blob = self.gateway.get(StorageKey::Settings).await?;

        let records = records_blob
            .map(|blob| serde_json::from_str::<Vec<DailyRecord>>(&blob))
            .transpose()
            .map_err(GatewayError::from)?;
        let settings = settings_blob
            .map(|blob| serde_json::from_str::<Settings>(&blob))
            .transpose()
            .map_err(GatewayError::from)?
            .map(SettingsStore::with_settings)
            .transpose()?;

        if let Some(records) = records {
            self.records.replace_all(records);
        }
        if let Some(settings) = settings {
            self.settings = settings;
        }

        info!(
            records = self.records.len(),
            apps = self.settings.settings().apps.len(),
            "tracker state loaded"
        );
        Ok(())
    }

    /// Writes both records and settings to storage.
    pub async fn save(&self) -> Result<(), GatewayError> {
        let records = serde_json::to_string(self.records.records())?;
        let settings = serde_json::to_string(self.settings.settings())?;

        self.gateway.set(StorageKey::Records, &records).await?;
        self.gateway.set(StorageKey::Settings, &settings).await?;
        debug!(records = self.records.len(), "tracker state saved");
        Ok(())
    }

    async fn persist<T>(
        &self,
        value: T,
    ) -> Saved<T> {
        let save_error = match self.save().await {
            Ok(()) => None,
            Err(err) => {
                error!(error = %err, "failed to save tracker state");
                Some(err)
            }
        };
        Saved { value, save_error }
    }

    // ── records ──────────────────────────────────────────────────────────

    pub async fn add_record(
        &mut self,
        new: NewDailyRecord,
    ) -> Result<Saved<DailyRecord>, TrackerError> {
        let record = self.records.add(new, self.settings.settings())?;
        Ok(self.persist(record).await)
    }

    /// Adds a record dated on the clock's today.
    pub async fn add_record_today(
        &mut self,
        distance: Decimal,
        earnings: Earnings,
    ) -> Result<Saved<DailyRecord>, TrackerError> {
        let new = NewDailyRecord::new(self.today(), distance, earnings);
        self.add_record(new).await
    }

    pub async fn delete_record(
        &mut self,
        id: &str,
    ) -> Result<Saved<DailyRecord>, TrackerError> {
        let removed = self.records.delete(id)?;
        Ok(self.persist(removed).await)
    }

    /// Swaps in a whole collection, e.g. from an import. Derived fields are
    /// kept exactly as given.
    pub async fn replace_records(
        &mut self,
        records: Vec<DailyRecord>,
    ) -> Saved<()> {
        self.records.replace_all(records);
        self.persist(()).await
    }

    // ── settings ─────────────────────────────────────────────────────────

    /// Replaces the settings wholesale. Existing records keep their
    /// fuel cost and net profit.
    pub async fn update_settings(
        &mut self,
        settings: Settings,
    ) -> Result<Saved<()>, TrackerError> {
        self.settings.update(settings)?;
        Ok(self.persist(()).await)
    }

    pub async fn update_fuel_price(
        &mut self,
        request: UpdateFuelPriceRequest,
    ) -> Result<Saved<()>, TrackerError> {
        self.settings.apply_fuel_price(request)?;
        Ok(self.persist(()).await)
    }

    pub async fn update_autonomy(
        &mut self,
        request: UpdateAutonomyRequest,
    ) -> Result<Saved<()>, TrackerError> {
        self.settings.apply_autonomy(request)?;
        Ok(self.persist(()).await)
    }

    pub async fn update_vehicle(
        &mut self,
        request: UpdateVehicleRequest,
    ) -> Result<Saved<()>, TrackerError> {
        self.settings.apply_vehicle(request)?;
        Ok(self.persist(()).await)
    }

    /// Returns the trimmed name that was stored.
    pub async fn add_platform(
        &mut self,
        name: &str,
    ) -> Result<Saved<String>, TrackerError> {
        let added = self.settings.add_platform(name)?;
        Ok(self.persist(added).await)
    }

    pub async fn remove_platform(
        &mut self,
        name: &str,
    ) -> Result<Saved<()>, TrackerError> {
        self.settings.remove_platform(name)?;
        Ok(self.persist(()).await)
    }

    /// Deletes both stored keys, then resets records and settings.
    ///
    /// When storage refuses the delete the in-memory state is left exactly
    /// as it was.
    pub async fn clear_all(&mut self) -> Result<(), TrackerError> {
        self.gateway
            .multi_remove(&[StorageKey::Records, StorageKey::Settings])
            .await
            .inspect_err(|err| error!(error = %err, "failed to clear stored data"))?;

        self.records.clear();
        self.settings.reset();
        info!("all records and settings cleared");
        Ok(())
    }

    // ── queries ──────────────────────────────────────────────────────────

    pub fn records(&self) -> &[DailyRecord] {
        self.records.records()
    }

    pub fn settings(&self) -> &Settings {
        self.settings.settings()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// First record entered for today, if any.
    pub fn today_record(&self) -> Option<&DailyRecord> {
        self.records.find_by_date(self.today())
    }

    pub fn window_start(
        &self,
        window: Window,
    ) -> NaiveDate {
        window.start(self.today())
    }

    pub fn stats(
        &self,
        window: Window,
    ) -> AggregateStats {
        compute_stats(filter_by_window(self.records(), self.window_start(window)))
    }

    pub fn summary(
        &self,
        window: Window,
    ) -> WindowSummary {
        summarize(self.records(), window, self.today())
    }

    /// Projects totals for input that has not been submitted yet.
    ///
    /// Nothing is validated: a non-positive distance simply costs no fuel.
    pub fn preview(
        &self,
        distance: Decimal,
        earnings: &Earnings,
    ) -> RecordPreview {
        let settings = self.settings();
        let fuel_cost = if distance > Decimal::ZERO {
            formulas::fuel_cost(distance, settings.vehicle_autonomy, settings.fuel_price_per_liter)
                .unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };

        RecordPreview {
            total_earnings: formulas::total_earnings(earnings),
            fuel_cost,
            net_profit: formulas::net_profit(earnings, fuel_cost),
        }
    }
}
