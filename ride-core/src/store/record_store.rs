use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::calculations::formulas::{checked_net_profit, fuel_cost};
use crate::error::{Missing, TrackerError, ValidationError};
use crate::models::{DailyRecord, Earnings, NewDailyRecord, Settings};

/// Daily records in entry order.
///
/// Several records may share a date; lookups by date return the first one
/// entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<DailyRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `new`, derives its fuel cost and net profit from
    /// `settings`, and appends the resulting record.
    ///
    /// Zero-valued earnings are dropped from the stored map.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Validation`] when the distance is not positive,
    /// any earning is negative, no earning is positive, the settings carry
    /// a non-positive autonomy, or a derived amount overflows. The store is
    /// unchanged on error.
    pub fn add(
        &mut self,
        new: NewDailyRecord,
        settings: &Settings,
    ) -> Result<DailyRecord, TrackerError> {
        if new.distance <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveDistance(new.distance).into());
        }
        let earnings = validated_earnings(new.earnings)?;

        let fuel_cost = fuel_cost(
            new.distance,
            settings.vehicle_autonomy,
            settings.fuel_price_per_liter,
        )?;
        let net_profit = checked_net_profit(&earnings, fuel_cost)?;

        let record = DailyRecord {
            id: Uuid::new_v4().to_string(),
            date: new.date,
            distance: new.distance,
            earnings,
            fuel_cost,
            net_profit,
        };

        info!(
            id = %record.id,
            date = %record.date,
            net_profit = %record.net_profit,
            "record added"
        );
        self.records.push(record.clone());
        Ok(record)
    }

    /// Removes and returns the record with `id`.
    pub fn delete(
        &mut self,
        id: &str,
    ) -> Result<DailyRecord, TrackerError> {
        let position = self
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| TrackerError::NotFound(Missing::Record(id.to_string())))?;

        let removed = self.records.remove(position);
        info!(id = %removed.id, "record deleted");
        Ok(removed)
    }

    pub fn get(
        &self,
        id: &str,
    ) -> Option<&DailyRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// First record entered for `date`.
    pub fn find_by_date(
        &self,
        date: NaiveDate,
    ) -> Option<&DailyRecord> {
        self.records.iter().find(|record| record.date == date)
    }

    /// Every record entered for `date`, in entry order.
    pub fn records_on(
        &self,
        date: NaiveDate,
    ) -> Vec<&DailyRecord> {
        self.records
            .iter()
            .filter(|record| record.date == date)
            .collect()
    }

    /// Replaces the whole collection, typically with records loaded from storage.
    pub fn replace_all(
        &mut self,
        records: Vec<DailyRecord>,
    ) {
        debug!(count = records.len(), "replacing all records");
        self.records = records;
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn validated_earnings(earnings: Earnings) -> Result<Earnings, ValidationError> {
    if let Some((platform, amount)) = earnings.iter().find(|(_, amount)| **amount < Decimal::ZERO) {
        return Err(ValidationError::NegativeEarning {
            platform: platform.clone(),
            amount: *amount,
        });
    }

    let positive: Earnings = earnings
        .into_iter()
        .filter(|(_, amount)| *amount > Decimal::ZERO)
        .collect();

    if positive.is_empty() {
        return Err(ValidationError::NoEarnings);
    }
    Ok(positive)
}
