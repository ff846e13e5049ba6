use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::formulas;

/// Earnings per platform name. Platforms absent from the map earned nothing.
pub type Earnings = BTreeMap<String, Decimal>;

/// One day of driving, with its derived costs frozen at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub id: String,
    pub date: NaiveDate,

    // User-provided values
    /// Kilometers driven.
    pub distance: Decimal,
    pub earnings: Earnings,

    // Derived with the settings in effect when the record was created
    pub fuel_cost: Decimal,
    pub net_profit: Decimal,
}

impl DailyRecord {
    /// Sum of earnings across every platform in this record.
    pub fn total_earnings(&self) -> Decimal {
        formulas::total_earnings(&self.earnings)
    }

    /// Earnings for a single platform, zero when the platform is absent.
    pub fn earnings_for(
        &self,
        platform: &str,
    ) -> Decimal {
        self.earnings.get(platform).copied().unwrap_or(Decimal::ZERO)
    }
}

/// For creating new records (no id or derived values)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDailyRecord {
    pub date: NaiveDate,
    pub distance: Decimal,
    pub earnings: Earnings,
}

impl NewDailyRecord {
    pub fn new(
        date: NaiveDate,
        distance: Decimal,
        earnings: Earnings,
    ) -> Self {
        Self {
            date,
            distance,
            earnings,
        }
    }
}
