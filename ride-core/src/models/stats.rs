use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Window;
use crate::calculations::formulas::efficiency;

/// Totals over a subset of records. Computed on demand, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    pub total_earnings: Decimal,
    pub total_fuel_cost: Decimal,
    pub total_net_profit: Decimal,
    pub total_distance: Decimal,
    pub record_count: usize,
}

impl AggregateStats {
    /// Earnings per kilometer over the subset, zero when nothing was driven.
    pub fn efficiency(&self) -> Decimal {
        efficiency(self.total_earnings, self.total_distance)
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}

/// One platform's share of the earnings in a subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformShare {
    pub platform: String,
    pub total: Decimal,
    /// 0 to 100. Zero for every platform when the subset earned nothing.
    pub percentage: Decimal,
}

/// A single point of the earnings/costs time series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub date: NaiveDate,
    /// Display label (`dd/MM`). Never used for ordering.
    pub label: String,
    pub earnings: Decimal,
    pub fuel_cost: Decimal,
    pub net_profit: Decimal,
    pub distance: Decimal,
}

/// Projected figures for unsaved record input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPreview {
    pub total_earnings: Decimal,
    pub fuel_cost: Decimal,
    pub net_profit: Decimal,
}

/// Everything a summary view shows for one trailing window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSummary {
    pub window: Window,
    pub start: NaiveDate,
    pub stats: AggregateStats,
    /// Net profit per recorded day.
    pub average_per_day: Decimal,
    pub efficiency: Decimal,
    pub low_efficiency: bool,
    pub platforms: Vec<PlatformShare>,
    pub series: Vec<ChartPoint>,
}
