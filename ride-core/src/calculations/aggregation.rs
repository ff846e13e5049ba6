//! Windowed statistics over daily records.
//!
//! The engine is window-agnostic: callers compute a start date (usually via
//! [`Window::start`]) and every function here works on whatever subset
//! [`filter_by_window`] returns. Nothing is cached; each call recomputes
//! from the records it is given.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::format::format_day_label;
use super::formulas::is_low_efficiency;
use crate::models::{AggregateStats, ChartPoint, DailyRecord, PlatformShare, Window, WindowSummary};

/// Records dated on or after `start`, in their original order.
pub fn filter_by_window(
    records: &[DailyRecord],
    start: NaiveDate,
) -> Vec<&DailyRecord> {
    records.iter().filter(|record| record.date >= start).collect()
}

/// Sums earnings, fuel cost, net profit and distance over `records`.
///
/// An empty subset yields all-zero totals with `record_count == 0`. Totals
/// saturate at the `Decimal` bounds.
pub fn compute_stats<'a>(records: impl IntoIterator<Item = &'a DailyRecord>) -> AggregateStats {
    records
        .into_iter()
        .fold(AggregateStats::default(), |mut stats, record| {
            stats.total_earnings = stats.total_earnings.saturating_add(record.total_earnings());
            stats.total_fuel_cost = stats.total_fuel_cost.saturating_add(record.fuel_cost);
            stats.total_net_profit = stats.total_net_profit.saturating_add(record.net_profit);
            stats.total_distance = stats.total_distance.saturating_add(record.distance);
            stats.record_count += 1;
            stats
        })
}

/// Net profit per recorded day, zero when no days were recorded.
pub fn compute_average_per_day(stats: &AggregateStats) -> Decimal {
    if stats.record_count == 0 {
        return Decimal::ZERO;
    }
    stats.total_net_profit / Decimal::from(stats.record_count)
}

/// Per-platform earning totals and their share of the grand total.
///
/// Platforms that were removed from settings still appear here when older
/// records carry them. Shares are ordered by total, largest first, ties by
/// platform name. When nothing was earned every percentage is zero.
pub fn per_platform_breakdown<'a>(
    records: impl IntoIterator<Item = &'a DailyRecord>,
) -> Vec<PlatformShare> {
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
    for record in records {
        for (platform, amount) in &record.earnings {
            let total = totals.entry(platform.as_str()).or_insert(Decimal::ZERO);
            *total = total.saturating_add(*amount);
        }
    }

    let grand_total = totals
        .values()
        .fold(Decimal::ZERO, |sum, total| sum.saturating_add(*total));

    let mut shares: Vec<PlatformShare> = totals
        .into_iter()
        .map(|(platform, total)| PlatformShare {
            platform: platform.to_string(),
            total,
            percentage: share_of(total, grand_total),
        })
        .collect();

    shares.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.platform.cmp(&b.platform))
    });
    shares
}

fn share_of(
    part: Decimal,
    whole: Decimal,
) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part / whole * Decimal::ONE_HUNDRED
}

/// One chart point per record, ascending by date.
///
/// Ordering uses the record date itself; records sharing a date keep their
/// insertion order. Labels are formatted only after sorting.
pub fn chart_series<'a>(records: impl IntoIterator<Item = &'a DailyRecord>) -> Vec<ChartPoint> {
    let mut ordered: Vec<&DailyRecord> = records.into_iter().collect();
    ordered.sort_by_key(|record| record.date);

    ordered
        .into_iter()
        .map(|record| ChartPoint {
            date: record.date,
            label: format_day_label(record.date),
            earnings: record.total_earnings(),
            fuel_cost: record.fuel_cost,
            net_profit: record.net_profit,
            distance: record.distance,
        })
        .collect()
}

/// Full summary of `records` over the `window` ending on `today`.
pub fn summarize(
    records: &[DailyRecord],
    window: Window,
    today: NaiveDate,
) -> WindowSummary {
    let start = window.start(today);
    let subset = filter_by_window(records, start);

    let stats = compute_stats(subset.iter().copied());
    let efficiency = stats.efficiency();

    WindowSummary {
        window,
        start,
        average_per_day: compute_average_per_day(&stats),
        efficiency,
        low_efficiency: is_low_efficiency(efficiency),
        platforms: per_platform_breakdown(subset.iter().copied()),
        series: chart_series(subset.iter().copied()),
        stats,
    }
}
