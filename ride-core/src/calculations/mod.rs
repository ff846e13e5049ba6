//! Financial calculations for daily driving records.
//!
//! This module provides the pure formulas (fuel cost, net profit,
//! efficiency), display formatting, and the aggregation engine that turns a
//! set of records into windowed statistics.

pub mod aggregation;
pub mod common;
pub mod format;
pub mod formulas;

pub use aggregation::{
    chart_series, compute_average_per_day, compute_stats, filter_by_window,
    per_platform_breakdown, summarize,
};
pub use formulas::{
    LOW_EFFICIENCY_THRESHOLD, average_per_day, checked_net_profit, efficiency, fuel_cost,
    is_low_efficiency, net_profit, total_earnings,
};
