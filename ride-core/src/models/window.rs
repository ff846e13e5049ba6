use std::fmt;

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Trailing time range used to select records for aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Window {
    Today,
    #[default]
    Week,
    Month,
    Quarter,
}

impl Window {
    pub fn all() -> &'static [Window] {
        &[Window::Today, Window::Week, Window::Month, Window::Quarter]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
        }
    }

    /// First date included in the window ending on `today`.
    ///
    /// Month arithmetic clamps to the last valid day, so a month before
    /// March 31st starts on the last day of February. Dates before the
    /// representable range fall back to `NaiveDate::MIN`.
    pub fn start(
        &self,
        today: NaiveDate,
    ) -> NaiveDate {
        let start = match self {
            Self::Today => Some(today),
            Self::Week => today.checked_sub_days(Days::new(7)),
            Self::Month => today.checked_sub_months(Months::new(1)),
            Self::Quarter => today.checked_sub_months(Months::new(3)),
        };
        start.unwrap_or(NaiveDate::MIN)
    }
}

impl fmt::Display for Window {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn today_starts_on_the_same_day() {
        assert_eq!(Window::Today.start(date(2025, 6, 15)), date(2025, 6, 15));
    }

    #[test]
    fn week_starts_seven_days_back() {
        assert_eq!(Window::Week.start(date(2025, 1, 3)), date(2024, 12, 27));
    }

    #[test]
    fn month_clamps_to_end_of_shorter_month() {
        assert_eq!(Window::Month.start(date(2025, 3, 31)), date(2025, 2, 28));
    }

    #[test]
    fn quarter_crosses_year_boundary() {
        assert_eq!(Window::Quarter.start(date(2025, 2, 10)), date(2024, 11, 10));
    }
}
