//! Mapping between calendar dates and fiscal-year numbers.
//!
//! Financial year `N` runs from the configured start day in calendar year
//! `N` up to and including the day before the start day in year `N + 1`.
//! With a start of `04-06`, fiscal year 2024 runs from 2024-04-06 to
//! 2025-04-05 and is labelled `2024/25`.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::FiscalError;

/// Leap year used to validate a configured start day.
const LEAP_REFERENCE_YEAR: i32 = 2000;

/// Fiscal calendar configured with the first day of the fiscal year.
///
/// A start of February 29 is clamped to February 28 in years that have no
/// leap day, so every fiscal year has a well-defined start and end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalCalendar {
    start_month: u32,
    start_day: u32,
}

impl Default for FiscalCalendar {
    fn default() -> Self {
        Self::calendar_year()
    }
}

impl FiscalCalendar {
    /// Fiscal years that coincide with calendar years.
    #[must_use]
    pub const fn calendar_year() -> Self {
        Self {
            start_month: 1,
            start_day: 1,
        }
    }

    /// Creates a calendar whose fiscal years start on the given month and day.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFiscalStart` if the month/day pair is not a day of a
    /// leap year.
    pub fn new(month: u32, day: u32) -> Result<Self, FiscalError> {
        if NaiveDate::from_ymd_opt(LEAP_REFERENCE_YEAR, month, day).is_none() {
            return Err(FiscalError::InvalidFiscalStart(format!(
                "{month:02}-{day:02}"
            )));
        }
        Ok(Self {
            start_month: month,
            start_day: day,
        })
    }

    /// Parses an `MM-DD` setting such as `01-01` or `04-06`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFiscalStart` for anything that is not a valid day.
    pub fn from_setting(setting: &str) -> Result<Self, FiscalError> {
        let invalid = || FiscalError::InvalidFiscalStart(setting.to_string());

        let (month, day) = setting.trim().split_once('-').ok_or_else(invalid)?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        let day = day.parse::<u32>().map_err(|_| invalid())?;

        Self::new(month, day).map_err(|_| invalid())
    }

    /// Returns true when fiscal years run January 1 to December 31.
    #[must_use]
    pub const fn is_calendar_year(&self) -> bool {
        self.start_month == 1 && self.start_day == 1
    }

    /// Returns the first day of fiscal year `fy`.
    #[must_use]
    pub fn start_of(&self, fy: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(fy, self.start_month, self.start_day)
            .or_else(|| NaiveDate::from_ymd_opt(fy, self.start_month, self.start_day - 1))
            // Only reachable for years outside chrono's range.
            .unwrap_or(if fy < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
    }

    /// Returns the last day (inclusive) of fiscal year `fy`.
    #[must_use]
    pub fn end_of(&self, fy: i32) -> NaiveDate {
        let next = self.start_of(fy.saturating_add(1));
        next.pred_opt().unwrap_or(next)
    }

    /// Returns the fiscal year `date` belongs to.
    #[must_use]
    pub fn fiscal_year_of(&self, date: NaiveDate) -> i32 {
        if date >= self.start_of(date.year()) {
            date.year()
        } else {
            date.year() - 1
        }
    }

    /// Returns true if `date` falls within fiscal year `fy`.
    #[must_use]
    pub fn contains(&self, fy: i32, date: NaiveDate) -> bool {
        self.fiscal_year_of(date) == fy
    }

    /// Formats the fiscal year for display: `2024` in calendar-year mode,
    /// `2024/25` when the year ends in the following calendar year.
    #[must_use]
    pub fn label(&self, fy: i32) -> String {
        let end = self.end_of(fy);
        if end.year() == fy {
            fy.to_string()
        } else {
            format!("{fy}/{:02}", end.year().rem_euclid(100))
        }
    }

    /// Formats the inclusive date range of fiscal year `fy`, e.g.
    /// `2024-04-06 - 2025-04-05`.
    #[must_use]
    pub fn date_range_display(&self, fy: i32) -> String {
        format!("{} - {}", self.start_of(fy), self.end_of(fy))
    }
}

impl std::fmt::Display for FiscalCalendar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}-{:02}", self.start_month, self.start_day)
    }
}
