//! Property-based tests for the fiscal calendar.

use chrono::{Datelike, Duration, NaiveDate};
use proptest::prelude::*;

use super::calendar::FiscalCalendar;

/// Strategy for any valid start day, February 29 included.
fn start_day() -> impl Strategy<Value = FiscalCalendar> {
    (1u32..=12, 1u32..=31)
        .prop_filter_map("valid day", |(m, d)| FiscalCalendar::new(m, d).ok())
}

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (1900i32..2200, 0u32..366).prop_map(|(y, offset)| {
        NaiveDate::from_ymd_opt(y, 1, 1).unwrap() + Duration::days(i64::from(offset))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Both ends of a fiscal year map back to that year.
    #[test]
    fn prop_bounds_are_inclusive(cal in start_day(), fy in 1900i32..2200) {
        prop_assert_eq!(cal.fiscal_year_of(cal.start_of(fy)), fy);
        prop_assert_eq!(cal.fiscal_year_of(cal.end_of(fy)), fy);
    }

    /// Consecutive fiscal years tile the timeline without gaps.
    #[test]
    fn prop_years_are_contiguous(cal in start_day(), fy in 1900i32..2200) {
        prop_assert_eq!(cal.end_of(fy).succ_opt().unwrap(), cal.start_of(fy + 1));
    }

    /// Every date lies inside the fiscal year it is mapped to.
    #[test]
    fn prop_date_within_its_year(cal in start_day(), d in any_date()) {
        let fy = cal.fiscal_year_of(d);
        prop_assert!(cal.start_of(fy) <= d && d <= cal.end_of(fy));
        prop_assert!(fy == d.year() || fy == d.year() - 1);
    }

    /// Calendar-year configuration labels years with the plain number.
    #[test]
    fn prop_calendar_year_label(fy in 1900i32..2200) {
        prop_assert_eq!(FiscalCalendar::calendar_year().label(fy), fy.to_string());
    }

    /// Split configuration labels years as `N/NN`.
    #[test]
    fn prop_split_year_label(fy in 1900i32..2200) {
        let cal = FiscalCalendar::from_setting("04-06").unwrap();
        prop_assert_eq!(cal.label(fy), format!("{}/{:02}", fy, (fy + 1) % 100));
    }
}
