//! Property-based tests for ledger posting rules.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use super::service::LedgerService;
use crate::fiscal::FiscalCalendar;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Allocating N sequence numbers one after another yields 1..=N.
    #[test]
    fn prop_sequences_are_gap_free(n in 1usize..200) {
        let mut current = None;
        let mut seen = Vec::with_capacity(n);
        for _ in 0..n {
            let next = LedgerService::next_sequence(current);
            seen.push(next);
            current = Some(next);
        }
        let expected: Vec<i32> = (1..=i32::try_from(n).unwrap()).collect();
        prop_assert_eq!(seen, expected);
    }

    /// A date is accepted exactly for the fiscal year it maps to.
    #[test]
    fn prop_entry_date_matches_fiscal_year(offset in 0i64..3000, month in 1u32..=12) {
        let cal = FiscalCalendar::new(month, 1).unwrap();
        let d = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(offset);
        let fy = cal.fiscal_year_of(d);
        prop_assert!(LedgerService::validate_entry_date(&cal, fy, d).is_ok());
        prop_assert!(LedgerService::validate_entry_date(&cal, fy + 1, d).is_err());
    }

    /// The default date for an empty year is its first day.
    #[test]
    fn prop_default_date_of_empty_year(fy in 1990i32..2100, month in 1u32..=12) {
        let cal = FiscalCalendar::new(month, 1).unwrap();
        let d = LedgerService::default_entry_date(&cal, fy, None);
        prop_assert_eq!(cal.fiscal_year_of(d), fy);
    }
}
