//! Property-based tests for the entry validator.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::service::AccountInfo;
use super::types::{EntryLine, ObjectRequirement};
use super::validation::validate_lines;

/// Strategy to generate a non-zero amount with two decimals.
fn nonzero_amount() -> impl Strategy<Value = Decimal> {
    prop_oneof![1i64..100_000_000i64, -100_000_000i64..-1i64]
        .prop_map(|cents| Decimal::new(cents, 2))
}

fn account(num: i32) -> Result<AccountInfo, LedgerError> {
    Ok(AccountInfo {
        num,
        name: String::new(),
        object_requirement: ObjectRequirement::Optional,
    })
}

/// Lines followed by one balancing line, so the entry sums to zero.
fn balanced_lines() -> impl Strategy<Value = Vec<EntryLine>> {
    prop::collection::vec((1000i32..9999, nonzero_amount()), 1..12).prop_filter_map(
        "balancing line would be zero",
        |raw| {
            let sum: Decimal = raw.iter().map(|(_, a)| *a).sum();
            if sum.is_zero() {
                return None;
            }
            let mut lines: Vec<EntryLine> = raw
                .into_iter()
                .map(|(acc, amount)| EntryLine::new(acc, amount, ""))
                .collect();
            lines.push(EntryLine::new(1930, -sum, "balance"));
            Some(lines)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Accepted entries always sum to exactly zero.
    #[test]
    fn prop_accepted_entries_sum_to_zero(lines in balanced_lines()) {
        let entry = validate_lines(&lines, account).unwrap();
        let sum: Decimal = entry.lines.iter().map(|l| l.amount).sum();
        prop_assert_eq!(sum, Decimal::ZERO);
        prop_assert_eq!(entry.totals.debit, entry.totals.credit);
    }

    /// Any non-zero sum is reported back unchanged.
    #[test]
    fn prop_unbalanced_reports_sum(
        lines in balanced_lines(),
        extra in nonzero_amount(),
    ) {
        let mut lines = lines;
        lines.push(EntryLine::new(1000, extra, ""));
        prop_assert_eq!(
            validate_lines(&lines, account),
            Err(LedgerError::UnbalancedEntry(extra))
        );
    }

    /// Lines marked deleted are ignored by the balance check and dropped.
    #[test]
    fn prop_deleted_lines_do_not_count(
        lines in balanced_lines(),
        junk in nonzero_amount(),
    ) {
        let mut with_junk = lines.clone();
        with_junk.push(EntryLine::new(1000, junk, "").deleted());
        let entry = validate_lines(&with_junk, account).unwrap();
        prop_assert_eq!(entry.lines.len(), lines.len());
    }

    /// Entries where every line is deleted are rejected.
    #[test]
    fn prop_all_deleted_rejected(lines in balanced_lines()) {
        let deleted: Vec<EntryLine> = lines.into_iter().map(EntryLine::deleted).collect();
        prop_assert_eq!(
            validate_lines(&deleted, account),
            Err(LedgerError::NoEffectiveLines)
        );
    }
}
