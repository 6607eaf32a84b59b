//! Property-based tests for year closing.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::plan::{CloseContext, CloseService};
use crate::fiscal::FiscalCalendar;
use crate::reports::{AccountMeta, ItemAmount};

const BALANCE_ACCOUNTS: [i32; 3] = [1000, 2000, 3000];
const ALL_ACCOUNTS: [i32; 5] = [1000, 2000, 3000, 4000, 5000];

fn chart() -> Vec<AccountMeta> {
    ALL_ACCOUNTS
        .iter()
        .map(|&num| AccountMeta {
            num,
            name: format!("Account {num}"),
            group_name: format!("Group {}", num / 1000),
            group_foldable: false,
            class_name: if num < 4000 { "Balance" } else { "Results" }.to_string(),
            in_balance: num < 4000,
            balance_negative: (2000..4000).contains(&num),
        })
        .collect()
}

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|c| Decimal::new(c, 2))
}

/// Balanced two-line entries dated within 2024, some of them open.
fn entries_strategy() -> impl Strategy<Value = Vec<ItemAmount>> {
    prop::collection::vec(
        (
            prop::sample::select(ALL_ACCOUNTS.to_vec()),
            prop::sample::select(ALL_ACCOUNTS.to_vec()),
            amount_strategy(),
            0u32..366,
            any::<bool>(),
        ),
        0..30,
    )
    .prop_map(|entries| {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        entries
            .into_iter()
            .flat_map(|(debit, credit, amount, offset, closed)| {
                let date = start + chrono::Days::new(u64::from(offset));
                [
                    ItemAmount { account: debit, date, amount, closed },
                    ItemAmount { account: credit, date, amount: -amount, closed },
                ]
            })
            .collect()
    })
}

/// Incoming balances that sum to zero.
fn incoming_strategy() -> impl Strategy<Value = BTreeMap<i32, Decimal>> {
    (amount_strategy(), amount_strategy()).prop_map(|(a, b)| {
        BTreeMap::from([(1000, a + b), (2000, -a), (3000, -b)])
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Balanced books stay balanced: the next year's incoming balances sum to
    /// zero whichever balance account receives the result.
    #[test]
    fn prop_next_year_balances(
        items in entries_strategy(),
        incoming in incoming_strategy(),
        result_account in prop::sample::select(BALANCE_ACCOUNTS.to_vec()),
    ) {
        let context = CloseContext { year_open: true, ..CloseContext::default() };
        let plan = CloseService::plan(
            &FiscalCalendar::default(), 2024, result_account, &chart(), &incoming, &items, &context,
        ).unwrap();

        let total: Decimal = plan.incoming_balances.iter().map(|r| r.amount).sum();
        prop_assert_eq!(total, Decimal::ZERO);
        prop_assert!(plan.incoming_balances.iter().all(|r| !r.amount.is_zero()));
        prop_assert!(plan.incoming_balances.iter().all(|r| BALANCE_ACCOUNTS.contains(&r.account)));
    }

    /// The result equals the closed period movement of the balance accounts.
    #[test]
    fn prop_result_matches_balance_movement(items in entries_strategy()) {
        let cal = FiscalCalendar::default();
        let outgoing = CloseService::outgoing_balances(&cal, 2024, &chart(), &BTreeMap::new(), &items);
        let result = CloseService::year_result(&cal, 2024, &chart(), &items);
        let movement: Decimal = outgoing.iter().map(|o| o.period).sum();
        prop_assert_eq!(result, movement);
    }
}
