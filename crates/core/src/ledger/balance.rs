//! Latest account balance.
//!
//! The balance starts from the account's most recent incoming balance (the
//! last closed year carried into the next) and adds every item posted in
//! that year or later. Open entries are included so pending transfers show.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The most recent incoming balance of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingPoint {
    /// Fiscal year the balance was carried into.
    pub year: i32,
    /// Signed amount.
    pub amount: Decimal,
}

/// Computes the latest balance from the newest incoming balance and
/// `(year, amount)` items of the account.
///
/// Without an incoming balance every item counts.
#[must_use]
pub fn latest_account_balance<I>(incoming: Option<IncomingPoint>, items: I) -> Decimal
where
    I: IntoIterator<Item = (i32, Decimal)>,
{
    let (from_year, start) = incoming.map_or((i32::MIN, Decimal::ZERO), |p| (p.year, p.amount));
    items
        .into_iter()
        .filter(|(year, _)| *year >= from_year)
        .fold(start, |acc, (_, amount)| acc + amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_without_incoming_balance_sums_everything() {
        let items = vec![(2022, dec!(10)), (2023, dec!(-3)), (2024, dec!(1.5))];
        assert_eq!(latest_account_balance(None, items), dec!(8.5));
    }

    #[test]
    fn test_starts_from_incoming_year() {
        let incoming = IncomingPoint {
            year: 2024,
            amount: dec!(100),
        };
        let items = vec![(2023, dec!(999)), (2024, dec!(-20)), (2025, dec!(5))];
        assert_eq!(latest_account_balance(Some(incoming), items), dec!(85));
    }

    #[test]
    fn test_no_items() {
        let incoming = IncomingPoint {
            year: 2024,
            amount: dec!(-7.25),
        };
        assert_eq!(latest_account_balance(Some(incoming), Vec::new()), dec!(-7.25));
    }
}
