//! Closing plan computation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::{CloseError, CloseWarning};
use crate::fiscal::FiscalCalendar;
use crate::reports::{AccountMeta, ItemAmount};

/// State of the year and its neighbours, read by the store before planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CloseContext {
    /// The year being closed is still open.
    pub year_open: bool,
    /// Whether the preceding year is open; `None` if it does not exist.
    pub prior_year_open: Option<bool>,
    /// The next year already has incoming-balance rows.
    pub next_year_has_incoming: bool,
    /// Number of open entries in the year being closed.
    pub open_entries: u64,
    /// Replace the next year's existing incoming balances.
    pub replace_existing: bool,
}

/// Outgoing balance of one balance-sheet account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingBalance {
    /// Account number.
    pub account: i32,
    /// Account name.
    pub name: String,
    /// Incoming balance of the year.
    pub incoming: Decimal,
    /// Sum of closed items up to the year end.
    pub period: Decimal,
    /// Incoming plus period.
    pub outgoing: Decimal,
}

/// One incoming-balance row to write into the next year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextIncoming {
    /// Account number.
    pub account: i32,
    /// Signed amount, never zero.
    pub amount: Decimal,
}

/// Everything needed to close a year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosePlan {
    /// Year being closed.
    pub year: i32,
    /// Year receiving the incoming balances.
    pub next_year: i32,
    /// Last day of the year being closed.
    pub end_date: NaiveDate,
    /// Account receiving the result.
    pub result_account: i32,
    /// Result of the year (negated sum of closed results items).
    pub result: Decimal,
    /// Outgoing balances, ordered by account number.
    pub outgoing: Vec<OutgoingBalance>,
    /// Rows for the next year, ordered by account number.
    pub incoming_balances: Vec<NextIncoming>,
    /// Advisory warnings.
    pub warnings: Vec<CloseWarning>,
}

/// Service for planning year closes.
pub struct CloseService;

impl CloseService {
    /// Computes the closed-only outgoing balance of every balance-sheet
    /// account as of the fiscal year end.
    ///
    /// Accounts with zero incoming and zero period activity are left out.
    #[must_use]
    pub fn outgoing_balances(
        calendar: &FiscalCalendar,
        year: i32,
        accounts: &[AccountMeta],
        incoming: &BTreeMap<i32, Decimal>,
        items: &[ItemAmount],
    ) -> Vec<OutgoingBalance> {
        let end = calendar.end_of(year);
        let mut period: BTreeMap<i32, Decimal> = BTreeMap::new();
        for item in items.iter().filter(|i| i.closed && i.date <= end) {
            *period.entry(item.account).or_default() += item.amount;
        }

        accounts
            .iter()
            .filter(|a| a.in_balance)
            .filter_map(|account| {
                let inc = incoming.get(&account.num).copied().unwrap_or_default();
                let per = period.get(&account.num).copied().unwrap_or_default();
                if inc.is_zero() && per.is_zero() {
                    return None;
                }
                Some(OutgoingBalance {
                    account: account.num,
                    name: account.name.clone(),
                    incoming: inc,
                    period: per,
                    outgoing: inc + per,
                })
            })
            .collect()
    }

    /// Computes the year's result: the negated sum of closed items on
    /// results accounts dated within the fiscal year.
    #[must_use]
    pub fn year_result(
        calendar: &FiscalCalendar,
        year: i32,
        accounts: &[AccountMeta],
        items: &[ItemAmount],
    ) -> Decimal {
        let results_accounts: Vec<i32> = accounts
            .iter()
            .filter(|a| !a.in_balance)
            .map(|a| a.num)
            .collect();

        -items
            .iter()
            .filter(|i| i.closed && calendar.contains(year, i.date))
            .filter(|i| results_accounts.contains(&i.account))
            .map(|i| i.amount)
            .sum::<Decimal>()
    }

    /// Collects the advisory warnings for closing `year`.
    #[must_use]
    pub fn warnings(year: i32, context: &CloseContext) -> Vec<CloseWarning> {
        let mut warnings = Vec::new();
        if context.prior_year_open == Some(true) {
            warnings.push(CloseWarning::PriorYearOpen(year - 1));
        }
        if context.open_entries > 0 {
            warnings.push(CloseWarning::OpenEntriesExcluded(context.open_entries));
        }
        if context.next_year_has_incoming && context.replace_existing {
            warnings.push(CloseWarning::IncomingBalancesReplaced(year + 1));
        }
        warnings
    }

    /// Plans the close of `year`, posting the result to `result_account`.
    ///
    /// The result is merged into the result account's own outgoing balance,
    /// so the next year gets at most one row per account. A merged zero is
    /// omitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is already closed, the result account is
    /// unknown or not a balance-sheet account, or the next year already has
    /// incoming balances and `replace_existing` is not set.
    pub fn plan(
        calendar: &FiscalCalendar,
        year: i32,
        result_account: i32,
        accounts: &[AccountMeta],
        incoming: &BTreeMap<i32, Decimal>,
        items: &[ItemAmount],
        context: &CloseContext,
    ) -> Result<ClosePlan, CloseError> {
        if !context.year_open {
            return Err(CloseError::YearAlreadyClosed(year));
        }
        let target = accounts
            .iter()
            .find(|a| a.num == result_account)
            .ok_or(CloseError::AccountNotFound(result_account))?;
        if !target.in_balance {
            return Err(CloseError::ResultAccountNotInBalance(result_account));
        }
        if context.next_year_has_incoming && !context.replace_existing {
            return Err(CloseError::DuplicateIncomingBalance(year + 1));
        }

        let outgoing = Self::outgoing_balances(calendar, year, accounts, incoming, items);
        let result = Self::year_result(calendar, year, accounts, items);

        let mut next: BTreeMap<i32, Decimal> = outgoing
            .iter()
            .map(|o| (o.account, o.outgoing))
            .collect();
        *next.entry(result_account).or_default() -= result;

        let incoming_balances = next
            .into_iter()
            .filter(|(_, amount)| !amount.is_zero())
            .map(|(account, amount)| NextIncoming { account, amount })
            .collect();

        Ok(ClosePlan {
            year,
            next_year: year + 1,
            end_date: calendar.end_of(year),
            result_account,
            result,
            outgoing,
            incoming_balances,
            warnings: Self::warnings(year, context),
        })
    }
}
