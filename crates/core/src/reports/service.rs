//! Report generation service.
//!
//! The store hands over chart metadata and raw item amounts; every sum is
//! computed here with exact decimals.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tallybook_shared::types::{DebitCredit, ObjectId};

use super::aggregate::{collate, sum_by_account};
use super::types::{
    AccountMeta, HierarchicalReport, ItemAmount, LedgerItem, LedgerLine, LedgerReport,
    LedgerSection, ObjectReport, ReportKind, ReportNotice, ReportRow,
};
use crate::fiscal::FiscalCalendar;

/// Balance report headers without open entries.
pub const BALANCE_HEADERS: [&str; 3] = ["Incoming", "Period", "Outgoing"];

/// Balance report headers with open entries.
pub const BALANCE_OPEN_HEADERS: [&str; 5] = ["Incoming", "Period", "Open", "Period+Open", "Outgoing"];

/// Results and object report headers.
pub const RESULTS_HEADERS: [&str; 1] = ["Amount"];

/// Service for generating reports.
pub struct ReportService;

impl ReportService {
    /// Returns the column headers of a report kind.
    #[must_use]
    pub fn headers(kind: ReportKind, include_open: bool) -> Vec<String> {
        let headers: &[&str] = match kind {
            ReportKind::Balance if include_open => &BALANCE_OPEN_HEADERS,
            ReportKind::Balance => &BALANCE_HEADERS,
            ReportKind::Results | ReportKind::Object => &RESULTS_HEADERS,
            ReportKind::Ledger => &[],
        };
        headers.iter().map(ToString::to_string).collect()
    }

    /// Returns the effective end date for a year: the requested date when it
    /// falls inside the fiscal year, the fiscal year end otherwise.
    #[must_use]
    pub fn clamp_end_date(
        calendar: &FiscalCalendar,
        year: i32,
        requested: Option<NaiveDate>,
    ) -> NaiveDate {
        match requested {
            Some(date) if calendar.contains(year, date) => date,
            _ => calendar.end_of(year),
        }
    }

    /// Collects the advisory notices for a report.
    ///
    /// `previous_year_open` is `None` when the previous year does not exist.
    #[must_use]
    pub fn notices(
        kind: ReportKind,
        year: i32,
        year_open: bool,
        has_open_entries: bool,
        include_open: bool,
        previous_year_open: Option<bool>,
    ) -> Vec<ReportNotice> {
        let mut notices = Vec::new();
        if year_open {
            notices.push(ReportNotice::YearOpen(year));
        }
        if kind == ReportKind::Balance && previous_year_open == Some(true) {
            notices.push(ReportNotice::PreviousYearOpen(year - 1));
        }
        if has_open_entries && !include_open {
            notices.push(ReportNotice::OpenEntriesExcluded);
        }
        notices
    }

    /// Generates the balance report.
    ///
    /// `accounts` is the chart ordered by account number; `incoming` holds the
    /// year's incoming balances; `items` the year's items up to the end date.
    /// Accounts whose incoming, period and (when included) open amounts are
    /// all zero are left out.
    #[must_use]
    pub fn balance(
        accounts: &[AccountMeta],
        incoming: &BTreeMap<i32, Decimal>,
        items: &[ItemAmount],
        include_open: bool,
    ) -> HierarchicalReport {
        let sums = sum_by_account(items);

        let rows: Vec<ReportRow> = accounts
            .iter()
            .filter(|a| a.in_balance)
            .filter_map(|account| {
                let inc = incoming.get(&account.num).copied().unwrap_or_default();
                let s = sums.get(&account.num).copied().unwrap_or_default();
                let open = if include_open { s.open } else { Decimal::ZERO };
                if inc.is_zero() && s.closed.is_zero() && open.is_zero() {
                    return None;
                }
                let values = if include_open {
                    vec![inc, s.closed, open, s.closed + open, inc + s.closed + open]
                } else {
                    vec![inc, s.closed, inc + s.closed]
                };
                Some(ReportRow::for_account(account, account.balance_negative, values))
            })
            .collect();

        let headers = Self::headers(ReportKind::Balance, include_open);
        let tree = collate(&rows, headers.len());
        HierarchicalReport {
            kind: ReportKind::Balance,
            headers,
            total_label: "Final balance".to_string(),
            tree,
        }
    }

    /// Generates the results report: the negated item sum per results
    /// account that has items.
    #[must_use]
    pub fn results(
        accounts: &[AccountMeta],
        items: &[ItemAmount],
        include_open: bool,
    ) -> HierarchicalReport {
        Self::results_of_kind(ReportKind::Results, accounts, items, include_open)
    }

    /// Generates the object report from items tagged with one object,
    /// across all years.
    #[must_use]
    pub fn object(
        object: ObjectId,
        object_name: &str,
        accounts: &[AccountMeta],
        items: &[ItemAmount],
        include_open: bool,
    ) -> ObjectReport {
        let report = Self::results_of_kind(ReportKind::Object, accounts, items, include_open);
        ObjectReport {
            object,
            object_name: object_name.to_string(),
            report,
            first_date: items.iter().map(|i| i.date).min(),
            last_date: items.iter().map(|i| i.date).max(),
        }
    }

    fn results_of_kind(
        kind: ReportKind,
        accounts: &[AccountMeta],
        items: &[ItemAmount],
        include_open: bool,
    ) -> HierarchicalReport {
        let counted: Vec<ItemAmount> = items
            .iter()
            .filter(|i| i.closed || include_open)
            .copied()
            .collect();
        let sums = sum_by_account(&counted);

        let rows: Vec<ReportRow> = accounts
            .iter()
            .filter(|a| !a.in_balance)
            .filter_map(|account| {
                let s = sums.get(&account.num)?;
                Some(ReportRow::for_account(account, false, vec![-(s.closed + s.open)]))
            })
            .collect();

        let headers = Self::headers(kind, include_open);
        let tree = collate(&rows, headers.len());
        HierarchicalReport {
            kind,
            headers,
            total_label: "Final result".to_string(),
            tree,
        }
    }

    /// Generates the ledger report.
    ///
    /// Items are grouped per account (ordered by number) and ordered by date
    /// and sequence within each account. The debit and credit totals of a
    /// section cover every item of that account in the filtered set.
    #[must_use]
    pub fn ledger(mut items: Vec<LedgerItem>, include_open: bool) -> LedgerReport {
        items.retain(|i| i.closed || include_open);
        items.sort_by(|a, b| {
            (a.account_num, a.date, a.seq).cmp(&(b.account_num, b.date, b.seq))
        });

        let mut sections: Vec<LedgerSection> = Vec::new();
        for item in items {
            if sections.last().is_none_or(|s| s.account_num != item.account_num) {
                sections.push(LedgerSection {
                    account_num: item.account_num,
                    account_name: item.account_name.clone(),
                    total_debit: Decimal::ZERO,
                    total_credit: Decimal::ZERO,
                    lines: Vec::new(),
                });
            }
            let Some(section) = sections.last_mut() else {
                continue;
            };
            let dc = DebitCredit::from_signed(item.amount);
            section.total_debit += dc.debit;
            section.total_credit += dc.credit;
            section.lines.push(LedgerLine {
                seq: item.seq,
                date: item.date,
                description: item.description,
                debit: dc.debit,
                credit: dc.credit,
                object: item.object,
                closed: item.closed,
            });
        }

        LedgerReport { sections }
    }
}
