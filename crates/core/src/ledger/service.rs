//! Ledger service for posting rules.
//!
//! This module provides the business rules applied around the entry
//! validator: which years and entries accept changes, entry dates, sequence
//! allocation and automatic postings.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tallybook_shared::types::{JournalEntryId, money::has_cent_precision};

use super::error::LedgerError;
use super::types::{AutomaticItem, EntryLine, ObjectRequirement, ValidatedEntry};
use super::validation::validate_lines;
use crate::fiscal::FiscalCalendar;

/// Information about an account needed for validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    /// Account number.
    pub num: i32,
    /// Account name.
    pub name: String,
    /// Cost object rule for items on this account.
    pub object_requirement: ObjectRequirement,
}

/// Ledger service for entry validation and posting rules.
///
/// This service contains pure business logic with no database dependencies.
pub struct LedgerService;

impl LedgerService {
    /// Validates a candidate entry in a fiscal year.
    ///
    /// Runs the year, date and line checks in that order.
    ///
    /// # Errors
    ///
    /// Returns `YearClosed`, `DateOutsideYear`, or a validator error.
    pub fn validate_entry<A>(
        calendar: &FiscalCalendar,
        year: i32,
        year_open: bool,
        date: NaiveDate,
        lines: &[EntryLine],
        account_lookup: A,
    ) -> Result<ValidatedEntry, LedgerError>
    where
        A: Fn(i32) -> Result<AccountInfo, LedgerError>,
    {
        Self::validate_year_open(year, year_open)?;
        Self::validate_entry_date(calendar, year, date)?;
        validate_lines(lines, account_lookup)
    }

    /// Ensures a year accepts new or changed entries.
    ///
    /// # Errors
    ///
    /// Returns `YearClosed` if the year is closed.
    pub const fn validate_year_open(year: i32, is_open: bool) -> Result<(), LedgerError> {
        if is_open {
            Ok(())
        } else {
            Err(LedgerError::YearClosed(year))
        }
    }

    /// Ensures an entry can still be changed or deleted.
    ///
    /// # Errors
    ///
    /// Returns `EntryClosed` for closed entries.
    pub const fn validate_can_modify(id: JournalEntryId, closed: bool) -> Result<(), LedgerError> {
        if closed {
            Err(LedgerError::EntryClosed(id))
        } else {
            Ok(())
        }
    }

    /// Ensures `date` belongs to fiscal year `year`.
    ///
    /// # Errors
    ///
    /// Returns `DateOutsideYear` otherwise.
    pub fn validate_entry_date(
        calendar: &FiscalCalendar,
        year: i32,
        date: NaiveDate,
    ) -> Result<(), LedgerError> {
        if calendar.contains(year, date) {
            Ok(())
        } else {
            Err(LedgerError::DateOutsideYear { date, year })
        }
    }

    /// Returns the sequence number for the next entry in a year.
    #[must_use]
    pub fn next_sequence(current_max: Option<i32>) -> i32 {
        current_max.unwrap_or(0) + 1
    }

    /// Returns the date offered for a new entry: the latest entry date in the
    /// year, or the first day of the fiscal year.
    #[must_use]
    pub fn default_entry_date(
        calendar: &FiscalCalendar,
        year: i32,
        latest: Option<NaiveDate>,
    ) -> NaiveDate {
        latest.unwrap_or_else(|| calendar.start_of(year))
    }

    /// Validates the items of an automatic posting before anything is looked up.
    ///
    /// # Errors
    ///
    /// Returns `EmptyEntry`, `ZeroAmountLine`, `ExcessivePrecision` or
    /// `UnbalancedEntry`.
    pub fn validate_automatic_items(items: &[AutomaticItem]) -> Result<(), LedgerError> {
        if items.is_empty() {
            return Err(LedgerError::EmptyEntry);
        }
        for (idx, item) in items.iter().enumerate() {
            if item.amount.is_zero() {
                return Err(LedgerError::ZeroAmountLine { line: idx + 1 });
            }
            if !has_cent_precision(item.amount) {
                return Err(LedgerError::ExcessivePrecision(item.amount));
            }
        }
        let sum: Decimal = items.iter().map(|i| i.amount).sum();
        if sum.is_zero() {
            Ok(())
        } else {
            Err(LedgerError::UnbalancedEntry(sum))
        }
    }
}
