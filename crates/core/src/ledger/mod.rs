//! Double-entry journal logic.
//!
//! This module implements the rules every journal entry must satisfy before
//! it is stored:
//! - Domain types for entry lines (signed or debit/credit input)
//! - Error types for validation and ledger state
//! - The entry validator (zero-sum and object-requirement checks)
//! - Ledger service for posting rules (closed years, closed entries, dates)
//! - Latest account balance calculation

pub mod balance;
pub mod error;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod service_props;
#[cfg(test)]
mod validation_props;

pub use balance::{IncomingPoint, latest_account_balance};
pub use error::LedgerError;
pub use service::{AccountInfo, LedgerService};
pub use types::{
    AutomaticItem, DESCRIPTION_MAX_CHARS, DebitCreditLine, EntryLine, ObjectRequirement,
    PostedLine, ValidatedEntry, truncate_description,
};
pub use validation::{validate_debit_credit_lines, validate_lines};
