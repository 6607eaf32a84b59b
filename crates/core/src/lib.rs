//! Core business logic for Tallybook.
//!
//! This crate contains pure accounting logic with ZERO database dependencies.
//! All domain types, validation rules, and calculations live here; the
//! `tallybook-db` crate feeds it rows and persists its decisions.
//!
//! # Modules
//!
//! - `ledger` - Double-entry validation, sequencing and account balances
//! - `fiscal` - Fiscal year calendar and fiscal-year realignment
//! - `closing` - Year-close planning and incoming-balance carry-forward
//! - `reports` - Balance, results, object and ledger reports

pub mod closing;
pub mod fiscal;
pub mod ledger;
pub mod reports;
