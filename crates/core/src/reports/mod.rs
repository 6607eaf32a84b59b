//! Hierarchical report generation.
//!
//! This module provides pure business logic for the accounting reports:
//! - Balance report (incoming, period, outgoing per balance-sheet account)
//! - Results report (negated item sums per results account)
//! - Object report (results for one cost object across all years)
//! - Ledger report (chronological items per account with account totals)
//!
//! Every hierarchical report is a class -> group -> account tree built by a
//! two-pass aggregation: partition sums first, collation second.

pub mod aggregate;
pub mod error;
pub mod service;
pub mod types;


pub use aggregate::{collate, sum_by_account};
pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
