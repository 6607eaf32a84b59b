//! Fiscal year closing.
//!
//! Closing a year carries every balance-sheet account's outgoing balance into
//! the next year as an incoming balance, moves the year's result onto a
//! designated balance-sheet account and marks the year closed. This module
//! computes the plan; the store writes it in one transaction.

pub mod error;
pub mod plan;

#[cfg(test)]
mod plan_props;

pub use error::{CloseError, CloseWarning};
pub use plan::{CloseContext, ClosePlan, CloseService, NextIncoming, OutgoingBalance};
