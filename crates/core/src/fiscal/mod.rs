//! Fiscal year calendar and fiscal-year realignment.
//!
//! A fiscal year is identified by the calendar year in which it starts. The
//! start day is configurable (`MM-DD`) and defaults to January 1.

pub mod calendar;
pub mod error;
pub mod realign;

#[cfg(test)]
mod calendar_props;

pub use calendar::FiscalCalendar;
pub use error::FiscalError;
pub use realign::{EntryMove, EntryPlacement, RealignPlan, SequenceAssignment};
