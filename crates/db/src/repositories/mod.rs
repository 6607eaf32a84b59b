//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Validation and arithmetic live in `tallybook-core`; repositories load the
//! rows, call into the core services and persist the outcome.

pub mod chart;
pub mod fiscal;
pub mod journal;
pub mod report;

mod support;

pub use chart::{
    ChartError, ChartRepository, CreateAccountInput, CreateClassInput, CreateGroupInput,
};
pub use fiscal::{FiscalRepoError, FiscalRepository, RealignReport};
pub use journal::{
    AutomaticEntryInput, CreateEntryInput, EntryLines, EntryListing, EntryWithItems, JournalError,
    JournalRepository, LedgerSettings,
};
pub use report::{ReportRepoError, ReportRepository};
