//! Fiscal year repository: year close and fiscal-year realignment.
//!
//! Closing a year writes the next year's incoming balances and marks the
//! year closed in one transaction, with the year row locked so two closes
//! of the same year serialize.

use std::collections::{BTreeMap, BTreeSet};

use sea_orm::ActiveValue::Unchanged;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, Set, TransactionTrait,
};
use tallybook_core::closing::{CloseContext, CloseError, ClosePlan, CloseService};
use tallybook_core::fiscal::{EntryPlacement, FiscalCalendar, RealignPlan, SequenceAssignment};
use tallybook_core::reports::ItemAmount;
use tallybook_shared::AppError;
use tallybook_shared::types::JournalEntryId;
use uuid::Uuid;

use super::support::{self, ItemFilter};
use crate::entities::{incoming_balances, journal_entries, years};

/// Error types for fiscal year operations.
#[derive(Debug, thiserror::Error)]
pub enum FiscalRepoError {
    /// The year cannot be closed.
    #[error(transparent)]
    Close(#[from] CloseError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl FiscalRepoError {
    /// Returns the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Close(err) => err.error_code(),
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl From<FiscalRepoError> for AppError {
    fn from(err: FiscalRepoError) -> Self {
        match err {
            FiscalRepoError::Close(err) => err.into(),
            FiscalRepoError::Database(err) => Self::Database(err.to_string()),
        }
    }
}

/// Outcome of a realignment check or run.
#[derive(Debug, Clone, Default)]
pub struct RealignReport {
    /// Entries stored under the wrong fiscal year.
    pub plan: RealignPlan,
    /// New year and sequence number of every moved entry.
    pub assignments: Vec<SequenceAssignment>,
    /// Target years that do not exist yet; they are created closed.
    pub missing_years: Vec<i32>,
    /// Source years left empty by the move; they are deleted.
    pub emptied_years: Vec<i32>,
    /// Incoming-balance rows stored under each affected year.
    pub balance_rows: BTreeMap<i32, u64>,
}

/// Fiscal year repository.
#[derive(Debug, Clone)]
pub struct FiscalRepository {
    db: DatabaseConnection,
    calendar: FiscalCalendar,
}

impl FiscalRepository {
    /// Creates a new fiscal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, calendar: FiscalCalendar) -> Self {
        Self { db, calendar }
    }

    /// Creates a fiscal year row.
    ///
    /// # Errors
    ///
    /// Returns an error if the year exists or the insert fails.
    pub async fn create_year(
        &self,
        year: i32,
        is_open: bool,
    ) -> Result<years::Model, FiscalRepoError> {
        let created = support::insert_year(&self.db, year, is_open).await?;
        tracing::info!(year, is_open, "Fiscal year created");
        Ok(created)
    }

    // ========================================================================
    // Year close
    // ========================================================================

    /// Computes the close of `year` without writing anything.
    ///
    /// # Errors
    ///
    /// Returns the same refusals as [`Self::close_year`].
    pub async fn preview_close(
        &self,
        year: i32,
        result_account: i32,
        replace_existing: bool,
    ) -> Result<ClosePlan, FiscalRepoError> {
        let txn = self.db.begin().await?;
        let plan = self
            .plan_close(&txn, year, result_account, replace_existing, false)
            .await?;
        txn.commit().await?;
        Ok(plan)
    }

    /// Closes `year`, carrying balances into the next year and posting the
    /// year's result to `result_account`.
    ///
    /// The next year is created open if missing. When `replace_existing` is
    /// set, the next year's existing incoming balances are replaced;
    /// otherwise their presence refuses the close.
    ///
    /// # Errors
    ///
    /// Returns `YearNotFound`, `YearAlreadyClosed`, `AccountNotFound`,
    /// `ResultAccountNotInBalance` or `DuplicateIncomingBalance`. Nothing is
    /// written on error.
    pub async fn close_year(
        &self,
        year: i32,
        result_account: i32,
        replace_existing: bool,
    ) -> Result<ClosePlan, FiscalRepoError> {
        let txn = self.db.begin().await?;

        let plan = self
            .plan_close(&txn, year, result_account, replace_existing, true)
            .await?;

        if support::find_year(&txn, plan.next_year).await?.is_none() {
            support::insert_year(&txn, plan.next_year, true).await?;
        }
        if replace_existing {
            incoming_balances::Entity::delete_many()
                .filter(incoming_balances::Column::Year.eq(plan.next_year))
                .exec(&txn)
                .await?;
        }
        for row in &plan.incoming_balances {
            incoming_balances::ActiveModel {
                id: Set(Uuid::now_v7()),
                year: Set(plan.next_year),
                account: Set(row.account),
                amount: Set(row.amount),
            }
            .insert(&txn)
            .await?;
        }
        years::ActiveModel {
            year: Unchanged(year),
            is_open: Set(false),
        }
        .update(&txn)
        .await?;

        txn.commit().await?;

        for warning in &plan.warnings {
            tracing::warn!(year, %warning, "Fiscal year closed with warning");
        }
        tracing::info!(
            year,
            result = %plan.result,
            result_account,
            incoming_rows = plan.incoming_balances.len(),
            "Fiscal year closed"
        );

        Ok(plan)
    }

    async fn plan_close(
        &self,
        txn: &DatabaseTransaction,
        year: i32,
        result_account: i32,
        replace_existing: bool,
        lock: bool,
    ) -> Result<ClosePlan, FiscalRepoError> {
        let row = if lock {
            support::lock_year(txn, year).await?
        } else {
            support::find_year(txn, year).await?
        }
        .ok_or(CloseError::YearNotFound(year))?;

        let prior_year_open = support::find_year(txn, year - 1).await?.map(|y| y.is_open);
        let next_rows = incoming_balances::Entity::find()
            .filter(incoming_balances::Column::Year.eq(year + 1))
            .count(txn)
            .await?;
        let open_entries = journal_entries::Entity::find()
            .filter(journal_entries::Column::Year.eq(year))
            .filter(journal_entries::Column::Closed.eq(false))
            .count(txn)
            .await?;

        let accounts = support::load_chart(txn).await?;
        let incoming = support::load_incoming(txn, year, None).await?;
        let filter = ItemFilter {
            year: Some(year),
            ..ItemFilter::default()
        };
        let items: Vec<ItemAmount> = support::load_items(txn, &filter)
            .await?
            .into_iter()
            .map(|(item, entry)| ItemAmount {
                account: item.account,
                date: entry.date,
                amount: item.amount,
                closed: entry.closed,
            })
            .collect();

        let context = CloseContext {
            year_open: row.is_open,
            prior_year_open,
            next_year_has_incoming: next_rows > 0,
            open_entries,
            replace_existing,
        };
        Ok(CloseService::plan(
            &self.calendar,
            year,
            result_account,
            &accounts,
            &incoming,
            &items,
            &context,
        )?)
    }

    // ========================================================================
    // Realignment
    // ========================================================================

    /// Lists the entries stored under a fiscal year their date does not
    /// belong to, without changing anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn realign_check(&self) -> Result<RealignReport, FiscalRepoError> {
        let txn = self.db.begin().await?;
        let report = realign_report(&self.calendar, &txn).await?;
        txn.commit().await?;
        Ok(report)
    }

    /// Moves every misplaced entry into the fiscal year of its date.
    ///
    /// Missing target years are created closed, moved entries get sequence
    /// numbers after the target year's highest, and source years left
    /// without entries and incoming balances are deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails; nothing is changed
    /// in that case.
    pub async fn realign_execute(&self) -> Result<RealignReport, FiscalRepoError> {
        let txn = self.db.begin().await?;
        let report = realign_report(&self.calendar, &txn).await?;
        if report.plan.is_empty() {
            txn.commit().await?;
            return Ok(report);
        }

        for &year in &report.missing_years {
            support::insert_year(&txn, year, false).await?;
            tracing::info!(year, "Fiscal year created closed for realignment");
        }
        for assignment in &report.assignments {
            journal_entries::ActiveModel {
                id: Unchanged(assignment.id.into_inner()),
                year: Set(assignment.year),
                seq: Set(assignment.seq),
                ..Default::default()
            }
            .update(&txn)
            .await?;
        }
        if !report.emptied_years.is_empty() {
            years::Entity::delete_many()
                .filter(years::Column::Year.is_in(report.emptied_years.clone()))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;

        tracing::info!(
            moved = report.assignments.len(),
            created = report.missing_years.len(),
            deleted = report.emptied_years.len(),
            "Journal entries realigned to fiscal years"
        );

        Ok(report)
    }
}

async fn realign_report<C: ConnectionTrait>(
    calendar: &FiscalCalendar,
    conn: &C,
) -> Result<RealignReport, DbErr> {
    let entries = journal_entries::Entity::find().all(conn).await?;

    let mut entry_counts: BTreeMap<i32, u64> = BTreeMap::new();
    let mut max_seq: BTreeMap<i32, i32> = BTreeMap::new();
    for entry in &entries {
        *entry_counts.entry(entry.year).or_default() += 1;
        let max = max_seq.entry(entry.year).or_default();
        *max = (*max).max(entry.seq);
    }

    let mut balance_counts: BTreeMap<i32, u64> = BTreeMap::new();
    for balance in incoming_balances::Entity::find().all(conn).await? {
        *balance_counts.entry(balance.year).or_default() += 1;
    }

    let existing: BTreeSet<i32> = years::Entity::find()
        .all(conn)
        .await?
        .into_iter()
        .map(|y| y.year)
        .collect();

    let placements: Vec<EntryPlacement> = entries
        .into_iter()
        .map(|e| EntryPlacement {
            id: JournalEntryId::from_uuid(e.id),
            year: e.year,
            seq: e.seq,
            date: e.date,
        })
        .collect();
    let plan = RealignPlan::build(calendar, &placements);

    let assignments =
        plan.sequence_assignments(|year| max_seq.get(&year).copied().unwrap_or_default());
    let emptied_years = plan.emptied_years(
        |year| entry_counts.get(&year).copied().unwrap_or_default(),
        |year| balance_counts.get(&year).copied().unwrap_or_default(),
    );
    let missing_years = plan
        .target_years()
        .into_iter()
        .filter(|year| !existing.contains(year))
        .collect();
    let balance_rows = plan
        .affected_years()
        .into_iter()
        .filter_map(|year| balance_counts.get(&year).map(|count| (year, *count)))
        .collect();

    Ok(RealignReport {
        plan,
        assignments,
        missing_years,
        emptied_years,
        balance_rows,
    })
}
