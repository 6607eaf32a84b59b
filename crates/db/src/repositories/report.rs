//! Report repository: reads one consistent snapshot and hands it to the
//! report service.
//!
//! All rows of a report are read inside a single transaction so that the
//! account, group, class and grand totals reconcile.

use std::collections::HashMap;

use sea_orm::{
    ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, TransactionTrait,
};
use tallybook_core::fiscal::FiscalCalendar;
use tallybook_core::reports::{
    AccountMeta, ItemAmount, LedgerItem, Report, ReportError, ReportKind, ReportOutput,
    ReportRequest, ReportService,
};
use tallybook_shared::AppError;
use tallybook_shared::types::ObjectId;
use uuid::Uuid;

use super::support::{self, ItemFilter};
use crate::entities::{accounts, journal_entries, journal_items, objects};

/// Error types for report operations.
#[derive(Debug, thiserror::Error)]
pub enum ReportRepoError {
    /// The report request is invalid.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl ReportRepoError {
    /// Returns the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Report(err) => err.error_code(),
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl From<ReportRepoError> for AppError {
    fn from(err: ReportRepoError) -> Self {
        match err {
            ReportRepoError::Report(err) => err.into(),
            ReportRepoError::Database(err) => Self::Database(err.to_string()),
        }
    }
}

/// Report repository.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
    calendar: FiscalCalendar,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, calendar: FiscalCalendar) -> Self {
        Self { db, calendar }
    }

    /// Generates a report.
    ///
    /// # Errors
    ///
    /// Returns `MissingYear` or `MissingObject` when the kind needs them,
    /// `YearNotFound`, `AccountNotFound` or `ObjectNotFound` for unknown
    /// filters.
    pub async fn generate(&self, request: &ReportRequest) -> Result<ReportOutput, ReportRepoError> {
        let txn = self.db.begin().await?;
        let output = match request.kind {
            ReportKind::Object => self.object_report(&txn, request).await?,
            _ => self.year_report(&txn, request).await?,
        };
        txn.commit().await?;
        Ok(output)
    }

    async fn year_report(
        &self,
        txn: &DatabaseTransaction,
        request: &ReportRequest,
    ) -> Result<ReportOutput, ReportRepoError> {
        let year = request.year.ok_or(ReportError::MissingYear)?;
        let year_row = support::find_year(txn, year)
            .await?
            .ok_or(ReportError::YearNotFound(year))?;
        check_filters(txn, request).await?;

        let end_date = ReportService::clamp_end_date(&self.calendar, year, request.end_date);
        let filter = ItemFilter {
            year: Some(year),
            end_date: Some(end_date),
            account: request.account,
            object: request.object.map(ObjectId::into_inner),
            ..ItemFilter::default()
        };
        let rows = support::load_items(txn, &filter).await?;

        let report = match request.kind {
            ReportKind::Balance => {
                let accounts = support::load_chart(txn).await?;
                let incoming = support::load_incoming(txn, year, request.account).await?;
                Report::Balance(ReportService::balance(
                    &accounts,
                    &incoming,
                    &item_amounts(&rows),
                    request.include_open,
                ))
            }
            ReportKind::Results => {
                let accounts = support::load_chart(txn).await?;
                Report::Results(ReportService::results(
                    &accounts,
                    &item_amounts(&rows),
                    request.include_open,
                ))
            }
            ReportKind::Ledger | ReportKind::Object => {
                let accounts = support::load_chart(txn).await?;
                let items = ledger_items(txn, &accounts, rows).await?;
                Report::Ledger(ReportService::ledger(items, request.include_open))
            }
        };

        let open_entries = journal_entries::Entity::find()
            .filter(journal_entries::Column::Year.eq(year))
            .filter(journal_entries::Column::Closed.eq(false))
            .count(txn)
            .await?;
        let previous_year_open = support::find_year(txn, year - 1).await?.map(|y| y.is_open);
        let notices = ReportService::notices(
            request.kind,
            year,
            year_row.is_open,
            open_entries > 0,
            request.include_open,
            previous_year_open,
        );

        Ok(ReportOutput {
            report,
            notices,
            end_date: Some(end_date),
            include_open: request.include_open,
        })
    }

    async fn object_report(
        &self,
        txn: &DatabaseTransaction,
        request: &ReportRequest,
    ) -> Result<ReportOutput, ReportRepoError> {
        let object_id = request.object.ok_or(ReportError::MissingObject)?;
        let object = objects::Entity::find_by_id(object_id.into_inner())
            .one(txn)
            .await?
            .ok_or(ReportError::ObjectNotFound(object_id))?;
        check_filters(txn, request).await?;

        let filter = ItemFilter {
            object: Some(object.id),
            account: request.account,
            ..ItemFilter::default()
        };
        let rows = support::load_items(txn, &filter).await?;
        let accounts = support::load_chart(txn).await?;

        let report = ReportService::object(
            object_id,
            &object.name,
            &accounts,
            &item_amounts(&rows),
            request.include_open,
        );

        Ok(ReportOutput {
            report: Report::Object(report),
            notices: Vec::new(),
            end_date: None,
            include_open: request.include_open,
        })
    }
}

/// Checks that the account and object filters exist.
async fn check_filters(
    txn: &DatabaseTransaction,
    request: &ReportRequest,
) -> Result<(), ReportRepoError> {
    if let Some(num) = request.account {
        accounts::Entity::find_by_id(num)
            .one(txn)
            .await?
            .ok_or(ReportError::AccountNotFound(num))?;
    }
    if let Some(id) = request.object {
        objects::Entity::find_by_id(id.into_inner())
            .one(txn)
            .await?
            .ok_or(ReportError::ObjectNotFound(id))?;
    }
    Ok(())
}

fn item_amounts(rows: &[(journal_items::Model, journal_entries::Model)]) -> Vec<ItemAmount> {
    rows.iter()
        .map(|(item, entry)| ItemAmount {
            account: item.account,
            date: entry.date,
            amount: item.amount,
            closed: entry.closed,
        })
        .collect()
}

async fn ledger_items(
    txn: &DatabaseTransaction,
    accounts: &[AccountMeta],
    rows: Vec<(journal_items::Model, journal_entries::Model)>,
) -> Result<Vec<LedgerItem>, DbErr> {
    let names: HashMap<i32, &str> = accounts.iter().map(|a| (a.num, a.name.as_str())).collect();
    let object_names: HashMap<Uuid, String> = objects::Entity::find()
        .all(txn)
        .await?
        .into_iter()
        .map(|o| (o.id, o.name))
        .collect();

    Ok(rows
        .into_iter()
        .map(|(item, entry)| LedgerItem {
            account_num: item.account,
            account_name: names.get(&item.account).copied().unwrap_or_default().to_string(),
            seq: entry.seq,
            date: entry.date,
            description: item.description,
            amount: item.amount,
            object: item.object_id.and_then(|id| object_names.get(&id).cloned()),
            closed: entry.closed,
        })
        .collect())
}
