//! Journal repository: entries, items and the fiscal years they live in.
//!
//! Every mutation runs in one database transaction. The year row is locked
//! while an entry is created so sequence numbers stay gap-free per year.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func, LikeExpr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tallybook_core::fiscal::{FiscalCalendar, FiscalError};
use tallybook_core::ledger::{
    AccountInfo, AutomaticItem, DebitCreditLine, EntryLine, IncomingPoint, LedgerError,
    LedgerService, ObjectRequirement, PostedLine, ValidatedEntry, latest_account_balance,
    validate_debit_credit_lines, validate_lines,
};
use tallybook_shared::config::AccountingConfig;
use tallybook_shared::types::{JournalEntryId, ObjectId, PageRequest, PageResponse};
use tallybook_shared::AppError;
use uuid::Uuid;

use super::support::{self, ItemFilter};
use crate::entities::{
    accounts, incoming_balances, journal_entries, journal_items, journal_urls, objects, years,
};

/// Error types for journal operations.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// A ledger rule rejected the operation.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl JournalError {
    /// Returns the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Ledger(err) => err.error_code(),
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl From<JournalError> for AppError {
    fn from(err: JournalError) -> Self {
        match err {
            JournalError::Ledger(err) => err.into(),
            JournalError::Database(err) => Self::Database(err.to_string()),
        }
    }
}

/// Accounting settings used by the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerSettings {
    /// Fiscal calendar.
    pub calendar: FiscalCalendar,
    /// Whether automatic postings are recorded.
    pub enable_auto_accounting: bool,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            calendar: FiscalCalendar::default(),
            enable_auto_accounting: true,
        }
    }
}

impl LedgerSettings {
    /// Builds the settings from the accounting configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the first day of the financial year is malformed.
    pub fn from_config(config: &AccountingConfig) -> Result<Self, FiscalError> {
        Ok(Self {
            calendar: FiscalCalendar::from_setting(&config.first_day_of_financial_year)?,
            enable_auto_accounting: config.enable_auto_accounting,
        })
    }
}

/// Candidate lines of an entry, as signed amounts or debit/credit columns.
#[derive(Debug, Clone)]
pub enum EntryLines {
    /// Signed amounts (positive = debit).
    Signed(Vec<EntryLine>),
    /// Separate debit and credit columns.
    DebitCredit(Vec<DebitCreditLine>),
}

impl EntryLines {
    fn accounts(&self) -> Vec<i32> {
        match self {
            Self::Signed(lines) => lines.iter().map(|l| l.account).collect(),
            Self::DebitCredit(lines) => lines.iter().map(|l| l.account).collect(),
        }
    }

    fn validate<A>(&self, lookup: A) -> Result<ValidatedEntry, LedgerError>
    where
        A: Fn(i32) -> Result<AccountInfo, LedgerError>,
    {
        match self {
            Self::Signed(lines) => validate_lines(lines, lookup),
            Self::DebitCredit(lines) => validate_debit_credit_lines(lines, lookup),
        }
    }
}

/// Input for creating a journal entry.
#[derive(Debug, Clone)]
pub struct CreateEntryInput {
    /// Fiscal year.
    pub year: i32,
    /// Transaction date, inside the fiscal year.
    pub date: NaiveDate,
    /// Candidate lines.
    pub lines: EntryLines,
    /// Reference URLs.
    pub urls: Vec<String>,
}

/// Input for an automatic posting from payment reconciliation.
#[derive(Debug, Clone)]
pub struct AutomaticEntryInput {
    /// Items referencing accounts by number and objects by name.
    pub items: Vec<AutomaticItem>,
    /// Leave the entry open instead of closing it.
    pub leave_open: bool,
    /// Reference URLs.
    pub urls: Vec<String>,
}

/// Journal entry with its items and URLs.
#[derive(Debug, Clone)]
pub struct EntryWithItems {
    /// The entry.
    pub entry: journal_entries::Model,
    /// Items of the entry.
    pub items: Vec<journal_items::Model>,
    /// Reference URLs.
    pub urls: Vec<journal_urls::Model>,
}

/// One page of a year's journal.
#[derive(Debug, Clone)]
pub struct EntryListing {
    /// Entries ordered open first, then newest first.
    pub entries: PageResponse<journal_entries::Model>,
    /// The year has at least one open entry.
    pub has_open: bool,
}

/// Journal repository.
#[derive(Debug, Clone)]
pub struct JournalRepository {
    db: DatabaseConnection,
    settings: LedgerSettings,
}

impl JournalRepository {
    /// Creates a new journal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, settings: LedgerSettings) -> Self {
        Self { db, settings }
    }

    /// Returns the fiscal calendar in use.
    #[must_use]
    pub const fn calendar(&self) -> &FiscalCalendar {
        &self.settings.calendar
    }

    // ========================================================================
    // Years
    // ========================================================================

    /// Lists every fiscal year, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_years(&self) -> Result<Vec<years::Model>, JournalError> {
        Ok(years::Entity::find()
            .order_by_desc(years::Column::Year)
            .all(&self.db)
            .await?)
    }

    /// Fetches a fiscal year, creating it open when it is the fiscal year
    /// containing `today`.
    ///
    /// # Errors
    ///
    /// Returns `YearNotFound` for any other missing year.
    pub async fn get_year(&self, year: i32, today: NaiveDate) -> Result<years::Model, JournalError> {
        if let Some(existing) = support::find_year(&self.db, year).await? {
            return Ok(existing);
        }
        if year != self.settings.calendar.fiscal_year_of(today) {
            return Err(LedgerError::YearNotFound(year).into());
        }

        match support::insert_year(&self.db, year, true).await {
            Ok(created) => {
                tracing::info!(year, "Current fiscal year created");
                Ok(created)
            }
            // Lost a race with another request creating the same year.
            Err(err) => support::find_year(&self.db, year)
                .await?
                .ok_or(JournalError::Database(err)),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Lists a year's entries for display: open entries first, then by date
    /// and id descending.
    ///
    /// `search` keeps entries having an item whose description contains the
    /// term, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_entries(
        &self,
        year: i32,
        search: Option<&str>,
        page: &PageRequest,
    ) -> Result<EntryListing, JournalError> {
        let txn = self.db.begin().await?;

        let mut query =
            journal_entries::Entity::find().filter(journal_entries::Column::Year.eq(year));
        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            let pattern = LikeExpr::new(format!("%{}%", escape_like(&term.to_lowercase())))
                .escape(LIKE_ESCAPE);
            let matching = Query::select()
                .column((journal_items::Entity, journal_items::Column::JournalEntryId))
                .from(journal_items::Entity)
                .and_where(
                    Expr::expr(Func::lower(Expr::col((
                        journal_items::Entity,
                        journal_items::Column::Description,
                    ))))
                    .like(pattern),
                )
                .to_owned();
            query = query.filter(journal_entries::Column::Id.in_subquery(matching));
        }

        let total = query.clone().count(&txn).await?;
        let entries = query
            .order_by_asc(journal_entries::Column::Closed)
            .order_by_desc(journal_entries::Column::Date)
            .order_by_desc(journal_entries::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&txn)
            .await?;

        let open_count = journal_entries::Entity::find()
            .filter(journal_entries::Column::Year.eq(year))
            .filter(journal_entries::Column::Closed.eq(false))
            .count(&txn)
            .await?;

        txn.commit().await?;

        Ok(EntryListing {
            entries: PageResponse::new(entries, page.page, page.per_page, total),
            has_open: open_count > 0,
        })
    }

    /// Lists a year's entries in chronological order (date, sequence).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn entries_chronological(
        &self,
        year: i32,
    ) -> Result<Vec<journal_entries::Model>, JournalError> {
        Ok(journal_entries::Entity::find()
            .filter(journal_entries::Column::Year.eq(year))
            .order_by_asc(journal_entries::Column::Date)
            .order_by_asc(journal_entries::Column::Seq)
            .all(&self.db)
            .await?)
    }

    /// Fetches an entry with its items and URLs.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` if the entry does not exist.
    pub async fn get_entry(&self, id: JournalEntryId) -> Result<EntryWithItems, JournalError> {
        let entry = journal_entries::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(LedgerError::EntryNotFound(id))?;
        let items = journal_items::Entity::find()
            .filter(journal_items::Column::JournalEntryId.eq(entry.id))
            .order_by_asc(journal_items::Column::Account)
            .all(&self.db)
            .await?;
        let urls = journal_urls::Entity::find()
            .filter(journal_urls::Column::JournalEntryId.eq(entry.id))
            .all(&self.db)
            .await?;
        Ok(EntryWithItems { entry, items, urls })
    }

    /// Fetches a year's items up to `end_date`, optionally including items
    /// of open entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn year_items(
        &self,
        year: i32,
        end_date: Option<NaiveDate>,
        include_open: bool,
    ) -> Result<Vec<(journal_items::Model, journal_entries::Model)>, JournalError> {
        let filter = ItemFilter {
            year: Some(year),
            end_date,
            ..ItemFilter::default()
        };
        let mut rows = support::load_items(&self.db, &filter).await?;
        rows.retain(|(_, entry)| entry.closed || include_open);
        Ok(rows)
    }

    /// Fetches the incoming balance of an account in a year.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn incoming_balance(
        &self,
        year: i32,
        account: i32,
    ) -> Result<Option<Decimal>, JournalError> {
        Ok(incoming_balances::Entity::find()
            .filter(incoming_balances::Column::Year.eq(year))
            .filter(incoming_balances::Column::Account.eq(account))
            .one(&self.db)
            .await?
            .map(|b| b.amount))
    }

    /// Returns the sequence number the next entry of a year would get.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn next_sequence(&self, year: i32) -> Result<i32, JournalError> {
        let max = support::max_sequence(&self.db, year).await?;
        Ok(LedgerService::next_sequence(max))
    }

    /// Returns the date offered for a new entry in a year.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn default_entry_date(&self, year: i32) -> Result<NaiveDate, JournalError> {
        let latest: Option<Option<NaiveDate>> = journal_entries::Entity::find()
            .select_only()
            .column_as(Expr::col(journal_entries::Column::Date).max(), "latest")
            .filter(journal_entries::Column::Year.eq(year))
            .into_tuple()
            .one(&self.db)
            .await?;
        Ok(LedgerService::default_entry_date(
            &self.settings.calendar,
            year,
            latest.flatten(),
        ))
    }

    /// Returns the latest balance of an account: its most recent incoming
    /// balance plus every item posted in that year or later, open entries
    /// included.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account does not exist.
    pub async fn latest_account_balance(&self, account: i32) -> Result<Decimal, JournalError> {
        let txn = self.db.begin().await?;

        accounts::Entity::find_by_id(account)
            .one(&txn)
            .await?
            .ok_or(LedgerError::AccountNotFound(account))?;

        let incoming = incoming_balances::Entity::find()
            .filter(incoming_balances::Column::Account.eq(account))
            .order_by_desc(incoming_balances::Column::Year)
            .one(&txn)
            .await?
            .map(|b| IncomingPoint {
                year: b.year,
                amount: b.amount,
            });

        let filter = ItemFilter {
            account: Some(account),
            from_year: incoming.map(|p| p.year),
            ..ItemFilter::default()
        };
        let items = support::load_items(&txn, &filter).await?;
        txn.commit().await?;

        Ok(latest_account_balance(
            incoming,
            items.iter().map(|(item, entry)| (entry.year, item.amount)),
        ))
    }

    /// Lists the cost objects used by items of a year, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn objects_in_year(&self, year: i32) -> Result<Vec<objects::Model>, JournalError> {
        let txn = self.db.begin().await?;
        let filter = ItemFilter {
            year: Some(year),
            ..ItemFilter::default()
        };
        let used: HashSet<Uuid> = support::load_items(&txn, &filter)
            .await?
            .into_iter()
            .filter_map(|(item, _)| item.object_id)
            .collect();
        let objects = objects::Entity::find()
            .filter(objects::Column::Id.is_in(used))
            .order_by_asc(objects::Column::Name)
            .all(&txn)
            .await?;
        txn.commit().await?;
        Ok(objects)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Validates and creates an open journal entry with its items.
    ///
    /// # Errors
    ///
    /// Returns `YearNotFound`, `YearClosed`, `DateOutsideYear`, a validator
    /// error, or `ObjectNotFound` for an unknown cost object.
    pub async fn create_entry(
        &self,
        input: CreateEntryInput,
    ) -> Result<EntryWithItems, JournalError> {
        let txn = self.db.begin().await?;

        let year = support::lock_year(&txn, input.year)
            .await?
            .ok_or(LedgerError::YearNotFound(input.year))?;
        LedgerService::validate_year_open(year.year, year.is_open)?;
        LedgerService::validate_entry_date(&self.settings.calendar, year.year, input.date)?;

        let validated = validate_in(&txn, &input.lines).await?;

        let seq = LedgerService::next_sequence(support::max_sequence(&txn, year.year).await?);
        let entry = journal_entries::ActiveModel {
            id: Set(JournalEntryId::new().into_inner()),
            year: Set(year.year),
            seq: Set(seq),
            date: Set(input.date),
            closed: Set(false),
        }
        .insert(&txn)
        .await?;

        let items = insert_items(&txn, entry.id, &validated.lines).await?;
        let urls = insert_urls(&txn, entry.id, &input.urls).await?;

        txn.commit().await?;

        tracing::info!(
            entry_id = %entry.id,
            year = entry.year,
            seq = entry.seq,
            total = %validated.totals.debit,
            "Journal entry created"
        );

        Ok(EntryWithItems { entry, items, urls })
    }

    /// Replaces the date and items of an open entry.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound`, `EntryClosed`, `YearClosed`,
    /// `DateOutsideYear` or a validator error.
    pub async fn save_entry(
        &self,
        id: JournalEntryId,
        date: NaiveDate,
        lines: EntryLines,
    ) -> Result<EntryWithItems, JournalError> {
        let txn = self.db.begin().await?;

        let entry = modifiable_entry(&txn, id).await?;
        LedgerService::validate_entry_date(&self.settings.calendar, entry.year, date)?;
        let validated = validate_in(&txn, &lines).await?;

        journal_items::Entity::delete_many()
            .filter(journal_items::Column::JournalEntryId.eq(entry.id))
            .exec(&txn)
            .await?;
        let items = insert_items(&txn, entry.id, &validated.lines).await?;

        let mut active: journal_entries::ActiveModel = entry.into();
        active.date = Set(date);
        let entry = active.update(&txn).await?;

        let urls = journal_urls::Entity::find()
            .filter(journal_urls::Column::JournalEntryId.eq(entry.id))
            .all(&txn)
            .await?;

        txn.commit().await?;

        tracing::info!(entry_id = %entry.id, items = items.len(), "Journal entry saved");

        Ok(EntryWithItems { entry, items, urls })
    }

    /// Marks an open entry closed. Closed entries count in official balances
    /// and can no longer be changed.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound`, `EntryClosed` or `YearClosed`.
    pub async fn close_entry(
        &self,
        id: JournalEntryId,
    ) -> Result<journal_entries::Model, JournalError> {
        let txn = self.db.begin().await?;

        let entry = modifiable_entry(&txn, id).await?;
        let mut active: journal_entries::ActiveModel = entry.into();
        active.closed = Set(true);
        let entry = active.update(&txn).await?;

        txn.commit().await?;

        tracing::info!(entry_id = %entry.id, year = entry.year, seq = entry.seq, "Journal entry closed");

        Ok(entry)
    }

    /// Deletes an open entry with its items and URLs.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound`, `EntryClosed` or `YearClosed`.
    pub async fn delete_entry(&self, id: JournalEntryId) -> Result<(), JournalError> {
        let txn = self.db.begin().await?;

        let entry = modifiable_entry(&txn, id).await?;
        journal_urls::Entity::delete_many()
            .filter(journal_urls::Column::JournalEntryId.eq(entry.id))
            .exec(&txn)
            .await?;
        journal_items::Entity::delete_many()
            .filter(journal_items::Column::JournalEntryId.eq(entry.id))
            .exec(&txn)
            .await?;
        journal_entries::Entity::delete_by_id(entry.id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        tracing::info!(entry_id = %entry.id, year = entry.year, seq = entry.seq, "Journal entry deleted");

        Ok(())
    }

    /// Records an automatic posting dated `today`.
    ///
    /// Returns `None` without touching the database when automatic
    /// accounting is disabled. A missing fiscal year is created open; the
    /// entry is closed unless `leave_open` is set.
    ///
    /// # Errors
    ///
    /// Returns `EmptyEntry`, `ZeroAmountLine`, `ExcessivePrecision`,
    /// `UnbalancedEntry`, `YearClosed`, `AccountNotFound`, `ObjectNotFound`,
    /// `MissingObject` or `ObjectNotAllowed`.
    pub async fn post_automatic_entry(
        &self,
        input: AutomaticEntryInput,
        today: NaiveDate,
    ) -> Result<Option<EntryWithItems>, JournalError> {
        if !self.settings.enable_auto_accounting {
            return Ok(None);
        }
        LedgerService::validate_automatic_items(&input.items)?;

        let txn = self.db.begin().await?;

        let fiscal_year = self.settings.calendar.fiscal_year_of(today);
        let year = match support::lock_year(&txn, fiscal_year).await? {
            Some(year) => year,
            None => {
                tracing::warn!(
                    year = fiscal_year,
                    "Automatic entry arrived for a non-existing year, year created"
                );
                support::insert_year(&txn, fiscal_year, true).await?
            }
        };
        LedgerService::validate_year_open(year.year, year.is_open)?;

        let nums: Vec<i32> = input.items.iter().map(|i| i.account).collect();
        let accounts = load_account_info(&txn, nums).await?;
        let names: Vec<String> = input.items.iter().filter_map(|i| i.object.clone()).collect();
        let objects_by_name: HashMap<String, Uuid> = objects::Entity::find()
            .filter(objects::Column::Name.is_in(names))
            .all(&txn)
            .await?
            .into_iter()
            .map(|o| (o.name, o.id))
            .collect();

        let mut lines = Vec::with_capacity(input.items.len());
        for item in &input.items {
            if !accounts.contains_key(&item.account) {
                return Err(LedgerError::AccountNotFound(item.account).into());
            }
            let mut line = EntryLine::new(item.account, item.amount, item.description.as_str());
            if let Some(name) = &item.object {
                let id = objects_by_name
                    .get(name)
                    .ok_or_else(|| LedgerError::ObjectNotFound(name.clone()))?;
                line = line.with_object(ObjectId::from_uuid(*id));
            }
            lines.push(line);
        }
        let validated = validate_lines(&lines, |num| {
            accounts
                .get(&num)
                .cloned()
                .ok_or(LedgerError::AccountNotFound(num))
        })?;

        let seq = LedgerService::next_sequence(support::max_sequence(&txn, year.year).await?);
        let entry = journal_entries::ActiveModel {
            id: Set(JournalEntryId::new().into_inner()),
            year: Set(year.year),
            seq: Set(seq),
            date: Set(today),
            closed: Set(!input.leave_open),
        }
        .insert(&txn)
        .await?;

        let items = insert_items(&txn, entry.id, &validated.lines).await?;
        let urls = insert_urls(&txn, entry.id, &input.urls).await?;

        txn.commit().await?;

        tracing::info!(
            entry_id = %entry.id,
            year = entry.year,
            seq = entry.seq,
            closed = entry.closed,
            "Automatic journal entry posted"
        );

        Ok(Some(EntryWithItems { entry, items, urls }))
    }
}

/// Escape character for `LIKE` patterns built from search terms.
const LIKE_ESCAPE: char = '!';

/// Escapes `LIKE` wildcards so a search term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Loads an entry that may still be changed: it exists, is open, and its
/// year is open.
async fn modifiable_entry(
    txn: &DatabaseTransaction,
    id: JournalEntryId,
) -> Result<journal_entries::Model, JournalError> {
    let entry = journal_entries::Entity::find_by_id(id.into_inner())
        .one(txn)
        .await?
        .ok_or(LedgerError::EntryNotFound(id))?;
    LedgerService::validate_can_modify(id, entry.closed)?;

    let year = support::lock_year(txn, entry.year)
        .await?
        .ok_or(LedgerError::YearNotFound(entry.year))?;
    LedgerService::validate_year_open(year.year, year.is_open)?;

    Ok(entry)
}

/// Loads the validator's view of the given accounts, keyed by number.
async fn load_account_info(
    txn: &DatabaseTransaction,
    nums: Vec<i32>,
) -> Result<HashMap<i32, AccountInfo>, DbErr> {
    accounts::Entity::find()
        .filter(accounts::Column::Num.is_in(nums))
        .all(txn)
        .await?
        .into_iter()
        .map(|a| account_info(a).map(|info| (info.num, info)))
        .collect()
}

/// Converts an account row, rejecting object requirement codes it does not
/// know instead of treating them as optional.
fn account_info(account: accounts::Model) -> Result<AccountInfo, DbErr> {
    let object_requirement =
        ObjectRequirement::from_code(account.object_requirement).ok_or_else(|| {
            DbErr::Type(format!(
                "account {} has unknown object requirement code {}",
                account.num, account.object_requirement
            ))
        })?;
    Ok(AccountInfo {
        num: account.num,
        name: account.name,
        object_requirement,
    })
}

/// Runs the entry validator with accounts and objects read in `txn`.
async fn validate_in(
    txn: &DatabaseTransaction,
    lines: &EntryLines,
) -> Result<ValidatedEntry, JournalError> {
    let accounts = load_account_info(txn, lines.accounts()).await?;

    let validated = lines.validate(|num| {
        accounts
            .get(&num)
            .cloned()
            .ok_or(LedgerError::AccountNotFound(num))
    })?;

    let wanted: Vec<Uuid> = validated
        .lines
        .iter()
        .filter_map(|l| l.object.map(ObjectId::into_inner))
        .collect();
    if !wanted.is_empty() {
        let found: HashSet<Uuid> = objects::Entity::find()
            .filter(objects::Column::Id.is_in(wanted.clone()))
            .all(txn)
            .await?
            .into_iter()
            .map(|o| o.id)
            .collect();
        if let Some(missing) = wanted.iter().find(|id| !found.contains(id)) {
            return Err(LedgerError::ObjectNotFound(missing.to_string()).into());
        }
    }

    Ok(validated)
}

async fn insert_items(
    txn: &DatabaseTransaction,
    entry_id: Uuid,
    lines: &[PostedLine],
) -> Result<Vec<journal_items::Model>, DbErr> {
    let mut items = Vec::with_capacity(lines.len());
    for line in lines {
        let item = journal_items::ActiveModel {
            id: Set(Uuid::now_v7()),
            journal_entry_id: Set(entry_id),
            account: Set(line.account),
            amount: Set(line.amount),
            object_id: Set(line.object.map(ObjectId::into_inner)),
            description: Set(line.description.clone()),
        }
        .insert(txn)
        .await?;
        items.push(item);
    }
    Ok(items)
}

async fn insert_urls(
    txn: &DatabaseTransaction,
    entry_id: Uuid,
    urls: &[String],
) -> Result<Vec<journal_urls::Model>, DbErr> {
    let mut inserted = Vec::with_capacity(urls.len());
    for url in urls {
        let row = journal_urls::ActiveModel {
            id: Set(Uuid::now_v7()),
            journal_entry_id: Set(entry_id),
            url: Set(url.clone()),
        }
        .insert(txn)
        .await?;
        inserted.push(row);
    }
    Ok(inserted)
}
