//! Shared fixtures for the database integration tests.
//!
//! Every test gets its own in-memory SQLite database with the migrations
//! applied and a small chart of accounts.

#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tallybook_core::ledger::{EntryLine, ObjectRequirement};
use tallybook_db::entities::{journal_entries, objects};
use tallybook_db::migration::Migrator;
use tallybook_db::repositories::{
    ChartRepository, CreateAccountInput, CreateClassInput, CreateEntryInput, CreateGroupInput,
    EntryLines, FiscalRepository, JournalRepository, LedgerSettings, ReportRepository,
};
use tallybook_shared::types::{AccountClassId, AccountGroupId, JournalEntryId};

pub const CASH: i32 = 1000;
pub const RECEIVABLES: i32 = 1100;
pub const PAYABLES: i32 = 2000;
pub const RETAINED_EARNINGS: i32 = 3000;
pub const SALES: i32 = 4000;
pub const SPONSORSHIP: i32 = 4100;
pub const COSTS: i32 = 5000;
pub const BANK_FEES: i32 = 5100;

/// Repositories over one fresh database.
pub struct TestLedger {
    pub db: DatabaseConnection,
    pub settings: LedgerSettings,
    pub chart: ChartRepository,
    pub journal: JournalRepository,
    pub fiscal: FiscalRepository,
    pub reports: ReportRepository,
}

impl TestLedger {
    /// Creates an empty, migrated database.
    pub async fn empty() -> Self {
        Self::with_settings(LedgerSettings::default()).await
    }

    /// Creates an empty, migrated database with custom settings.
    pub async fn with_settings(settings: LedgerSettings) -> Self {
        // One connection, or every pool connection would see its own database.
        let mut options = ConnectOptions::new("sqlite::memory:");
        options
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);
        let db = Database::connect(options)
            .await
            .expect("Failed to open in-memory database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        Self {
            chart: ChartRepository::new(db.clone()),
            journal: JournalRepository::new(db.clone(), settings),
            fiscal: FiscalRepository::new(db.clone(), settings.calendar),
            reports: ReportRepository::new(db.clone(), settings.calendar),
            settings,
            db,
        }
    }

    /// Creates a migrated database with the demo chart and an open 2025.
    pub async fn new() -> Self {
        let ledger = Self::empty().await;
        ledger.seed_chart().await;
        ledger
            .fiscal
            .create_year(2025, true)
            .await
            .expect("Failed to create year");
        ledger
    }

    /// Creates the demo chart of accounts.
    pub async fn seed_chart(&self) {
        let assets = self.class("Assets", true, false).await;
        let liabilities = self.class("Liabilities", true, true).await;
        let equity = self.class("Equity", true, true).await;
        let income = self.class("Income", false, true).await;
        let expenses = self.class("Expenses", false, false).await;

        let cash = self.group("Cash", assets, true).await;
        let receivables = self.group("Receivables", assets, false).await;
        let payables = self.group("Payables", liabilities, true).await;
        let capital = self.group("Capital", equity, true).await;
        let revenue = self.group("Revenue", income, false).await;
        let costs = self.group("Costs", expenses, false).await;

        self.account(CASH, "Cash", cash, ObjectRequirement::Optional)
            .await;
        self.account(RECEIVABLES, "Receivables", receivables, ObjectRequirement::Optional)
            .await;
        self.account(PAYABLES, "Payables", payables, ObjectRequirement::Optional)
            .await;
        self.account(RETAINED_EARNINGS, "Retained earnings", capital, ObjectRequirement::Optional)
            .await;
        self.account(SALES, "Sales", revenue, ObjectRequirement::Optional)
            .await;
        self.account(SPONSORSHIP, "Sponsorship", revenue, ObjectRequirement::Required)
            .await;
        self.account(COSTS, "Costs", costs, ObjectRequirement::Optional)
            .await;
        self.account(BANK_FEES, "Bank fees", costs, ObjectRequirement::Forbidden)
            .await;
    }

    async fn class(&self, name: &str, in_balance: bool, balance_negative: bool) -> AccountClassId {
        let class = self
            .chart
            .create_class(CreateClassInput {
                name: name.to_string(),
                in_balance,
                balance_negative,
            })
            .await
            .expect("Failed to create class");
        AccountClassId::from_uuid(class.id)
    }

    async fn group(&self, name: &str, class_id: AccountClassId, foldable: bool) -> AccountGroupId {
        let group = self
            .chart
            .create_group(CreateGroupInput {
                name: name.to_string(),
                class_id,
                foldable,
            })
            .await
            .expect("Failed to create group");
        AccountGroupId::from_uuid(group.id)
    }

    async fn account(
        &self,
        num: i32,
        name: &str,
        group_id: AccountGroupId,
        object_requirement: ObjectRequirement,
    ) {
        self.chart
            .create_account(CreateAccountInput {
                num,
                name: name.to_string(),
                group_id,
                available_for_invoicing: false,
                object_requirement,
            })
            .await
            .expect("Failed to create account");
    }

    /// Creates a cost object.
    pub async fn object(&self, name: &str) -> objects::Model {
        self.chart
            .create_object(name)
            .await
            .expect("Failed to create object")
    }

    /// Creates an open entry from signed lines.
    pub async fn open_entry(
        &self,
        year: i32,
        date: NaiveDate,
        lines: Vec<EntryLine>,
    ) -> journal_entries::Model {
        self.journal
            .create_entry(CreateEntryInput {
                year,
                date,
                lines: EntryLines::Signed(lines),
                urls: Vec::new(),
            })
            .await
            .expect("Failed to create entry")
            .entry
    }

    /// Creates and closes an entry moving `amount` from `credit` to `debit`.
    pub async fn post(
        &self,
        year: i32,
        date: NaiveDate,
        debit: i32,
        credit: i32,
        amount: Decimal,
    ) -> journal_entries::Model {
        let entry = self
            .open_entry(
                year,
                date,
                vec![
                    EntryLine::new(debit, amount, "Debit"),
                    EntryLine::new(credit, -amount, "Credit"),
                ],
            )
            .await;
        self.journal
            .close_entry(JournalEntryId::from_uuid(entry.id))
            .await
            .expect("Failed to close entry")
    }
}

/// Shorthand for a calendar date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}
