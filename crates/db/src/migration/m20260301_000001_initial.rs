//! Initial database migration.
//!
//! Creates the chart of accounts, fiscal years, the journal and incoming
//! balances. Referenced chart rows are protected with `RESTRICT`; items and
//! URLs follow their entry.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DbBackend;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        // SQLite would store whole amounts as INTEGER under NUMERIC affinity.
        let amount_type = match manager.get_database_backend() {
            DbBackend::Sqlite => "REAL",
            _ => "NUMERIC(10, 2)",
        };

        // ============================================================
        // PART 1: CHART OF ACCOUNTS
        // ============================================================
        db.execute_unprepared(ACCOUNT_CLASSES_SQL).await?;
        db.execute_unprepared(ACCOUNT_GROUPS_SQL).await?;
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(OBJECTS_SQL).await?;

        // ============================================================
        // PART 2: FISCAL YEARS
        // ============================================================
        db.execute_unprepared(YEARS_SQL).await?;

        // ============================================================
        // PART 3: JOURNAL
        // ============================================================
        db.execute_unprepared(JOURNAL_ENTRIES_SQL).await?;
        db.execute_unprepared(&JOURNAL_ITEMS_SQL.replace(AMOUNT_TYPE, amount_type))
            .await?;
        db.execute_unprepared(JOURNAL_URLS_SQL).await?;

        // ============================================================
        // PART 4: INCOMING BALANCES
        // ============================================================
        db.execute_unprepared(&INCOMING_BALANCES_SQL.replace(AMOUNT_TYPE, amount_type))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

/// Placeholder for the backend-specific amount column type.
const AMOUNT_TYPE: &str = "{amount_type}";

const ACCOUNT_CLASSES_SQL: &str = r"
CREATE TABLE account_classes (
    id UUID PRIMARY KEY,
    name VARCHAR(100) NOT NULL UNIQUE,
    in_balance BOOLEAN NOT NULL DEFAULT FALSE,
    balance_negative BOOLEAN NOT NULL DEFAULT FALSE
);
";

const ACCOUNT_GROUPS_SQL: &str = r"
CREATE TABLE account_groups (
    id UUID PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    account_class_id UUID NOT NULL REFERENCES account_classes(id) ON DELETE RESTRICT,
    foldable BOOLEAN NOT NULL DEFAULT FALSE
);

CREATE INDEX idx_account_groups_class ON account_groups(account_class_id);
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    num INTEGER PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    account_group_id UUID NOT NULL REFERENCES account_groups(id) ON DELETE RESTRICT,
    available_for_invoicing BOOLEAN NOT NULL DEFAULT FALSE,
    object_requirement SMALLINT NOT NULL DEFAULT 0
        CONSTRAINT chk_accounts_object_requirement CHECK (object_requirement IN (0, 1, 2))
);

CREATE INDEX idx_accounts_group ON accounts(account_group_id);
";

const OBJECTS_SQL: &str = r"
CREATE TABLE objects (
    id UUID PRIMARY KEY,
    name VARCHAR(30) NOT NULL UNIQUE,
    active BOOLEAN NOT NULL DEFAULT TRUE
);
";

const YEARS_SQL: &str = r"
CREATE TABLE years (
    year INTEGER PRIMARY KEY,
    is_open BOOLEAN NOT NULL DEFAULT TRUE
);
";

const JOURNAL_ENTRIES_SQL: &str = r"
CREATE TABLE journal_entries (
    id UUID PRIMARY KEY,
    year INTEGER NOT NULL REFERENCES years(year) ON DELETE RESTRICT,
    seq INTEGER NOT NULL CONSTRAINT chk_journal_entries_seq CHECK (seq > 0),
    date DATE NOT NULL,
    closed BOOLEAN NOT NULL DEFAULT FALSE,
    CONSTRAINT uq_journal_entries_year_seq UNIQUE (year, seq)
);

CREATE INDEX idx_journal_entries_year_date ON journal_entries(year, date);
";

const JOURNAL_ITEMS_SQL: &str = r"
CREATE TABLE journal_items (
    id UUID PRIMARY KEY,
    journal_entry_id UUID NOT NULL REFERENCES journal_entries(id) ON DELETE CASCADE,
    account INTEGER NOT NULL REFERENCES accounts(num) ON DELETE RESTRICT,
    amount {amount_type} NOT NULL CONSTRAINT chk_journal_items_nonzero CHECK (amount <> 0),
    object_id UUID REFERENCES objects(id) ON DELETE RESTRICT,
    description VARCHAR(200) NOT NULL
);

CREATE INDEX idx_journal_items_entry ON journal_items(journal_entry_id);
CREATE INDEX idx_journal_items_account ON journal_items(account);
CREATE INDEX idx_journal_items_object ON journal_items(object_id);
";

const JOURNAL_URLS_SQL: &str = r"
CREATE TABLE journal_urls (
    id UUID PRIMARY KEY,
    journal_entry_id UUID NOT NULL REFERENCES journal_entries(id) ON DELETE CASCADE,
    url VARCHAR(2000) NOT NULL
);

CREATE INDEX idx_journal_urls_entry ON journal_urls(journal_entry_id);
";

const INCOMING_BALANCES_SQL: &str = r"
CREATE TABLE incoming_balances (
    id UUID PRIMARY KEY,
    year INTEGER NOT NULL REFERENCES years(year) ON DELETE RESTRICT,
    account INTEGER NOT NULL REFERENCES accounts(num) ON DELETE RESTRICT,
    amount {amount_type} NOT NULL CONSTRAINT chk_incoming_balances_nonzero CHECK (amount <> 0),
    CONSTRAINT uq_incoming_balances_year_account UNIQUE (year, account)
);
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS incoming_balances;
DROP TABLE IF EXISTS journal_urls;
DROP TABLE IF EXISTS journal_items;
DROP TABLE IF EXISTS journal_entries;
DROP TABLE IF EXISTS years;
DROP TABLE IF EXISTS objects;
DROP TABLE IF EXISTS accounts;
DROP TABLE IF EXISTS account_groups;
DROP TABLE IF EXISTS account_classes;
";
