//! Queries shared by the repositories.
//!
//! Every helper takes a generic connection so it can run on the pool or
//! inside an open transaction.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use tallybook_core::reports::AccountMeta;
use uuid::Uuid;

use crate::entities::{
    account_classes, account_groups, accounts, incoming_balances, journal_entries, journal_items,
    years,
};

/// Filter for loading journal items together with their entry.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ItemFilter {
    pub year: Option<i32>,
    pub from_year: Option<i32>,
    pub end_date: Option<NaiveDate>,
    pub account: Option<i32>,
    pub object: Option<Uuid>,
}

/// Loads items matching `filter` with their entry, ordered by entry date and
/// sequence.
pub(crate) async fn load_items<C: ConnectionTrait>(
    conn: &C,
    filter: &ItemFilter,
) -> Result<Vec<(journal_items::Model, journal_entries::Model)>, DbErr> {
    let mut query = journal_items::Entity::find().find_also_related(journal_entries::Entity);
    if let Some(year) = filter.year {
        query = query.filter(journal_entries::Column::Year.eq(year));
    }
    if let Some(year) = filter.from_year {
        query = query.filter(journal_entries::Column::Year.gte(year));
    }
    if let Some(end) = filter.end_date {
        query = query.filter(journal_entries::Column::Date.lte(end));
    }
    if let Some(account) = filter.account {
        query = query.filter(journal_items::Column::Account.eq(account));
    }
    if let Some(object) = filter.object {
        query = query.filter(journal_items::Column::ObjectId.eq(object));
    }

    let rows = query
        .order_by_asc(journal_entries::Column::Date)
        .order_by_asc(journal_entries::Column::Seq)
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(item, entry)| entry.map(|e| (item, e)))
        .collect())
}

/// Loads every account with its group and class, ordered by account number.
pub(crate) async fn load_chart<C: ConnectionTrait>(conn: &C) -> Result<Vec<AccountMeta>, DbErr> {
    let classes: HashMap<Uuid, account_classes::Model> = account_classes::Entity::find()
        .all(conn)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();
    let groups: HashMap<Uuid, account_groups::Model> = account_groups::Entity::find()
        .all(conn)
        .await?
        .into_iter()
        .map(|g| (g.id, g))
        .collect();
    let accounts = accounts::Entity::find()
        .order_by_asc(accounts::Column::Num)
        .all(conn)
        .await?;

    Ok(accounts
        .into_iter()
        .filter_map(|account| {
            let group = groups.get(&account.account_group_id)?;
            let class = classes.get(&group.account_class_id)?;
            Some(AccountMeta {
                num: account.num,
                name: account.name,
                group_name: group.name.clone(),
                group_foldable: group.foldable,
                class_name: class.name.clone(),
                in_balance: class.in_balance,
                balance_negative: class.balance_negative,
            })
        })
        .collect())
}

/// Loads the incoming balances of a year keyed by account number.
pub(crate) async fn load_incoming<C: ConnectionTrait>(
    conn: &C,
    year: i32,
    account: Option<i32>,
) -> Result<BTreeMap<i32, Decimal>, DbErr> {
    let mut query =
        incoming_balances::Entity::find().filter(incoming_balances::Column::Year.eq(year));
    if let Some(account) = account {
        query = query.filter(incoming_balances::Column::Account.eq(account));
    }
    Ok(query
        .all(conn)
        .await?
        .into_iter()
        .map(|b| (b.account, b.amount))
        .collect())
}

/// Finds a fiscal year row.
pub(crate) async fn find_year<C: ConnectionTrait>(
    conn: &C,
    year: i32,
) -> Result<Option<years::Model>, DbErr> {
    years::Entity::find_by_id(year).one(conn).await
}

/// Finds a fiscal year row and locks it for the rest of the transaction.
///
/// SQLite has no row locks; its single writer serializes instead.
pub(crate) async fn lock_year<C: ConnectionTrait>(
    conn: &C,
    year: i32,
) -> Result<Option<years::Model>, DbErr> {
    years::Entity::find_by_id(year)
        .lock_exclusive()
        .one(conn)
        .await
}

/// Inserts a fiscal year row.
pub(crate) async fn insert_year<C: ConnectionTrait>(
    conn: &C,
    year: i32,
    is_open: bool,
) -> Result<years::Model, DbErr> {
    years::ActiveModel {
        year: Set(year),
        is_open: Set(is_open),
    }
    .insert(conn)
    .await
}

/// Returns the highest sequence number used in a year.
pub(crate) async fn max_sequence<C: ConnectionTrait>(
    conn: &C,
    year: i32,
) -> Result<Option<i32>, DbErr> {
    let max: Option<Option<i32>> = journal_entries::Entity::find()
        .select_only()
        .column_as(Expr::col(journal_entries::Column::Seq).max(), "max_seq")
        .filter(journal_entries::Column::Year.eq(year))
        .into_tuple()
        .one(conn)
        .await?;
    Ok(max.flatten())
}
