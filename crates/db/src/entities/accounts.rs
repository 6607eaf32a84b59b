//! `SeaORM` Entity for accounts table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub num: i32,
    pub name: String,
    pub account_group_id: Uuid,
    pub available_for_invoicing: bool,
    /// 0 = optional, 1 = required, 2 = forbidden.
    pub object_requirement: i16,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account_groups::Entity",
        from = "Column::AccountGroupId",
        to = "super::account_groups::Column::Id"
    )]
    AccountGroups,
    #[sea_orm(has_many = "super::journal_items::Entity")]
    JournalItems,
    #[sea_orm(has_many = "super::incoming_balances::Entity")]
    IncomingBalances,
}

impl Related<super::account_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountGroups.def()
    }
}

impl Related<super::journal_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalItems.def()
    }
}

impl Related<super::incoming_balances::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IncomingBalances.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
