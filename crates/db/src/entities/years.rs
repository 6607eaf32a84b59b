//! `SeaORM` Entity for years table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "years")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub year: i32,
    pub is_open: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::journal_entries::Entity")]
    JournalEntries,
    #[sea_orm(has_many = "super::incoming_balances::Entity")]
    IncomingBalances,
}

impl Related<super::journal_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalEntries.def()
    }
}

impl Related<super::incoming_balances::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IncomingBalances.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
