//! `SeaORM` Entity for journal_entries table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub year: i32,
    pub seq: i32,
    pub date: Date,
    pub closed: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::years::Entity",
        from = "Column::Year",
        to = "super::years::Column::Year"
    )]
    Years,
    #[sea_orm(has_many = "super::journal_items::Entity")]
    JournalItems,
    #[sea_orm(has_many = "super::journal_urls::Entity")]
    JournalUrls,
}

impl Related<super::years::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Years.def()
    }
}

impl Related<super::journal_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalItems.def()
    }
}

impl Related<super::journal_urls::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalUrls.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
