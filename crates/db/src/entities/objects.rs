//! `SeaORM` Entity for objects table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "objects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::journal_items::Entity")]
    JournalItems,
}

impl Related<super::journal_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
