//! `SeaORM` Entity for account_groups table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "account_groups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub account_class_id: Uuid,
    pub foldable: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account_classes::Entity",
        from = "Column::AccountClassId",
        to = "super::account_classes::Column::Id"
    )]
    AccountClasses,
    #[sea_orm(has_many = "super::accounts::Entity")]
    Accounts,
}

impl Related<super::account_classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountClasses.def()
    }
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
