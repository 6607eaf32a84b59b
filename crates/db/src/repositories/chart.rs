//! Chart of accounts repository: classes, groups, accounts and cost objects.
//!
//! Rows referenced from elsewhere are never deleted; deletion is refused
//! with `InUse` instead.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use tallybook_core::ledger::ObjectRequirement;
use tallybook_core::reports::AccountMeta;
use tallybook_shared::AppError;
use tallybook_shared::types::{AccountClassId, AccountGroupId, ObjectId};

use super::support;
use crate::entities::{
    account_classes, account_groups, accounts, incoming_balances, journal_items, objects,
};

/// Error types for chart of accounts operations.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    /// A class, account or object with this name or number already exists.
    #[error("'{0}' already exists")]
    Duplicate(String),

    /// The referenced row does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// The row is referenced and cannot be deleted.
    #[error("{0} is in use and cannot be deleted")]
    InUse(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl ChartError {
    /// Returns the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Duplicate(_) => "DUPLICATE",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InUse(_) => "IN_USE",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl From<ChartError> for AppError {
    fn from(err: ChartError) -> Self {
        match err {
            ChartError::Duplicate(_) | ChartError::InUse(_) => Self::Conflict(err.to_string()),
            ChartError::NotFound(_) => Self::NotFound(err.to_string()),
            ChartError::Database(err) => Self::Database(err.to_string()),
        }
    }
}

/// Input for creating an account class.
#[derive(Debug, Clone)]
pub struct CreateClassInput {
    /// Unique class name.
    pub name: String,
    /// Class belongs on the balance sheet.
    pub in_balance: bool,
    /// Amounts of this class are displayed negated.
    pub balance_negative: bool,
}

/// Input for creating an account group.
#[derive(Debug, Clone)]
pub struct CreateGroupInput {
    /// Group name.
    pub name: String,
    /// Owning class.
    pub class_id: AccountClassId,
    /// Collapse the group label when it holds a single account.
    pub foldable: bool,
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Account number.
    pub num: i32,
    /// Account name.
    pub name: String,
    /// Owning group.
    pub group_id: AccountGroupId,
    /// Account may be used on invoices.
    pub available_for_invoicing: bool,
    /// Cost object rule for items on this account.
    pub object_requirement: ObjectRequirement,
}

/// Chart of accounts repository.
#[derive(Debug, Clone)]
pub struct ChartRepository {
    db: DatabaseConnection,
}

impl ChartRepository {
    /// Creates a new chart repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ========================================================================
    // Classes and groups
    // ========================================================================

    /// Creates an account class.
    ///
    /// # Errors
    ///
    /// Returns `Duplicate` if the name is taken.
    pub async fn create_class(
        &self,
        input: CreateClassInput,
    ) -> Result<account_classes::Model, ChartError> {
        let taken = account_classes::Entity::find()
            .filter(account_classes::Column::Name.eq(input.name.as_str()))
            .count(&self.db)
            .await?;
        if taken > 0 {
            return Err(ChartError::Duplicate(input.name));
        }

        let class = account_classes::ActiveModel {
            id: Set(AccountClassId::new().into_inner()),
            name: Set(input.name),
            in_balance: Set(input.in_balance),
            balance_negative: Set(input.balance_negative),
        }
        .insert(&self.db)
        .await?;
        Ok(class)
    }

    /// Creates an account group in an existing class.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the class does not exist.
    pub async fn create_group(
        &self,
        input: CreateGroupInput,
    ) -> Result<account_groups::Model, ChartError> {
        account_classes::Entity::find_by_id(input.class_id.into_inner())
            .one(&self.db)
            .await?
            .ok_or_else(|| ChartError::NotFound(format!("Account class {}", input.class_id)))?;

        let group = account_groups::ActiveModel {
            id: Set(AccountGroupId::new().into_inner()),
            name: Set(input.name),
            account_class_id: Set(input.class_id.into_inner()),
            foldable: Set(input.foldable),
        }
        .insert(&self.db)
        .await?;
        Ok(group)
    }

    /// Lists account classes ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_classes(&self) -> Result<Vec<account_classes::Model>, ChartError> {
        Ok(account_classes::Entity::find()
            .order_by_asc(account_classes::Column::Name)
            .all(&self.db)
            .await?)
    }

    /// Lists account groups ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_groups(&self) -> Result<Vec<account_groups::Model>, ChartError> {
        Ok(account_groups::Entity::find()
            .order_by_asc(account_groups::Column::Name)
            .all(&self.db)
            .await?)
    }

    /// Deletes a class that has no groups.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `InUse`.
    pub async fn delete_class(&self, id: AccountClassId) -> Result<(), ChartError> {
        let class = account_classes::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or_else(|| ChartError::NotFound(format!("Account class {id}")))?;
        let groups = account_groups::Entity::find()
            .filter(account_groups::Column::AccountClassId.eq(class.id))
            .count(&self.db)
            .await?;
        if groups > 0 {
            return Err(ChartError::InUse(format!("Account class {}", class.name)));
        }
        account_classes::Entity::delete_by_id(class.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// Deletes a group that has no accounts.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `InUse`.
    pub async fn delete_group(&self, id: AccountGroupId) -> Result<(), ChartError> {
        let group = account_groups::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or_else(|| ChartError::NotFound(format!("Account group {id}")))?;
        let accounts = accounts::Entity::find()
            .filter(accounts::Column::AccountGroupId.eq(group.id))
            .count(&self.db)
            .await?;
        if accounts > 0 {
            return Err(ChartError::InUse(format!("Account group {}", group.name)));
        }
        account_groups::Entity::delete_by_id(group.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns `Duplicate` if the number is taken or `NotFound` if the group
    /// does not exist.
    pub async fn create_account(
        &self,
        input: CreateAccountInput,
    ) -> Result<accounts::Model, ChartError> {
        if accounts::Entity::find_by_id(input.num)
            .one(&self.db)
            .await?
            .is_some()
        {
            return Err(ChartError::Duplicate(input.num.to_string()));
        }
        account_groups::Entity::find_by_id(input.group_id.into_inner())
            .one(&self.db)
            .await?
            .ok_or_else(|| ChartError::NotFound(format!("Account group {}", input.group_id)))?;

        let account = accounts::ActiveModel {
            num: Set(input.num),
            name: Set(input.name),
            account_group_id: Set(input.group_id.into_inner()),
            available_for_invoicing: Set(input.available_for_invoicing),
            object_requirement: Set(input.object_requirement.code()),
        }
        .insert(&self.db)
        .await?;
        Ok(account)
    }

    /// Fetches an account by number.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account does not exist.
    pub async fn find_account(&self, num: i32) -> Result<accounts::Model, ChartError> {
        accounts::Entity::find_by_id(num)
            .one(&self.db)
            .await?
            .ok_or_else(|| ChartError::NotFound(format!("Account {num}")))
    }

    /// Lists accounts ordered by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_accounts(&self) -> Result<Vec<accounts::Model>, ChartError> {
        Ok(accounts::Entity::find()
            .order_by_asc(accounts::Column::Num)
            .all(&self.db)
            .await?)
    }

    /// Lists every account with its group and class, ordered by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn account_structure(&self) -> Result<Vec<AccountMeta>, ChartError> {
        Ok(support::load_chart(&self.db).await?)
    }

    /// Deletes an account that no item or incoming balance references.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `InUse`.
    pub async fn delete_account(&self, num: i32) -> Result<(), ChartError> {
        let account = self.find_account(num).await?;
        let items = journal_items::Entity::find()
            .filter(journal_items::Column::Account.eq(num))
            .count(&self.db)
            .await?;
        let balances = incoming_balances::Entity::find()
            .filter(incoming_balances::Column::Account.eq(num))
            .count(&self.db)
            .await?;
        if items + balances > 0 {
            return Err(ChartError::InUse(format!("Account {} {}", account.num, account.name)));
        }
        accounts::Entity::delete_by_id(num).exec(&self.db).await?;
        Ok(())
    }

    // ========================================================================
    // Objects
    // ========================================================================

    /// Creates an active cost object.
    ///
    /// # Errors
    ///
    /// Returns `Duplicate` if the name is taken.
    pub async fn create_object(&self, name: &str) -> Result<objects::Model, ChartError> {
        let taken = objects::Entity::find()
            .filter(objects::Column::Name.eq(name))
            .count(&self.db)
            .await?;
        if taken > 0 {
            return Err(ChartError::Duplicate(name.to_string()));
        }

        let object = objects::ActiveModel {
            id: Set(ObjectId::new().into_inner()),
            name: Set(name.to_string()),
            active: Set(true),
        }
        .insert(&self.db)
        .await?;
        Ok(object)
    }

    /// Lists cost objects ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_objects(&self, active_only: bool) -> Result<Vec<objects::Model>, ChartError> {
        let mut query = objects::Entity::find();
        if active_only {
            query = query.filter(objects::Column::Active.eq(true));
        }
        Ok(query
            .order_by_asc(objects::Column::Name)
            .all(&self.db)
            .await?)
    }

    /// Marks a cost object inactive. Existing items keep referencing it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the object does not exist.
    pub async fn deactivate_object(&self, id: ObjectId) -> Result<objects::Model, ChartError> {
        let object = objects::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or_else(|| ChartError::NotFound(format!("Object {id}")))?;
        let mut active: objects::ActiveModel = object.into();
        active.active = Set(false);
        Ok(active.update(&self.db).await?)
    }

    /// Deletes a cost object no item references.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `InUse`.
    pub async fn delete_object(&self, id: ObjectId) -> Result<(), ChartError> {
        let object = objects::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or_else(|| ChartError::NotFound(format!("Object {id}")))?;
        let items = journal_items::Entity::find()
            .filter(journal_items::Column::ObjectId.eq(object.id))
            .count(&self.db)
            .await?;
        if items > 0 {
            return Err(ChartError::InUse(format!("Object {}", object.name)));
        }
        objects::Entity::delete_by_id(object.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
