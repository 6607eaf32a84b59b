//! `SeaORM` entities for the accounting schema.

pub mod prelude;

pub mod account_classes;
pub mod account_groups;
pub mod accounts;
pub mod incoming_balances;
pub mod journal_entries;
pub mod journal_items;
pub mod journal_urls;
pub mod objects;
pub mod years;
