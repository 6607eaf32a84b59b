//! Entity re-exports.

pub use super::account_classes::Entity as AccountClasses;
pub use super::account_groups::Entity as AccountGroups;
pub use super::accounts::Entity as Accounts;
pub use super::incoming_balances::Entity as IncomingBalances;
pub use super::journal_entries::Entity as JournalEntries;
pub use super::journal_items::Entity as JournalItems;
pub use super::journal_urls::Entity as JournalUrls;
pub use super::objects::Entity as Objects;
pub use super::years::Entity as Years;
