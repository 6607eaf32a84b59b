//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing an `ObjectId` where a
//! `JournalEntryId` is expected. Accounts and fiscal years are keyed by
//! their natural numbers (account number, year) and have no typed ID.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(AccountClassId, "Unique identifier for an account class.");
typed_id!(AccountGroupId, "Unique identifier for an account group.");
typed_id!(ObjectId, "Unique identifier for a cost object.");
typed_id!(JournalEntryId, "Unique identifier for a journal entry.");
typed_id!(JournalItemId, "Unique identifier for a journal item.");
typed_id!(IncomingBalanceId, "Unique identifier for an incoming balance row.");
typed_id!(JournalUrlId, "Unique identifier for a reference URL attached to an entry.");
