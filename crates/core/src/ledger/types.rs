//! Ledger domain types for journal entry creation and validation.
//!
//! Amounts are signed: positive is a debit, negative is a credit. Debit and
//! credit columns are derived for display and accepted as input through
//! [`DebitCreditLine`], but never stored separately.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tallybook_shared::types::{DebitCredit, ObjectId};

/// Maximum number of characters stored in an item description.
pub const DESCRIPTION_MAX_CHARS: usize = 200;

/// Whether items posted to an account must carry a cost object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectRequirement {
    /// An object may be set.
    #[default]
    Optional,
    /// An object must be set.
    Required,
    /// An object must not be set.
    Forbidden,
}

impl ObjectRequirement {
    /// Returns the stored code (0 optional, 1 required, 2 forbidden).
    #[must_use]
    pub const fn code(self) -> i16 {
        match self {
            Self::Optional => 0,
            Self::Required => 1,
            Self::Forbidden => 2,
        }
    }

    /// Parses a stored code.
    #[must_use]
    pub const fn from_code(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Optional),
            1 => Some(Self::Required),
            2 => Some(Self::Forbidden),
            _ => None,
        }
    }
}

/// One candidate line with a signed amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryLine {
    /// Account number.
    pub account: i32,
    /// Signed amount (positive debit, negative credit).
    pub amount: Decimal,
    /// Optional cost object.
    pub object: Option<ObjectId>,
    /// Free-text description.
    pub description: String,
    /// Line is marked for removal and counts as zero.
    #[serde(default)]
    pub delete: bool,
}

impl EntryLine {
    /// Creates a kept line.
    #[must_use]
    pub fn new(account: i32, amount: Decimal, description: impl Into<String>) -> Self {
        Self {
            account,
            amount,
            object: None,
            description: description.into(),
            delete: false,
        }
    }

    /// Sets the cost object.
    #[must_use]
    pub fn with_object(mut self, object: ObjectId) -> Self {
        self.object = Some(object);
        self
    }

    /// Marks the line for deletion.
    #[must_use]
    pub fn deleted(mut self) -> Self {
        self.delete = true;
        self
    }

    /// Amount the line contributes to the entry sum.
    #[must_use]
    pub fn effective_amount(&self) -> Decimal {
        if self.delete { Decimal::ZERO } else { self.amount }
    }
}

/// One candidate line entered as separate debit and credit columns.
///
/// A zero in either column is treated as blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebitCreditLine {
    /// Account number.
    pub account: i32,
    /// Debit column.
    pub debit: Option<Decimal>,
    /// Credit column.
    pub credit: Option<Decimal>,
    /// Optional cost object.
    pub object: Option<ObjectId>,
    /// Free-text description.
    pub description: String,
    /// Line is marked for removal.
    #[serde(default)]
    pub delete: bool,
}

/// A validated line ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedLine {
    /// Account number.
    pub account: i32,
    /// Signed, non-zero amount.
    pub amount: Decimal,
    /// Optional cost object.
    pub object: Option<ObjectId>,
    /// Description, at most [`DESCRIPTION_MAX_CHARS`] characters.
    pub description: String,
}

/// Result of a successful validation: the kept lines and their totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedEntry {
    /// Lines to store; lines marked for deletion are dropped.
    pub lines: Vec<PostedLine>,
    /// Debit and credit totals (always equal).
    pub totals: DebitCredit,
}

/// An item of an automatic posting (payment reconciliation).
///
/// Accounts are referenced by number and objects by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomaticItem {
    /// Account number.
    pub account: i32,
    /// Description; truncated on storage.
    pub description: String,
    /// Signed amount.
    pub amount: Decimal,
    /// Cost object name.
    pub object: Option<String>,
}

impl AutomaticItem {
    /// Creates an item without a cost object.
    #[must_use]
    pub fn new(account: i32, description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account,
            description: description.into(),
            amount,
            object: None,
        }
    }

    /// Sets the cost object name.
    #[must_use]
    pub fn with_object(mut self, name: impl Into<String>) -> Self {
        self.object = Some(name.into());
        self
    }
}

/// Cuts a description to [`DESCRIPTION_MAX_CHARS`] characters.
#[must_use]
pub fn truncate_description(description: &str) -> String {
    description.chars().take(DESCRIPTION_MAX_CHARS).collect()
}
