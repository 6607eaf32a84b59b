//! Report data types.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tallybook_shared::types::ObjectId;

use super::error::ReportError;

// ============================================================================
// Report kinds and requests
// ============================================================================

/// The report kinds that can be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// Chronological items per account.
    Ledger,
    /// Income and expense per results account.
    Results,
    /// Incoming, period and outgoing balance per balance-sheet account.
    Balance,
    /// Results for one cost object across all years.
    Object,
}

impl ReportKind {
    /// Returns the identifier used in requests.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ledger => "ledger",
            Self::Results => "results",
            Self::Balance => "balance",
            Self::Object => "object",
        }
    }

    /// Returns true if the report is bounded to one fiscal year.
    #[must_use]
    pub const fn needs_year(self) -> bool {
        !matches!(self, Self::Object)
    }
}

impl FromStr for ReportKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ledger" => Ok(Self::Ledger),
            "results" => Ok(Self::Results),
            "balance" => Ok(Self::Balance),
            "object" => Ok(Self::Object),
            other => Err(ReportError::UnknownReportKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of a report request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    /// Report kind.
    pub kind: ReportKind,
    /// Fiscal year; required by every kind except the object report.
    pub year: Option<i32>,
    /// Last date to include; clamped to the fiscal year end when outside it.
    pub end_date: Option<NaiveDate>,
    /// Restrict the ledger report to one account.
    pub account: Option<i32>,
    /// Restrict to items tagged with this object (required for the object report).
    pub object: Option<ObjectId>,
    /// Include entries that are not closed yet.
    pub include_open: bool,
}

impl ReportRequest {
    /// Creates a request for a year with default filters.
    #[must_use]
    pub const fn for_year(kind: ReportKind, year: i32) -> Self {
        Self {
            kind,
            year: Some(year),
            end_date: None,
            account: None,
            object: None,
            include_open: false,
        }
    }
}

// ============================================================================
// Aggregation input
// ============================================================================

/// An account with its position in the class/group hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMeta {
    /// Account number.
    pub num: i32,
    /// Account name.
    pub name: String,
    /// Account group name.
    pub group_name: String,
    /// Whether a single-account group may be folded into its account row.
    pub group_foldable: bool,
    /// Account class name.
    pub class_name: String,
    /// Class belongs to the balance sheet.
    pub in_balance: bool,
    /// Class amounts are displayed negated.
    pub balance_negative: bool,
}

/// A journal item amount as read from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAmount {
    /// Account number.
    pub account: i32,
    /// Transaction date of the owning entry.
    pub date: NaiveDate,
    /// Signed amount.
    pub amount: Decimal,
    /// Owning entry is closed.
    pub closed: bool,
}

/// Closed and open item sums of one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccountSums {
    /// Sum over closed entries.
    pub closed: Decimal,
    /// Sum over open entries.
    pub open: Decimal,
    /// Number of items counted.
    pub items: usize,
}

/// One account row entering collation, already ordered by account number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Account class name.
    pub class_name: String,
    /// Account group name.
    pub group_name: String,
    /// Group is foldable.
    pub foldable: bool,
    /// Display values are negated.
    pub flip: bool,
    /// Account number.
    pub num: i32,
    /// Account name.
    pub name: String,
    /// Values in ledger sign.
    pub values: Vec<Decimal>,
}

impl ReportRow {
    /// Builds a row for an account.
    #[must_use]
    pub fn for_account(account: &AccountMeta, flip: bool, values: Vec<Decimal>) -> Self {
        Self {
            class_name: account.class_name.clone(),
            group_name: account.group_name.clone(),
            foldable: account.group_foldable,
            flip,
            num: account.num,
            name: account.name.clone(),
            values,
        }
    }

    /// Values as displayed.
    #[must_use]
    pub fn display_values(&self) -> Vec<Decimal> {
        if self.flip {
            self.values.iter().map(|v| -*v).collect()
        } else {
            self.values.clone()
        }
    }
}

// ============================================================================
// Report tree
// ============================================================================

/// One account line in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountLine {
    /// Account number.
    pub num: i32,
    /// Account name.
    pub name: String,
    /// Display values.
    pub values: Vec<Decimal>,
}

/// Accounts of one account group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSection {
    /// Group name.
    pub name: String,
    /// Account lines.
    pub accounts: Vec<AccountLine>,
    /// Foldable group with exactly one account.
    pub folded: bool,
    /// Display totals of the group.
    pub totals: Vec<Decimal>,
}

/// Groups of one account class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSection {
    /// Class name.
    pub name: String,
    /// Group sections.
    pub groups: Vec<GroupSection>,
    /// Display totals of the class.
    pub totals: Vec<Decimal>,
    /// Values of this class are displayed negated.
    pub flipped: bool,
}

impl ClassSection {
    /// Class totals in ledger sign (display sign undone).
    #[must_use]
    pub fn ledger_totals(&self) -> Vec<Decimal> {
        if self.flipped {
            self.totals.iter().map(|v| -*v).collect()
        } else {
            self.totals.clone()
        }
    }
}

/// A class -> group -> account tree with a grand total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTree {
    /// Class sections in account-number order.
    pub classes: Vec<ClassSection>,
    /// Grand total per column, in ledger sign.
    pub total: Vec<Decimal>,
}

impl ReportTree {
    /// Returns true if no account qualified for the report.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Iterates over every account line.
    pub fn accounts(&self) -> impl Iterator<Item = &AccountLine> {
        self.classes
            .iter()
            .flat_map(|c| c.groups.iter())
            .flat_map(|g| g.accounts.iter())
    }

    /// Finds the line of an account.
    #[must_use]
    pub fn account(&self, num: i32) -> Option<&AccountLine> {
        self.accounts().find(|a| a.num == num)
    }
}

// ============================================================================
// Reports
// ============================================================================

/// A balance, results or object report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchicalReport {
    /// Report kind.
    pub kind: ReportKind,
    /// Column headers.
    pub headers: Vec<String>,
    /// Label of the grand total row.
    pub total_label: String,
    /// The aggregated tree.
    pub tree: ReportTree,
}

/// Results for one cost object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectReport {
    /// The object.
    pub object: ObjectId,
    /// Object name.
    pub object_name: String,
    /// Results tree restricted to the object.
    pub report: HierarchicalReport,
    /// Earliest transaction date touching the object.
    pub first_date: Option<NaiveDate>,
    /// Latest transaction date touching the object.
    pub last_date: Option<NaiveDate>,
}

/// A journal item for the ledger report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerItem {
    /// Account number.
    pub account_num: i32,
    /// Account name.
    pub account_name: String,
    /// Entry sequence number.
    pub seq: i32,
    /// Entry date.
    pub date: NaiveDate,
    /// Item description.
    pub description: String,
    /// Signed amount.
    pub amount: Decimal,
    /// Object name.
    pub object: Option<String>,
    /// Entry is closed.
    pub closed: bool,
}

/// One line of the ledger report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerLine {
    /// Entry sequence number.
    pub seq: i32,
    /// Entry date.
    pub date: NaiveDate,
    /// Item description.
    pub description: String,
    /// Debit column.
    pub debit: Decimal,
    /// Credit column.
    pub credit: Decimal,
    /// Object name.
    pub object: Option<String>,
    /// Entry is closed.
    pub closed: bool,
}

/// Ledger lines of one account with the account's totals over the whole filtered set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSection {
    /// Account number.
    pub account_num: i32,
    /// Account name.
    pub account_name: String,
    /// Sum of debits.
    pub total_debit: Decimal,
    /// Sum of credits.
    pub total_credit: Decimal,
    /// Lines ordered by date and sequence.
    pub lines: Vec<LedgerLine>,
}

/// The ledger report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerReport {
    /// One section per account, ordered by account number.
    pub sections: Vec<LedgerSection>,
}

/// A generated report of any kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Report {
    /// Ledger report.
    Ledger(LedgerReport),
    /// Results report.
    Results(HierarchicalReport),
    /// Balance report.
    Balance(HierarchicalReport),
    /// Object report.
    Object(ObjectReport),
}

impl Report {
    /// Returns the report kind.
    #[must_use]
    pub const fn kind(&self) -> ReportKind {
        match self {
            Self::Ledger(_) => ReportKind::Ledger,
            Self::Results(_) => ReportKind::Results,
            Self::Balance(_) => ReportKind::Balance,
            Self::Object(_) => ReportKind::Object,
        }
    }
}

/// Advisory notices shown with a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportNotice {
    /// The year is still open.
    YearOpen(i32),
    /// The year has open entries and they are not included.
    OpenEntriesExcluded,
    /// The previous year is still open, so incoming balances may be wrong.
    PreviousYearOpen(i32),
}

impl std::fmt::Display for ReportNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::YearOpen(_) => f.write_str("This year is still open!"),
            Self::OpenEntriesExcluded => {
                f.write_str("This year has open entries! These are not included in the report!")
            }
            Self::PreviousYearOpen(y) => write!(
                f,
                "Previous year ({y}) is still open. Incoming balance will be incorrect!"
            ),
        }
    }
}

/// A report with its notices and the effective filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOutput {
    /// The report.
    pub report: Report,
    /// Advisory notices.
    pub notices: Vec<ReportNotice>,
    /// Effective end date.
    pub end_date: Option<NaiveDate>,
    /// Whether open entries were included.
    pub include_open: bool,
}
