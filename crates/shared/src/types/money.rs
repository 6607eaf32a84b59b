//! Decimal money helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal` stored with two decimals; a
//! positive amount is a debit and a negative amount is a credit.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of decimals stored for every amount.
pub const CENT_SCALE: u32 = 2;

/// Returns true if the amount fits in two decimals without rounding.
#[must_use]
pub fn has_cent_precision(amount: Decimal) -> bool {
    amount.normalize().scale() <= CENT_SCALE
}

/// A signed amount split into its debit and credit columns.
///
/// Exactly one side is non-zero unless the amount itself is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DebitCredit {
    /// Debit column (positive amounts).
    pub debit: Decimal,
    /// Credit column (magnitude of negative amounts).
    pub credit: Decimal,
}

impl DebitCredit {
    /// Splits a signed amount into debit and credit.
    #[must_use]
    pub fn from_signed(amount: Decimal) -> Self {
        if amount.is_sign_negative() && !amount.is_zero() {
            Self {
                debit: Decimal::ZERO,
                credit: -amount,
            }
        } else {
            Self {
                debit: amount,
                credit: Decimal::ZERO,
            }
        }
    }

    /// Returns the signed amount (debit minus credit).
    #[must_use]
    pub fn signed(&self) -> Decimal {
        self.debit - self.credit
    }

    /// Adds another pair column-wise.
    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self {
            debit: self.debit + other.debit,
            credit: self.credit + other.credit,
        }
    }
}

impl std::fmt::Display for DebitCredit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "debit {} / credit {}", self.debit, self.credit)
    }
}
