//! The entry validator.
//!
//! Checks run in a fixed order and the first failure is returned:
//! 1. at least one line
//! 2. every kept line is non-zero and has at most two decimals
//! 3. the kept lines sum to exactly zero
//! 4. at least one line is kept
//! 5. each kept line honours its account's object requirement
//!
//! Lines marked for deletion count as zero and skip checks 2 and 5.

use rust_decimal::Decimal;
use tallybook_shared::types::{DebitCredit, money::has_cent_precision};

use super::error::LedgerError;
use super::service::AccountInfo;
use super::types::{
    DebitCreditLine, EntryLine, ObjectRequirement, PostedLine, ValidatedEntry,
    truncate_description,
};

/// Validates signed lines and returns the lines to store.
///
/// `account_lookup` resolves an account number; it is only called for kept
/// lines, after the balance checks have passed.
///
/// # Errors
///
/// Returns the first failing check as a `LedgerError`.
pub fn validate_lines<A>(lines: &[EntryLine], account_lookup: A) -> Result<ValidatedEntry, LedgerError>
where
    A: Fn(i32) -> Result<AccountInfo, LedgerError>,
{
    if lines.is_empty() {
        return Err(LedgerError::EmptyEntry);
    }

    for (idx, line) in lines.iter().enumerate().filter(|(_, l)| !l.delete) {
        if line.amount.is_zero() {
            return Err(LedgerError::ZeroAmountLine { line: idx + 1 });
        }
        if !has_cent_precision(line.amount) {
            return Err(LedgerError::ExcessivePrecision(line.amount));
        }
    }

    let sum: Decimal = lines.iter().map(EntryLine::effective_amount).sum();
    if !sum.is_zero() {
        return Err(LedgerError::UnbalancedEntry(sum));
    }

    let kept: Vec<&EntryLine> = lines.iter().filter(|l| !l.delete).collect();
    if kept.is_empty() {
        return Err(LedgerError::NoEffectiveLines);
    }

    let mut posted = Vec::with_capacity(kept.len());
    let mut totals = DebitCredit::default();
    for line in kept {
        let account = account_lookup(line.account)?;
        check_object_requirement(&account, line)?;

        totals = totals.add(DebitCredit::from_signed(line.amount));
        posted.push(PostedLine {
            account: line.account,
            amount: line.amount,
            object: line.object,
            description: truncate_description(&line.description),
        });
    }

    Ok(ValidatedEntry {
        lines: posted,
        totals,
    })
}

/// Converts debit/credit lines to signed lines and validates them.
///
/// # Errors
///
/// Returns `BothDebitAndCredit`, `NeitherDebitNorCredit` or `NegativeAmount`
/// for a malformed pair, otherwise the result of [`validate_lines`].
pub fn validate_debit_credit_lines<A>(
    lines: &[DebitCreditLine],
    account_lookup: A,
) -> Result<ValidatedEntry, LedgerError>
where
    A: Fn(i32) -> Result<AccountInfo, LedgerError>,
{
    let signed = lines
        .iter()
        .enumerate()
        .map(|(idx, line)| to_signed_line(idx + 1, line))
        .collect::<Result<Vec<_>, _>>()?;

    validate_lines(&signed, account_lookup)
}

fn to_signed_line(line_no: usize, line: &DebitCreditLine) -> Result<EntryLine, LedgerError> {
    let mut signed = EntryLine {
        account: line.account,
        amount: Decimal::ZERO,
        object: line.object,
        description: line.description.clone(),
        delete: line.delete,
    };
    if line.delete {
        return Ok(signed);
    }

    let debit = line.debit.filter(|d| !d.is_zero());
    let credit = line.credit.filter(|c| !c.is_zero());

    if debit.is_some_and(|d| d.is_sign_negative()) || credit.is_some_and(|c| c.is_sign_negative()) {
        return Err(LedgerError::NegativeAmount { line: line_no });
    }

    signed.amount = match (debit, credit) {
        (Some(_), Some(_)) => return Err(LedgerError::BothDebitAndCredit { line: line_no }),
        (None, None) => return Err(LedgerError::NeitherDebitNorCredit { line: line_no }),
        (Some(debit), None) => debit,
        (None, Some(credit)) => -credit,
    };
    Ok(signed)
}

fn check_object_requirement(account: &AccountInfo, line: &EntryLine) -> Result<(), LedgerError> {
    match (account.object_requirement, line.object.is_some()) {
        (ObjectRequirement::Required, false) => Err(LedgerError::MissingObject(account.num)),
        (ObjectRequirement::Forbidden, true) => Err(LedgerError::ObjectNotAllowed(account.num)),
        _ => Ok(()),
    }
}
