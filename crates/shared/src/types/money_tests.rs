use super::money::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[rstest]
#[case(dec!(100), true)]
#[case(dec!(100.5), true)]
#[case(dec!(100.55), true)]
#[case(dec!(100.550), true)]
#[case(dec!(100.555), false)]
#[case(dec!(-0.001), false)]
fn test_has_cent_precision(#[case] amount: Decimal, #[case] expected: bool) {
    assert_eq!(has_cent_precision(amount), expected);
}

#[test]
fn test_debit_credit_from_positive() {
    let dc = DebitCredit::from_signed(dec!(250.00));
    assert_eq!(dc.debit, dec!(250.00));
    assert_eq!(dc.credit, Decimal::ZERO);
    assert_eq!(dc.signed(), dec!(250.00));
}

#[test]
fn test_debit_credit_from_negative() {
    let dc = DebitCredit::from_signed(dec!(-80.10));
    assert_eq!(dc.debit, Decimal::ZERO);
    assert_eq!(dc.credit, dec!(80.10));
    assert_eq!(dc.signed(), dec!(-80.10));
}

#[test]
fn test_debit_credit_zero() {
    let dc = DebitCredit::from_signed(Decimal::ZERO);
    assert_eq!(dc, DebitCredit::default());
}

#[test]
fn test_debit_credit_add() {
    let total = DebitCredit::from_signed(dec!(10)).add(DebitCredit::from_signed(dec!(-4)));
    assert_eq!(total.debit, dec!(10));
    assert_eq!(total.credit, dec!(4));
    assert_eq!(total.signed(), dec!(6));
}
