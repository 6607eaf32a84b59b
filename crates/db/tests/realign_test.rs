//! Integration tests for moving entries into the fiscal year of their date.

mod common;

use common::{CASH, COSTS, SALES, TestLedger, date};
use rust_decimal_macros::dec;
use tallybook_core::fiscal::FiscalCalendar;
use tallybook_db::repositories::FiscalRepository;

/// A repository whose fiscal years start on July 1.
fn july_fiscal(ledger: &TestLedger) -> FiscalRepository {
    let calendar = FiscalCalendar::new(7, 1).expect("valid fiscal start");
    FiscalRepository::new(ledger.db.clone(), calendar)
}

// ============================================================================
// Test: Nothing to do when every entry is in its year
// ============================================================================
#[tokio::test]
async fn test_realign_check_empty() {
    let ledger = TestLedger::new().await;
    ledger.post(2025, date(2025, 2, 1), CASH, SALES, dec!(10)).await;

    let report = ledger.fiscal.realign_check().await.unwrap();

    assert!(report.plan.is_empty());
    assert!(report.assignments.is_empty());
    assert!(report.missing_years.is_empty());
}

// ============================================================================
// Test: Check lists moves without changing anything
// ============================================================================
#[tokio::test]
async fn test_realign_check_lists_moves() {
    let ledger = TestLedger::new().await;
    ledger.post(2025, date(2025, 2, 1), CASH, SALES, dec!(10)).await;
    ledger.post(2025, date(2025, 9, 30), COSTS, CASH, dec!(4)).await;

    let report = july_fiscal(&ledger).realign_check().await.unwrap();

    assert_eq!(report.plan.moves.len(), 1);
    let moved = &report.plan.moves[0];
    assert_eq!((moved.from_year, moved.to_year), (2025, 2024));
    assert_eq!(moved.date, date(2025, 2, 1));
    assert_eq!(report.missing_years, vec![2024]);
    assert!(report.emptied_years.is_empty());

    let entries = ledger.journal.entries_chronological(2025).await.unwrap();
    assert_eq!(entries.len(), 2);
}

// ============================================================================
// Test: Execute moves entries and renumbers them in the target year
// ============================================================================
#[tokio::test]
async fn test_realign_execute_moves_and_renumbers() {
    let ledger = TestLedger::new().await;
    ledger.post(2025, date(2025, 2, 1), CASH, SALES, dec!(10)).await;
    ledger.post(2025, date(2025, 9, 30), COSTS, CASH, dec!(4)).await;
    ledger.post(2025, date(2025, 3, 15), CASH, SALES, dec!(6)).await;

    let fiscal = july_fiscal(&ledger);
    let report = fiscal.realign_execute().await.unwrap();
    assert_eq!(report.assignments.len(), 2);

    let moved = ledger.journal.entries_chronological(2024).await.unwrap();
    let placed: Vec<_> = moved.iter().map(|e| (e.date, e.seq)).collect();
    assert_eq!(placed, vec![(date(2025, 2, 1), 1), (date(2025, 3, 15), 2)]);

    let remaining = ledger.journal.entries_chronological(2025).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].seq, 2);

    let years = ledger.journal.list_years().await.unwrap();
    let states: Vec<(i32, bool)> = years.iter().map(|y| (y.year, y.is_open)).collect();
    assert_eq!(states, vec![(2025, true), (2024, false)]);

    assert!(fiscal.realign_check().await.unwrap().plan.is_empty());
}

// ============================================================================
// Test: Source years left empty are removed
// ============================================================================
#[tokio::test]
async fn test_realign_execute_removes_emptied_year() {
    let ledger = TestLedger::new().await;
    ledger.post(2025, date(2025, 2, 1), CASH, SALES, dec!(10)).await;

    let report = july_fiscal(&ledger).realign_execute().await.unwrap();

    assert_eq!(report.emptied_years, vec![2025]);
    let years: Vec<i32> = ledger
        .journal
        .list_years()
        .await
        .unwrap()
        .into_iter()
        .map(|y| y.year)
        .collect();
    assert_eq!(years, vec![2024]);
}
