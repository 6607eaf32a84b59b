//! Integration tests for the chart of accounts repository.

mod common;

use common::{CASH, COSTS, SALES, SPONSORSHIP, TestLedger, date};
use rust_decimal_macros::dec;
use tallybook_core::ledger::{EntryLine, ObjectRequirement};
use tallybook_db::repositories::{ChartError, CreateAccountInput, CreateClassInput};
use tallybook_shared::types::{AccountClassId, AccountGroupId, ObjectId};

// ============================================================================
// Test: Account structure joins groups and classes
// ============================================================================
#[tokio::test]
async fn test_account_structure() {
    let ledger = TestLedger::new().await;

    let structure = ledger.chart.account_structure().await.unwrap();

    let nums: Vec<i32> = structure.iter().map(|a| a.num).collect();
    assert_eq!(nums, vec![1000, 1100, 2000, 3000, 4000, 4100, 5000, 5100]);
    let cash = &structure[0];
    assert_eq!(cash.group_name, "Cash");
    assert_eq!(cash.class_name, "Assets");
    assert!(cash.in_balance);
    assert!(!cash.balance_negative);
    let sales = structure.iter().find(|a| a.num == SALES).unwrap();
    assert!(!sales.in_balance);

    let sponsorship = ledger.chart.find_account(SPONSORSHIP).await.unwrap();
    assert_eq!(
        ObjectRequirement::from_code(sponsorship.object_requirement),
        Some(ObjectRequirement::Required)
    );
}

// ============================================================================
// Test: Names and numbers are unique
// ============================================================================
#[tokio::test]
async fn test_duplicates_rejected() {
    let ledger = TestLedger::new().await;

    let class = ledger
        .chart
        .create_class(CreateClassInput {
            name: "Assets".to_string(),
            in_balance: true,
            balance_negative: false,
        })
        .await;
    assert!(matches!(class, Err(ChartError::Duplicate(name)) if name == "Assets"));

    let group = ledger.chart.list_groups().await.unwrap()[0].id;
    let account = ledger
        .chart
        .create_account(CreateAccountInput {
            num: CASH,
            name: "Petty cash".to_string(),
            group_id: AccountGroupId::from_uuid(group),
            available_for_invoicing: false,
            object_requirement: ObjectRequirement::Optional,
        })
        .await;
    assert!(matches!(account, Err(ChartError::Duplicate(_))));

    ledger.object("Conference").await;
    let object = ledger.chart.create_object("Conference").await;
    assert!(matches!(object, Err(ChartError::Duplicate(_))));
}

#[tokio::test]
async fn test_account_in_unknown_group_rejected() {
    let ledger = TestLedger::new().await;

    let result = ledger
        .chart
        .create_account(CreateAccountInput {
            num: 6000,
            name: "Orphan".to_string(),
            group_id: AccountGroupId::new(),
            available_for_invoicing: false,
            object_requirement: ObjectRequirement::Optional,
        })
        .await;

    let err = result.expect_err("Unknown group must be rejected");
    assert!(matches!(err, ChartError::NotFound(_)));
    assert_eq!(err.error_code(), "NOT_FOUND");
}

// ============================================================================
// Test: Referenced rows cannot be deleted
// ============================================================================
#[tokio::test]
async fn test_delete_account_in_use_refused() {
    let ledger = TestLedger::new().await;
    ledger.post(2025, date(2025, 1, 2), CASH, SALES, dec!(10)).await;

    let err = ledger.chart.delete_account(CASH).await.unwrap_err();
    assert!(matches!(err, ChartError::InUse(_)));

    ledger.chart.delete_account(COSTS).await.expect("Unused account is deletable");
    let missing = ledger.chart.find_account(COSTS).await;
    assert!(matches!(missing, Err(ChartError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_class_and_group_with_children_refused() {
    let ledger = TestLedger::new().await;
    let classes = ledger.chart.list_classes().await.unwrap();
    let assets = classes.iter().find(|c| c.name == "Assets").unwrap();

    let err = ledger
        .chart
        .delete_class(AccountClassId::from_uuid(assets.id))
        .await
        .unwrap_err();
    assert!(matches!(err, ChartError::InUse(_)));

    let groups = ledger.chart.list_groups().await.unwrap();
    let cash = groups.iter().find(|g| g.name == "Cash").unwrap();
    let err = ledger
        .chart
        .delete_group(AccountGroupId::from_uuid(cash.id))
        .await
        .unwrap_err();
    assert!(matches!(err, ChartError::InUse(_)));
}

// ============================================================================
// Test: Objects
// ============================================================================
#[tokio::test]
async fn test_object_lifecycle() {
    let ledger = TestLedger::new().await;
    let used = ledger.object("Conference").await;
    let spare = ledger.object("Meetup").await;
    let used_id = ObjectId::from_uuid(used.id);
    ledger
        .open_entry(
            2025,
            date(2025, 5, 1),
            vec![
                EntryLine::new(CASH, dec!(50), "Ticket").with_object(used_id),
                EntryLine::new(SPONSORSHIP, dec!(-50), "Ticket").with_object(used_id),
            ],
        )
        .await;

    let deactivated = ledger.chart.deactivate_object(used_id).await.unwrap();
    assert!(!deactivated.active);
    let active = ledger.chart.list_objects(true).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].name, "Meetup");
    assert_eq!(ledger.chart.list_objects(false).await.unwrap().len(), 2);

    let err = ledger.chart.delete_object(used_id).await.unwrap_err();
    assert!(matches!(err, ChartError::InUse(_)));
    ledger
        .chart
        .delete_object(ObjectId::from_uuid(spare.id))
        .await
        .expect("Unused object is deletable");
}
