use super::id::*;
use std::str::FromStr;
use uuid::Uuid;

#[test]
fn test_typed_id_creation() {
    let id = JournalEntryId::new();
    assert!(!id.to_string().is_empty());
}

#[test]
fn test_typed_id_from_uuid() {
    let uuid = Uuid::new_v4();
    let id = ObjectId::from_uuid(uuid);
    assert_eq!(id.into_inner(), uuid);
}

#[test]
fn test_typed_ids_are_time_ordered() {
    let first = JournalEntryId::new();
    let second = JournalEntryId::new();
    assert!(first.into_inner() < second.into_inner());
}

#[test]
fn test_typed_id_display() {
    let uuid = Uuid::new_v4();
    let id = JournalItemId::from_uuid(uuid);
    assert_eq!(format!("{id}"), uuid.to_string());
}

#[test]
fn test_typed_id_from_str() {
    let uuid = Uuid::new_v4();
    let id = AccountClassId::from_str(&uuid.to_string()).unwrap();
    assert_eq!(id.into_inner(), uuid);
}

#[test]
fn test_typed_id_from_str_error() {
    assert!(AccountGroupId::from_str("invalid").is_err());
}

#[test]
fn test_typed_id_serde_transparent() {
    let uuid = Uuid::new_v4();
    let id = IncomingBalanceId::from_uuid(uuid);
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{uuid}\""));
}
