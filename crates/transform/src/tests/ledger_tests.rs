// Range Deduplication Ledger Tests

use crate::ledger::RangeLedger;

#[test]
fn test_unprocessed_by_default() {
    let ledger = RangeLedger::new();
    assert!(!ledger.is_processed(&(0..10)));
    assert!(ledger.is_empty());
}

#[test]
fn test_mark_then_query() {
    let mut ledger = RangeLedger::new();
    ledger.mark_processed(&(4..9));
    assert!(ledger.is_processed(&(4..9)));
    assert_eq!(ledger.len(), 1);
}

#[test]
fn test_exact_key_semantics() {
    // Partial overlap is not the same entry; upstream must surface it
    // as a conflict instead
    let mut ledger = RangeLedger::new();
    ledger.mark_processed(&(4..9));
    assert!(!ledger.is_processed(&(4..8)));
    assert!(!ledger.is_processed(&(5..9)));
    assert!(!ledger.is_processed(&(0..20)));
}

#[test]
fn test_mark_is_idempotent() {
    let mut ledger = RangeLedger::new();
    ledger.mark_processed(&(4..9));
    ledger.mark_processed(&(4..9));
    assert_eq!(ledger.len(), 1);
}

#[test]
fn test_clear_resets_state() {
    let mut ledger = RangeLedger::new();
    ledger.mark_processed(&(4..9));
    ledger.clear();
    assert!(!ledger.is_processed(&(4..9)));
    assert!(ledger.is_empty());
}
