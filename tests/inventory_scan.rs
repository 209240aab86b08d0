//! Integration tests for ledger reads and the directory scan.
//!
//! Covers the read side a dashboard or consumer lookup relies on:
//! bounded inventory scans, item traces and the not-found sentinel.

use std::sync::Arc;

use provenance_client::adapters::InMemoryLedger;
use provenance_client::application::{DirectoryScanner, LedgerClient};
use provenance_client::domain::foundation::{Address, ErrorCode, ItemId};
use provenance_client::domain::inventory::{ScanAdvisory, StatusCounts};
use provenance_client::domain::ledger::{Authenticity, ItemStatus, LedgerError};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn addr_a() -> Address {
    Address::repeat_byte(0xa0)
}

fn addr_b() -> Address {
    Address::repeat_byte(0xb0)
}

/// Item 1 owned by A (Created), item 2 owned by B (In Transit), nothing else.
fn fixture() -> Arc<InMemoryLedger> {
    let ledger = Arc::new(InMemoryLedger::new());
    ledger.seed_item("Coffee", "0xc0ffee", addr_a(), addr_a(), ItemStatus::Created);
    ledger.seed_item("Tea", "0x7ea", addr_a(), addr_b(), ItemStatus::InTransit);
    ledger
}

fn id(value: u64) -> ItemId {
    ItemId::new(value).unwrap()
}

// =============================================================================
// Directory Scan
// =============================================================================

#[tokio::test]
async fn scan_returns_owned_items_and_global_counts() {
    let ledger = fixture();
    let scanner = DirectoryScanner::new(LedgerClient::read_only(ledger.clone()));

    let scan = scanner.scan_inventory(10, Some(&addr_a())).await;

    let owned: Vec<u64> = scan.owned.iter().map(|item| item.item_id).collect();
    assert_eq!(owned, vec![1]);
    assert_eq!(
        scan.counts,
        StatusCounts {
            created: 1,
            in_transit: 1,
            delivered: 0,
            rejected: 0,
            unknown: 0,
        }
    );
    assert_eq!(scan.counts.active_shipments(), 1);
    assert!(!scan.is_truncated());
}

#[tokio::test]
async fn scan_survives_failing_ids() {
    let ledger = fixture();
    ledger.fail_reads_for(2);
    ledger.fail_reads_for(5);
    let scanner = DirectoryScanner::new(LedgerClient::read_only(ledger.clone()));

    let scan = scanner.scan_inventory(10, Some(&addr_b())).await;

    assert!(scan.owned.is_empty());
    assert_eq!(scan.skipped_on_error, vec![2, 5]);
    assert_eq!(scan.counts.total(), 1);
    assert_eq!(scan.probed, 10);
}

#[tokio::test]
async fn scan_reports_probe_bound_instead_of_hiding_it() {
    let ledger = fixture();
    for n in 0..3 {
        ledger.seed_item(&format!("Batch {}", n), "0x00", addr_a(), addr_a(), ItemStatus::Delivered);
    }
    let scanner = DirectoryScanner::new(LedgerClient::read_only(ledger.clone()));

    let scan = scanner.scan_inventory(4, None).await;

    assert_eq!(scan.found, 4);
    let advisory = scan.advisory.unwrap();
    assert_eq!(advisory, ScanAdvisory::BoundExceeded { max_probe_id: 4 });
    assert_eq!(advisory.code(), ErrorCode::ScanBoundExceeded);
}

#[tokio::test]
async fn scan_result_serializes_for_display() {
    let ledger = fixture();
    let scanner = DirectoryScanner::new(LedgerClient::read_only(ledger.clone()));

    let scan = scanner.scan_inventory(2, Some(&addr_a())).await;
    let json = serde_json::to_value(&scan).unwrap();

    assert_eq!(json["counts"]["created"], 1);
    assert_eq!(json["advisory"]["kind"], "bound_exceeded");
    assert_eq!(json["owned"][0]["name"], "Coffee");
}

// =============================================================================
// Single-Item Reads
// =============================================================================

#[tokio::test]
async fn zero_valued_record_is_not_found_not_an_error() {
    let client = LedgerClient::read_only(fixture());

    let raw = client.get_item_basic(id(9)).await.unwrap();
    assert!(raw.is_not_found());
    assert_eq!(client.find_item(id(9)).await.unwrap(), None);
    assert!(client.trace_item(id(9)).await.unwrap().is_none());
}

#[tokio::test]
async fn direct_lookup_propagates_read_errors() {
    let ledger = fixture();
    ledger.fail_reads_for(1);
    let client = LedgerClient::read_only(ledger);

    let err = client.trace_item(id(1)).await.unwrap_err();

    assert!(matches!(err, LedgerError::RemoteReadError(_)));
    assert_eq!(err.code(), ErrorCode::RemoteReadError);
}

#[tokio::test]
async fn consumer_lookup_verifies_and_traces() {
    let client = LedgerClient::read_only(fixture());

    assert_eq!(
        client.verify_authenticity(id(2), "0x7ea").await.unwrap(),
        Authenticity::Authentic
    );
    assert_eq!(
        client.verify_authenticity(id(2), "0xfake").await.unwrap(),
        Authenticity::NotAuthentic
    );

    let trace = client.trace_item(id(2)).await.unwrap().unwrap();
    assert_eq!(trace.item.name, "Tea");
    assert_eq!(trace.item.status.label(), "In Transit");
    assert_eq!(trace.history.len() as u64, client.get_item_history_count(id(2)).await.unwrap());
}
