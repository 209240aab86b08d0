//! DirectoryScanner - inventory view rebuilt by probing item ids.
//!
//! The ledger has no enumeration call, so the scanner reads ids
//! `1..=max_probe_id` one at a time. The result is an approximation bounded
//! by the probe limit: items beyond it are never seen, and the scan says so
//! through [`ScanAdvisory::BoundExceeded`] instead of hiding it.

use crate::domain::foundation::{Address, ItemId};
use crate::domain::inventory::{InventoryScan, ItemSummary, ScanAdvisory};

use super::LedgerClient;

/// Bounded linear scan over a ledger client's reads.
#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    client: LedgerClient,
}

impl DirectoryScanner {
    pub fn new(client: LedgerClient) -> Self {
        Self { client }
    }

    /// Reads every id in `1..=max_probe_id` in order.
    ///
    /// Each existing item is tallied by status; items currently owned by
    /// `viewer` are also collected. A failed read counts the id as absent
    /// and the scan carries on. Reads are strictly sequential.
    ///
    /// If the id at the bound exists, or could not be read, more items may
    /// lie beyond it and the scan carries [`ScanAdvisory::BoundExceeded`].
    pub async fn scan_inventory(&self, max_probe_id: u64, viewer: Option<&Address>) -> InventoryScan {
        let mut scan = InventoryScan::empty(max_probe_id);
        let mut bound_unresolved = false;

        tracing::debug!(max_probe_id, viewer = ?viewer, "Inventory scan started");

        for raw_id in 1..=max_probe_id {
            let Ok(item_id) = ItemId::new(raw_id) else {
                continue;
            };
            scan.probed += 1;
            bound_unresolved = false;

            let record = match self.client.find_item(item_id).await {
                Ok(Some(record)) => record,
                Ok(None) => {
                    tracing::debug!(%item_id, "No item at id");
                    continue;
                }
                Err(e) => {
                    tracing::debug!(%item_id, code = %e.code(), "Read failed, treating item as absent: {}", e);
                    scan.skipped_on_error.push(raw_id);
                    bound_unresolved = true;
                    continue;
                }
            };

            bound_unresolved = true;
            scan.found += 1;
            scan.counts.record(record.status);
            if viewer.is_some_and(|viewer| record.is_owned_by(viewer)) {
                scan.owned.push(ItemSummary::from(&record));
            }
        }

        if bound_unresolved {
            tracing::warn!(
                max_probe_id,
                "Item at the probe bound exists or was unreadable; inventory counts may be incomplete"
            );
            scan.advisory = Some(ScanAdvisory::BoundExceeded { max_probe_id });
        }

        if !scan.skipped_on_error.is_empty() {
            tracing::warn!(
                skipped = scan.skipped_on_error.len(),
                "Some item reads failed during the scan"
            );
        }

        tracing::debug!(
            found = scan.found,
            owned = scan.owned.len(),
            total = scan.counts.total(),
            "Inventory scan finished"
        );
        scan
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapters::ledger::InMemoryLedger;
    use crate::domain::inventory::StatusCounts;
    use crate::domain::ledger::ItemStatus;

    fn addr_a() -> Address {
        Address::repeat_byte(0xaa)
    }

    fn addr_b() -> Address {
        Address::repeat_byte(0xbb)
    }

    fn fixture() -> Arc<InMemoryLedger> {
        let ledger = Arc::new(InMemoryLedger::new());
        ledger.seed_item("Coffee", "h1", addr_a(), addr_a(), ItemStatus::Created);
        ledger.seed_item("Tea", "h2", addr_a(), addr_b(), ItemStatus::InTransit);
        ledger
    }

    fn scanner(ledger: &Arc<InMemoryLedger>) -> DirectoryScanner {
        DirectoryScanner::new(LedgerClient::read_only(ledger.clone()))
    }

    #[tokio::test]
    async fn collects_owned_items_and_counts_every_status() {
        let ledger = fixture();

        let scan = scanner(&ledger).scan_inventory(10, Some(&addr_a())).await;

        assert_eq!(scan.owned.len(), 1);
        assert_eq!(scan.owned[0].item_id, 1);
        assert_eq!(
            scan.counts,
            StatusCounts {
                created: 1,
                in_transit: 1,
                ..StatusCounts::default()
            }
        );
        assert_eq!(scan.probed, 10);
        assert_eq!(scan.found, 2);
        assert!(scan.advisory.is_none());
    }

    #[tokio::test]
    async fn owner_match_ignores_hex_case() {
        let ledger = fixture();
        let viewer: Address = "0xBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBB".parse().unwrap();

        let scan = scanner(&ledger).scan_inventory(10, Some(&viewer)).await;

        assert_eq!(scan.owned.len(), 1);
        assert_eq!(scan.owned[0].name, "Tea");
    }

    #[tokio::test]
    async fn read_failure_is_skipped_not_fatal() {
        let ledger = fixture();
        ledger.fail_reads_for(1);

        let scan = scanner(&ledger).scan_inventory(10, Some(&addr_a())).await;

        assert!(scan.owned.is_empty());
        assert_eq!(scan.skipped_on_error, vec![1]);
        assert_eq!(scan.counts.total(), 1);
    }

    #[tokio::test]
    async fn item_at_bound_flags_possible_undercount() {
        let ledger = fixture();

        let scan = scanner(&ledger).scan_inventory(2, None).await;

        assert_eq!(
            scan.advisory,
            Some(ScanAdvisory::BoundExceeded { max_probe_id: 2 })
        );
        assert!(scan.is_truncated());
    }

    #[tokio::test]
    async fn unreadable_bound_still_flags_possible_undercount() {
        let ledger = fixture();
        ledger.fail_reads_for(2);

        let scan = scanner(&ledger).scan_inventory(2, None).await;

        assert_eq!(scan.skipped_on_error, vec![2]);
        assert_eq!(
            scan.advisory,
            Some(ScanAdvisory::BoundExceeded { max_probe_id: 2 })
        );
    }

    #[tokio::test]
    async fn empty_bound_needs_no_advisory() {
        let ledger = fixture();

        let scan = scanner(&ledger).scan_inventory(3, None).await;

        assert_eq!(scan.found, 2);
        assert!(scan.advisory.is_none());
    }

    #[tokio::test]
    async fn reads_one_item_per_probe() {
        let ledger = fixture();

        scanner(&ledger).scan_inventory(7, None).await;

        assert_eq!(ledger.read_count(), 7);
    }

    #[tokio::test]
    async fn zero_bound_scans_nothing() {
        let ledger = fixture();

        let scan = scanner(&ledger).scan_inventory(0, Some(&addr_a())).await;

        assert_eq!(scan.probed, 0);
        assert_eq!(ledger.read_count(), 0);
        assert!(scan.advisory.is_none());
    }

    #[tokio::test]
    async fn without_viewer_only_counts() {
        let ledger = fixture();

        let scan = scanner(&ledger).scan_inventory(10, None).await;

        assert!(scan.owned.is_empty());
        assert_eq!(scan.counts.total(), 2);
    }
}
