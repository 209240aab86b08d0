//! Inventory scan results.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Address, ErrorCode};
use crate::domain::ledger::{ItemRecord, ItemStatus};

/// Summary of one item found during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub item_id: u64,
    pub name: String,
    pub status: ItemStatus,
    pub manufacturer: Address,
    pub current_owner: Address,
}

impl From<&ItemRecord> for ItemSummary {
    fn from(record: &ItemRecord) -> Self {
        Self {
            item_id: record.item_id,
            name: record.name.clone(),
            status: record.status,
            manufacturer: record.manufacturer,
            current_owner: record.current_owner,
        }
    }
}

/// Per-status tally of scanned items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub created: u64,
    pub in_transit: u64,
    pub delivered: u64,
    pub rejected: u64,
    /// Items whose status code has no label.
    pub unknown: u64,
}

impl StatusCounts {
    pub fn record(&mut self, status: ItemStatus) {
        match status {
            ItemStatus::Created => self.created += 1,
            ItemStatus::InTransit => self.in_transit += 1,
            ItemStatus::Delivered => self.delivered += 1,
            ItemStatus::Rejected => self.rejected += 1,
            ItemStatus::Unknown(_) => self.unknown += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.created + self.in_transit + self.delivered + self.rejected + self.unknown
    }

    /// Items currently moving between custodians.
    pub fn active_shipments(&self) -> u64 {
        self.in_transit
    }
}

/// Non-fatal notes attached to a scan result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ScanAdvisory {
    /// The item at the probe bound exists or could not be read, so more
    /// items may lie beyond it and the counts are a lower bound.
    BoundExceeded { max_probe_id: u64 },
}

impl ScanAdvisory {
    pub fn code(&self) -> ErrorCode {
        match self {
            ScanAdvisory::BoundExceeded { .. } => ErrorCode::ScanBoundExceeded,
        }
    }
}

/// Result of a bounded directory scan.
///
/// `counts` covers every item found in `1..=probe_bound`, not the ledger's
/// true total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryScan {
    pub owned: Vec<ItemSummary>,
    pub counts: StatusCounts,
    pub probe_bound: u64,
    pub probed: u64,
    pub found: u64,
    /// Ids whose read failed and were treated as absent.
    pub skipped_on_error: Vec<u64>,
    pub advisory: Option<ScanAdvisory>,
}

impl InventoryScan {
    pub fn empty(probe_bound: u64) -> Self {
        Self {
            owned: Vec::new(),
            counts: StatusCounts::default(),
            probe_bound,
            probed: 0,
            found: 0,
            skipped_on_error: Vec::new(),
            advisory: None,
        }
    }

    /// True when the result may undercount the ledger.
    pub fn is_truncated(&self) -> bool {
        matches!(self.advisory, Some(ScanAdvisory::BoundExceeded { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_tally_every_status() {
        let mut counts = StatusCounts::default();
        counts.record(ItemStatus::Created);
        counts.record(ItemStatus::InTransit);
        counts.record(ItemStatus::InTransit);
        counts.record(ItemStatus::Unknown(7));

        assert_eq!(counts.created, 1);
        assert_eq!(counts.active_shipments(), 2);
        assert_eq!(counts.unknown, 1);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn empty_scan_is_not_truncated() {
        let scan = InventoryScan::empty(10);
        assert!(!scan.is_truncated());
        assert_eq!(scan.counts.total(), 0);
    }

    #[test]
    fn bound_advisory_has_code() {
        let advisory = ScanAdvisory::BoundExceeded { max_probe_id: 10 };
        assert_eq!(advisory.code(), ErrorCode::ScanBoundExceeded);
    }
}
