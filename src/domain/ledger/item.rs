//! Item records and their history, as observed from the ledger.

use serde::{Deserialize, Serialize};

use super::ItemStatus;
use crate::domain::foundation::{Address, Timestamp};

/// Basic record of one item. Owned by the ledger; read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Raw id as returned by the ledger. Zero only in the not-found sentinel.
    pub item_id: u64,
    pub name: String,
    pub authenticity_hash: String,
    pub manufacturer: Address,
    pub current_owner: Address,
    pub status: ItemStatus,
}

impl ItemRecord {
    /// The zero-valued record the ledger returns for ids it never assigned.
    pub fn zeroed() -> Self {
        Self {
            item_id: 0,
            name: String::new(),
            authenticity_hash: String::new(),
            manufacturer: Address::ZERO,
            current_owner: Address::ZERO,
            status: ItemStatus::Created,
        }
    }

    /// True when this is the ledger's "no such item" sentinel.
    ///
    /// The check is `item_id == 0 && name == ""`. A real item at id 0 with
    /// an empty name would be misread as absent; the ledger never assigns
    /// id 0, so the ambiguity is accepted.
    pub fn is_not_found(&self) -> bool {
        self.item_id == 0 && self.name.is_empty()
    }

    pub fn is_owned_by(&self, account: &Address) -> bool {
        self.current_owner == *account
    }
}

/// One event in an item's append-only history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub action: String,
    /// Role label the ledger recorded for the actor.
    pub role: String,
    pub participant_address: Address,
    pub note: String,
    pub timestamp: Timestamp,
}

/// An item together with its full history, in ledger order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTrace {
    pub item: ItemRecord,
    pub history: Vec<HistoryEntry>,
}

/// Outcome of comparing a candidate hash against the recorded one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Authenticity {
    Authentic,
    NotAuthentic,
}

impl From<bool> for Authenticity {
    fn from(matches: bool) -> Self {
        if matches {
            Authenticity::Authentic
        } else {
            Authenticity::NotAuthentic
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_record_is_not_found() {
        assert!(ItemRecord::zeroed().is_not_found());
    }

    #[test]
    fn named_record_is_found_even_with_zero_id() {
        let record = ItemRecord {
            name: "Coffee".to_string(),
            ..ItemRecord::zeroed()
        };
        assert!(!record.is_not_found());
    }

    #[test]
    fn nonzero_id_is_found_even_with_empty_name() {
        let record = ItemRecord {
            item_id: 4,
            ..ItemRecord::zeroed()
        };
        assert!(!record.is_not_found());
    }

    #[test]
    fn ownership_compares_addresses() {
        let owner = Address::repeat_byte(0xaa);
        let record = ItemRecord {
            item_id: 1,
            name: "Tea".to_string(),
            current_owner: owner,
            ..ItemRecord::zeroed()
        };
        assert!(record.is_owned_by(&owner));
        assert!(!record.is_owned_by(&Address::repeat_byte(0xbb)));
    }
}
