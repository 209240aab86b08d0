//! Item status codes as stored by the ledger.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of an item, decoded from the ledger's numeric code.
///
/// The code-to-label mapping is fixed: 0=Created, 1=In Transit,
/// 2=Delivered, 3=Rejected. Any other code is kept verbatim as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Created,
    InTransit,
    Delivered,
    Rejected,
    Unknown(u8),
}

impl ItemStatus {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => ItemStatus::Created,
            1 => ItemStatus::InTransit,
            2 => ItemStatus::Delivered,
            3 => ItemStatus::Rejected,
            other => ItemStatus::Unknown(other),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            ItemStatus::Created => 0,
            ItemStatus::InTransit => 1,
            ItemStatus::Delivered => 2,
            ItemStatus::Rejected => 3,
            ItemStatus::Unknown(code) => *code,
        }
    }

    /// Display label for the status.
    pub fn label(&self) -> &'static str {
        match self {
            ItemStatus::Created => "Created",
            ItemStatus::InTransit => "In Transit",
            ItemStatus::Delivered => "Delivered",
            ItemStatus::Rejected => "Rejected",
            ItemStatus::Unknown(_) => "Unknown",
        }
    }
}

impl From<u8> for ItemStatus {
    fn from(code: u8) -> Self {
        ItemStatus::from_code(code)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_labels() {
        assert_eq!(ItemStatus::from_code(0).label(), "Created");
        assert_eq!(ItemStatus::from_code(1).label(), "In Transit");
        assert_eq!(ItemStatus::from_code(2).label(), "Delivered");
        assert_eq!(ItemStatus::from_code(3).label(), "Rejected");
    }

    #[test]
    fn unmapped_codes_render_unknown_and_keep_code() {
        let status = ItemStatus::from_code(9);
        assert_eq!(status, ItemStatus::Unknown(9));
        assert_eq!(status.label(), "Unknown");
        assert_eq!(status.code(), 9);
    }
}
