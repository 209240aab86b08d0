//! Write operation kinds, who may issue them, and what the user is told.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::roles::Role;

/// The five state-changing operations the ledger offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Create,
    Transfer,
    MarkInTransit,
    MarkRejected,
    ConfirmDelivery,
}

impl OperationKind {
    /// Roles allowed to start this operation from the client.
    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            OperationKind::Create => &[Role::Manufacturer],
            OperationKind::Transfer => &[Role::Supplier, Role::Distributor],
            OperationKind::MarkInTransit => &[Role::Supplier],
            OperationKind::MarkRejected => &[Role::Distributor],
            OperationKind::ConfirmDelivery => &[Role::Retailer],
        }
    }

    pub fn is_allowed_for(&self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }

    /// User-facing text for each lifecycle outcome.
    pub fn messages(&self) -> OperationMessages {
        match self {
            OperationKind::Create => OperationMessages {
                sent: "Transaction sent. Waiting for confirmation...",
                confirmed: "Item created successfully!",
                reverted: "Transaction failed (possible smart contract error).",
                failed: "Transaction failed. Check logs for details.",
            },
            OperationKind::Transfer => OperationMessages {
                sent: "Transfer transaction sent. Waiting for confirmation...",
                confirmed: "Item successfully transferred to new recipient!",
                reverted: "Transfer failed (Smart Contract Revert: Check item ownership/ID).",
                failed: "Transfer failed. Check logs for details.",
            },
            OperationKind::MarkInTransit => OperationMessages {
                sent: "In Transit transaction sent. Waiting for confirmation...",
                confirmed: "Item successfully marked as \"In Transit\"!",
                reverted: "In Transit failed (Smart Contract Revert: Check item status/ownership).",
                failed: "In Transit failed. Check logs for details.",
            },
            OperationKind::MarkRejected => OperationMessages {
                sent: "Rejection transaction sent. Waiting for confirmation...",
                confirmed: "Item successfully marked as \"Rejected\"!",
                reverted: "Rejection failed (Smart Contract Revert: Check item status/ownership).",
                failed: "Rejection failed. Check logs for details.",
            },
            OperationKind::ConfirmDelivery => OperationMessages {
                sent: "Transaction sent. Waiting for confirmation...",
                confirmed: "Item successfully delivered and added to inventory!",
                reverted: "Transaction failed (Smart Contract Revert: Item may not be \"In Transit\").",
                failed: "Transaction failed. Check logs for details.",
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Create => "create_item",
            OperationKind::Transfer => "transfer_item",
            OperationKind::MarkInTransit => "mark_in_transit",
            OperationKind::MarkRejected => "mark_rejected",
            OperationKind::ConfirmDelivery => "confirm_delivery",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status texts for one operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationMessages {
    pub sent: &'static str,
    pub confirmed: &'static str,
    pub reverted: &'static str,
    pub failed: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_manufacturer_creates() {
        for role in [Role::Supplier, Role::Distributor, Role::Retailer, Role::Others] {
            assert!(!OperationKind::Create.is_allowed_for(role));
        }
        assert!(OperationKind::Create.is_allowed_for(Role::Manufacturer));
    }

    #[test]
    fn transfer_is_shared_by_custodians() {
        assert!(OperationKind::Transfer.is_allowed_for(Role::Supplier));
        assert!(OperationKind::Transfer.is_allowed_for(Role::Distributor));
        assert!(!OperationKind::Transfer.is_allowed_for(Role::Retailer));
    }

    #[test]
    fn others_may_not_write_at_all() {
        for kind in [
            OperationKind::Create,
            OperationKind::Transfer,
            OperationKind::MarkInTransit,
            OperationKind::MarkRejected,
            OperationKind::ConfirmDelivery,
        ] {
            assert!(!kind.is_allowed_for(Role::Others), "{}", kind);
        }
    }

    #[test]
    fn transfer_messages_point_at_ownership() {
        let messages = OperationKind::Transfer.messages();
        assert!(messages.reverted.contains("ownership"));
        assert!(messages.sent.contains("Waiting for confirmation"));
    }
}
