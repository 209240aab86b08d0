//! State-changing ledger calls and their receipts.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{require_non_empty, Address, ItemId, TxReference, ValidationError};
use crate::domain::transaction::OperationKind;

/// A write operation against the ledger, with its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerCall {
    CreateItem {
        name: String,
        auth_hash: String,
        note: String,
    },
    TransferItem {
        item_id: ItemId,
        to: Address,
        note: String,
    },
    MarkInTransit {
        item_id: ItemId,
        note: String,
    },
    MarkRejected {
        item_id: ItemId,
        note: String,
    },
    ConfirmDelivery {
        item_id: ItemId,
        note: String,
    },
}

impl LedgerCall {
    pub fn create_item(
        name: impl Into<String>,
        auth_hash: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        LedgerCall::CreateItem {
            name: name.into(),
            auth_hash: auth_hash.into(),
            note: note.into(),
        }
    }

    pub fn transfer_item(item_id: ItemId, to: Address, note: impl Into<String>) -> Self {
        LedgerCall::TransferItem {
            item_id,
            to,
            note: note.into(),
        }
    }

    pub fn mark_in_transit(item_id: ItemId, note: impl Into<String>) -> Self {
        LedgerCall::MarkInTransit {
            item_id,
            note: note.into(),
        }
    }

    pub fn mark_rejected(item_id: ItemId, note: impl Into<String>) -> Self {
        LedgerCall::MarkRejected {
            item_id,
            note: note.into(),
        }
    }

    pub fn confirm_delivery(item_id: ItemId, note: impl Into<String>) -> Self {
        LedgerCall::ConfirmDelivery {
            item_id,
            note: note.into(),
        }
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            LedgerCall::CreateItem { .. } => OperationKind::Create,
            LedgerCall::TransferItem { .. } => OperationKind::Transfer,
            LedgerCall::MarkInTransit { .. } => OperationKind::MarkInTransit,
            LedgerCall::MarkRejected { .. } => OperationKind::MarkRejected,
            LedgerCall::ConfirmDelivery { .. } => OperationKind::ConfirmDelivery,
        }
    }

    /// The item this call acts on. `None` for creation.
    pub fn item_id(&self) -> Option<ItemId> {
        match self {
            LedgerCall::CreateItem { .. } => None,
            LedgerCall::TransferItem { item_id, .. }
            | LedgerCall::MarkInTransit { item_id, .. }
            | LedgerCall::MarkRejected { item_id, .. }
            | LedgerCall::ConfirmDelivery { item_id, .. } => Some(*item_id),
        }
    }

    pub fn note(&self) -> &str {
        match self {
            LedgerCall::CreateItem { note, .. }
            | LedgerCall::TransferItem { note, .. }
            | LedgerCall::MarkInTransit { note, .. }
            | LedgerCall::MarkRejected { note, .. }
            | LedgerCall::ConfirmDelivery { note, .. } => note,
        }
    }

    /// Checks that every required input is present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let LedgerCall::CreateItem {
            name, auth_hash, ..
        } = self
        {
            require_non_empty("name", name)?;
            require_non_empty("auth_hash", auth_hash)?;
        }
        if let LedgerCall::TransferItem { to, .. } = self {
            if *to == Address::ZERO {
                return Err(ValidationError::invalid_format(
                    "to",
                    "recipient cannot be the zero address",
                ));
            }
        }
        require_non_empty("note", self.note())
    }
}

/// Proof that a submitted transaction was included by the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub reference: TxReference,
    pub block_number: Option<u64>,
}
