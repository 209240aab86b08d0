//! Ledger ports - read and write access to the provenance contract.
//!
//! The contract is an opaque remote service. Reads need no signature and
//! can run without a connected wallet; writes go through a signer bound to
//! one account.
//!
//! # Enumeration
//!
//! The ledger exposes no count or enumeration call. Inventory views are
//! reconstructed by probing ids `1..=max_probe_id` with `get_item_basic`,
//! which undercounts whenever items exist past the bound. An adapter for a
//! ledger with an indexed query belongs behind a new port method, not
//! behind these.

use async_trait::async_trait;

use crate::domain::foundation::{ItemId, TxReference};
use crate::domain::ledger::{HistoryEntry, ItemRecord, LedgerCall, LedgerError, TxReceipt};

/// Read-only ledger calls.
///
/// # Contract
///
/// Implementations must:
/// - Return the zero-valued record (see [`ItemRecord::zeroed`]) for ids the
///   ledger never assigned, not an error
/// - Return `LedgerError::RemoteReadError` for transport failures and
///   malformed responses
/// - Return history entries in ledger order
#[async_trait]
pub trait LedgerReader: Send + Sync {
    /// Compares a candidate hash against the item's recorded hash.
    async fn verify_authenticity(
        &self,
        item_id: ItemId,
        candidate_hash: &str,
    ) -> Result<bool, LedgerError>;

    /// Basic record for an item, zero-valued if absent.
    async fn get_item_basic(&self, item_id: ItemId) -> Result<ItemRecord, LedgerError>;

    /// Number of history entries for an item.
    async fn get_item_history_count(&self, item_id: ItemId) -> Result<u64, LedgerError>;

    /// One history entry by position, `0..count`.
    async fn get_item_history_entry(
        &self,
        item_id: ItemId,
        index: u64,
    ) -> Result<HistoryEntry, LedgerError>;
}

/// Signer-bound ledger writes.
///
/// # Contract
///
/// - `submit` resolves once the network has accepted the signed transaction
///   into its pool, returning a handle carrying the transaction reference
/// - A user declining to sign yields `LedgerError::UserRejected`; any other
///   signer-side failure yields `LedgerError::SubmissionRejected`
/// - Implementations never retry or re-sign on their own
#[async_trait]
pub trait LedgerWriter: Send + Sync {
    async fn submit(&self, call: LedgerCall) -> Result<Box<dyn PendingTransaction>, LedgerError>;
}

/// A transaction accepted by the network but not yet included.
///
/// Dropping the handle stops waiting locally; it cannot retract the
/// transaction, which may still confirm.
#[async_trait]
pub trait PendingTransaction: Send + Sync {
    fn reference(&self) -> &TxReference;

    /// Waits for inclusion. Reverts and mining failures yield
    /// `LedgerError::RemoteWriteFailure`.
    async fn wait(&mut self) -> Result<TxReceipt, LedgerError>;
}
