//! LedgerClient - typed facade over the ledger ports.
//!
//! The only component that issues remote calls. Reads work on any client;
//! writes need a signer, which only a connected session binds.

use std::fmt;
use std::sync::Arc;

use crate::domain::foundation::{Address, ClientHandleId, ItemId};
use crate::domain::ledger::{
    Authenticity, HistoryEntry, ItemRecord, ItemTrace, LedgerCall, LedgerError,
};
use crate::ports::{LedgerReader, LedgerWriter, PendingTransaction};

/// Handle to the ledger, optionally bound to a signing account.
///
/// Cloning shares the same handle identity. A new connect always mints a
/// new handle, so comparing [`LedgerClient::handle_id`] tells whether two
/// clients came from the same session.
#[derive(Clone)]
pub struct LedgerClient {
    handle_id: ClientHandleId,
    reader: Arc<dyn LedgerReader>,
    signer: Option<(Address, Arc<dyn LedgerWriter>)>,
}

impl LedgerClient {
    /// Client for reads only; every write fails with `SignerUnavailable`.
    pub fn read_only(reader: Arc<dyn LedgerReader>) -> Self {
        Self {
            handle_id: ClientHandleId::new(),
            reader,
            signer: None,
        }
    }

    /// Client whose writes are signed by `account`.
    pub fn with_signer(
        reader: Arc<dyn LedgerReader>,
        account: Address,
        writer: Arc<dyn LedgerWriter>,
    ) -> Self {
        Self {
            handle_id: ClientHandleId::new(),
            reader,
            signer: Some((account, writer)),
        }
    }

    pub fn handle_id(&self) -> ClientHandleId {
        self.handle_id
    }

    /// Account that signs writes, if any.
    pub fn signer_account(&self) -> Option<Address> {
        self.signer.as_ref().map(|(account, _)| *account)
    }

    // === Reads ===

    pub async fn verify_authenticity(
        &self,
        item_id: ItemId,
        candidate_hash: &str,
    ) -> Result<Authenticity, LedgerError> {
        let matches = self
            .reader
            .verify_authenticity(item_id, candidate_hash)
            .await?;
        Ok(Authenticity::from(matches))
    }

    /// Raw basic record, including the zero-valued not-found sentinel.
    pub async fn get_item_basic(&self, item_id: ItemId) -> Result<ItemRecord, LedgerError> {
        self.reader.get_item_basic(item_id).await
    }

    /// Basic record, with the not-found sentinel mapped to `None`.
    pub async fn find_item(&self, item_id: ItemId) -> Result<Option<ItemRecord>, LedgerError> {
        let record = self.reader.get_item_basic(item_id).await?;
        if record.is_not_found() {
            return Ok(None);
        }
        Ok(Some(record))
    }

    pub async fn get_item_history_count(&self, item_id: ItemId) -> Result<u64, LedgerError> {
        self.reader.get_item_history_count(item_id).await
    }

    pub async fn get_item_history_entry(
        &self,
        item_id: ItemId,
        index: u64,
    ) -> Result<HistoryEntry, LedgerError> {
        self.reader.get_item_history_entry(item_id, index).await
    }

    /// All history entries for an item, read one by one in ledger order.
    pub async fn item_history(&self, item_id: ItemId) -> Result<Vec<HistoryEntry>, LedgerError> {
        let count = self.reader.get_item_history_count(item_id).await?;
        let mut history = Vec::with_capacity(count.min(1024) as usize);
        for index in 0..count {
            history.push(self.reader.get_item_history_entry(item_id, index).await?);
        }
        Ok(history)
    }

    /// Item with its full history, or `None` if the ledger has no such item.
    pub async fn trace_item(&self, item_id: ItemId) -> Result<Option<ItemTrace>, LedgerError> {
        let Some(item) = self.find_item(item_id).await? else {
            tracing::debug!(%item_id, "Item not found on ledger");
            return Ok(None);
        };
        let history = self.item_history(item_id).await?;
        Ok(Some(ItemTrace { item, history }))
    }

    // === Writes ===

    pub async fn create_item(
        &self,
        name: &str,
        auth_hash: &str,
        note: &str,
    ) -> Result<Box<dyn PendingTransaction>, LedgerError> {
        self.submit(LedgerCall::create_item(name, auth_hash, note))
            .await
    }

    pub async fn transfer_item(
        &self,
        item_id: ItemId,
        to: Address,
        note: &str,
    ) -> Result<Box<dyn PendingTransaction>, LedgerError> {
        self.submit(LedgerCall::transfer_item(item_id, to, note)).await
    }

    pub async fn mark_in_transit(
        &self,
        item_id: ItemId,
        note: &str,
    ) -> Result<Box<dyn PendingTransaction>, LedgerError> {
        self.submit(LedgerCall::mark_in_transit(item_id, note)).await
    }

    pub async fn mark_rejected(
        &self,
        item_id: ItemId,
        note: &str,
    ) -> Result<Box<dyn PendingTransaction>, LedgerError> {
        self.submit(LedgerCall::mark_rejected(item_id, note)).await
    }

    pub async fn confirm_delivery(
        &self,
        item_id: ItemId,
        note: &str,
    ) -> Result<Box<dyn PendingTransaction>, LedgerError> {
        self.submit(LedgerCall::confirm_delivery(item_id, note)).await
    }

    /// Hands a write to the bound signer.
    pub async fn submit(&self, call: LedgerCall) -> Result<Box<dyn PendingTransaction>, LedgerError> {
        let (_, writer) = self.signer.as_ref().ok_or(LedgerError::SignerUnavailable)?;
        writer.submit(call).await
    }
}

impl fmt::Debug for LedgerClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedgerClient")
            .field("handle_id", &self.handle_id)
            .field("signer_account", &self.signer_account())
            .finish()
    }
}
