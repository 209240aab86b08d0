//! In-memory ledger for testing.
//!
//! Behaves like the provenance contract closely enough for client tests:
//! dense ids from 1, zero-valued records for unknown ids, append-only
//! history, and reverts when ownership or status preconditions fail.
//!
//! # Security Note
//!
//! This adapter is for **testing only**. It uses `.expect()` on lock
//! operations which will panic if locks are poisoned.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::foundation::{Address, ItemId, Timestamp, TxReference};
use crate::domain::ledger::{HistoryEntry, ItemRecord, ItemStatus, LedgerCall, LedgerError, TxReceipt};
use crate::domain::roles::RoleDirectory;
use crate::ports::{LedgerReader, LedgerWriter, PendingTransaction};

const STALL_POLL: Duration = Duration::from_millis(5);

struct StoredItem {
    record: ItemRecord,
    history: Vec<HistoryEntry>,
}

#[derive(Default)]
struct Faults {
    decline_signatures: bool,
    next_submission_failure: Option<String>,
    next_revert: Option<String>,
    stall_mining: bool,
    unreadable: HashSet<u64>,
}

/// In-memory provenance ledger.
///
/// # Example
///
/// ```ignore
/// let ledger = Arc::new(InMemoryLedger::new());
/// let id = ledger.seed_item("Coffee", "hash", maker, owner, ItemStatus::Created);
///
/// let record = ledger.get_item_basic(ItemId::new(id)?).await?;
/// assert_eq!(record.name, "Coffee");
/// ```
pub struct InMemoryLedger {
    items: RwLock<Vec<StoredItem>>,
    faults: Mutex<Faults>,
    directory: RoleDirectory,
    next_reference: AtomicU64,
    next_block: AtomicU64,
    reads: AtomicU64,
}

impl InMemoryLedger {
    /// Creates an empty ledger. History role labels will all read `Others`.
    pub fn new() -> Self {
        Self::with_directory(RoleDirectory::new())
    }

    /// Creates an empty ledger that labels history entries using `directory`.
    pub fn with_directory(directory: RoleDirectory) -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            faults: Mutex::new(Faults::default()),
            directory,
            next_reference: AtomicU64::new(1),
            next_block: AtomicU64::new(1),
            reads: AtomicU64::new(0),
        }
    }

    /// Returns a signer bound to `account`.
    pub fn writer_for(self: &Arc<Self>, account: Address) -> InMemoryLedgerWriter {
        InMemoryLedgerWriter {
            ledger: Arc::clone(self),
            account,
        }
    }

    // === Test Helpers ===

    /// Inserts an item directly, bypassing signing. Returns its id.
    pub fn seed_item(
        &self,
        name: &str,
        auth_hash: &str,
        manufacturer: Address,
        owner: Address,
        status: ItemStatus,
    ) -> u64 {
        let mut items = self.items.write().expect("InMemoryLedger: items lock poisoned");
        let item_id = items.len() as u64 + 1;
        items.push(StoredItem {
            record: ItemRecord {
                item_id,
                name: name.to_string(),
                authenticity_hash: auth_hash.to_string(),
                manufacturer,
                current_owner: owner,
                status,
            },
            history: vec![self.entry("Created", manufacturer, "seeded")],
        });
        item_id
    }

    /// Current record for an item, if it exists.
    pub fn item(&self, item_id: u64) -> Option<ItemRecord> {
        let items = self.items.read().expect("InMemoryLedger: items lock poisoned");
        index_of(item_id)
            .and_then(|i| items.get(i))
            .map(|stored| stored.record.clone())
    }

    pub fn item_count(&self) -> usize {
        self.items.read().expect("InMemoryLedger: items lock poisoned").len()
    }

    /// Makes every read of `item_id` fail with `RemoteReadError`.
    pub fn fail_reads_for(&self, item_id: u64) {
        self.faults().unreadable.insert(item_id);
    }

    /// Makes every signer decline, as if the user dismissed the prompt.
    pub fn decline_signatures(&self, decline: bool) {
        self.faults().decline_signatures = decline;
    }

    /// Fails the next submission before it reaches the network.
    pub fn fail_next_submission(&self, message: impl Into<String>) {
        self.faults().next_submission_failure = Some(message.into());
    }

    /// Reverts the next submitted transaction when it is mined.
    pub fn revert_next(&self, reason: impl Into<String>) {
        self.faults().next_revert = Some(reason.into());
    }

    /// Keeps submitted transactions pending until turned off.
    pub fn stall_mining(&self, stall: bool) {
        self.faults().stall_mining = stall;
    }

    /// Number of transactions accepted by signers so far.
    pub fn submission_count(&self) -> u64 {
        self.next_reference.load(Ordering::SeqCst) - 1
    }

    /// Number of read calls served so far.
    pub fn read_count(&self) -> u64 {
        self.reads.load(Ordering::SeqCst)
    }

    fn faults(&self) -> std::sync::MutexGuard<'_, Faults> {
        self.faults.lock().expect("InMemoryLedger: faults lock poisoned")
    }

    fn entry(&self, action: &str, participant: Address, note: &str) -> HistoryEntry {
        HistoryEntry {
            action: action.to_string(),
            role: self.directory.resolve(&participant).to_string(),
            participant_address: participant,
            note: note.to_string(),
            timestamp: Timestamp::now(),
        }
    }

    fn check_readable(&self, item_id: ItemId) -> Result<(), LedgerError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.faults().unreadable.contains(&item_id.value()) {
            return Err(LedgerError::RemoteReadError(format!(
                "simulated read failure for item {}",
                item_id
            )));
        }
        Ok(())
    }

    /// Executes a call as the contract would. `Err` carries the revert reason.
    fn apply(&self, sender: Address, call: &LedgerCall) -> Result<(), String> {
        let mut items = self.items.write().expect("InMemoryLedger: items lock poisoned");

        if let LedgerCall::CreateItem {
            name,
            auth_hash,
            note,
        } = call
        {
            let item_id = items.len() as u64 + 1;
            items.push(StoredItem {
                record: ItemRecord {
                    item_id,
                    name: name.clone(),
                    authenticity_hash: auth_hash.clone(),
                    manufacturer: sender,
                    current_owner: sender,
                    status: ItemStatus::Created,
                },
                history: vec![self.entry("Created", sender, note)],
            });
            return Ok(());
        }

        let item_id = call.item_id().map(|id| id.value()).unwrap_or(0);
        let stored = index_of(item_id)
            .and_then(|i| items.get_mut(i))
            .ok_or_else(|| "item does not exist".to_string())?;

        if stored.record.current_owner != sender {
            return Err("caller is not the current owner".to_string());
        }

        let status = stored.record.status;
        let action = match call {
            LedgerCall::TransferItem { to, .. } => {
                stored.record.current_owner = *to;
                "Transferred"
            }
            LedgerCall::MarkInTransit { .. } => {
                if matches!(status, ItemStatus::Delivered | ItemStatus::Rejected) {
                    return Err("item already settled".to_string());
                }
                stored.record.status = ItemStatus::InTransit;
                "In Transit"
            }
            LedgerCall::MarkRejected { .. } => {
                if matches!(status, ItemStatus::Delivered | ItemStatus::Rejected) {
                    return Err("item already settled".to_string());
                }
                stored.record.status = ItemStatus::Rejected;
                "Rejected"
            }
            LedgerCall::ConfirmDelivery { .. } => {
                if status != ItemStatus::InTransit {
                    return Err("item is not in transit".to_string());
                }
                stored.record.status = ItemStatus::Delivered;
                "Delivered"
            }
            LedgerCall::CreateItem { .. } => {
                return Err("create cannot target an existing item".to_string())
            }
        };

        let entry = self.entry(action, sender, call.note());
        stored.history.push(entry);
        Ok(())
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

fn index_of(item_id: u64) -> Option<usize> {
    item_id.checked_sub(1).map(|i| i as usize)
}

#[async_trait]
impl LedgerReader for InMemoryLedger {
    async fn verify_authenticity(
        &self,
        item_id: ItemId,
        candidate_hash: &str,
    ) -> Result<bool, LedgerError> {
        let record = self.get_item_basic(item_id).await?;
        Ok(!record.is_not_found() && record.authenticity_hash == candidate_hash)
    }

    async fn get_item_basic(&self, item_id: ItemId) -> Result<ItemRecord, LedgerError> {
        self.check_readable(item_id)?;
        Ok(self.item(item_id.value()).unwrap_or_else(ItemRecord::zeroed))
    }

    async fn get_item_history_count(&self, item_id: ItemId) -> Result<u64, LedgerError> {
        self.check_readable(item_id)?;
        let items = self.items.read().expect("InMemoryLedger: items lock poisoned");
        Ok(index_of(item_id.value())
            .and_then(|i| items.get(i))
            .map(|stored| stored.history.len() as u64)
            .unwrap_or(0))
    }

    async fn get_item_history_entry(
        &self,
        item_id: ItemId,
        index: u64,
    ) -> Result<HistoryEntry, LedgerError> {
        self.check_readable(item_id)?;
        let items = self.items.read().expect("InMemoryLedger: items lock poisoned");
        index_of(item_id.value())
            .and_then(|i| items.get(i))
            .and_then(|stored| stored.history.get(index as usize))
            .cloned()
            .ok_or_else(|| {
                LedgerError::RemoteReadError(format!(
                    "execution reverted: no history entry {} for item {}",
                    index, item_id
                ))
            })
    }
}

/// Signer bound to one account of an [`InMemoryLedger`].
pub struct InMemoryLedgerWriter {
    ledger: Arc<InMemoryLedger>,
    account: Address,
}

impl InMemoryLedgerWriter {
    pub fn account(&self) -> Address {
        self.account
    }
}

#[async_trait]
impl LedgerWriter for InMemoryLedgerWriter {
    async fn submit(&self, call: LedgerCall) -> Result<Box<dyn PendingTransaction>, LedgerError> {
        let forced_revert = {
            let mut faults = self.ledger.faults();
            if faults.decline_signatures {
                return Err(LedgerError::UserRejected);
            }
            if let Some(message) = faults.next_submission_failure.take() {
                return Err(LedgerError::SubmissionRejected(message));
            }
            faults.next_revert.take()
        };

        let n = self.ledger.next_reference.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(InMemoryPendingTransaction {
            ledger: Arc::clone(&self.ledger),
            sender: self.account,
            call,
            reference: TxReference::new(format!("0x{:064x}", n)),
            forced_revert,
            outcome: None,
        }))
    }
}

/// Pending transaction against an [`InMemoryLedger`]. The call takes effect
/// when `wait` is first awaited, which stands in for mining.
pub struct InMemoryPendingTransaction {
    ledger: Arc<InMemoryLedger>,
    sender: Address,
    call: LedgerCall,
    reference: TxReference,
    forced_revert: Option<String>,
    outcome: Option<Result<TxReceipt, LedgerError>>,
}

#[async_trait]
impl PendingTransaction for InMemoryPendingTransaction {
    fn reference(&self) -> &TxReference {
        &self.reference
    }

    async fn wait(&mut self) -> Result<TxReceipt, LedgerError> {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }
        while self.ledger.faults().stall_mining {
            tokio::time::sleep(STALL_POLL).await;
        }

        let result = match self.forced_revert.take() {
            Some(reason) => Err(reason),
            None => self.ledger.apply(self.sender, &self.call),
        };
        let outcome = result
            .map(|()| TxReceipt {
                reference: self.reference.clone(),
                block_number: Some(self.ledger.next_block.fetch_add(1, Ordering::SeqCst)),
            })
            .map_err(|reason| {
                LedgerError::RemoteWriteFailure(format!("execution reverted: {}", reason))
            });

        self.outcome = Some(outcome.clone());
        outcome
    }
}
