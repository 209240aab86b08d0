//! Mock wallet provider for testing.
//!
//! Stands in for a browser wallet extension. Accounts, approval outcome and
//! network id are configurable, and account/network changes can be pushed
//! to subscribers the way a real wallet would.
//!
//! # Example
//!
//! ```ignore
//! let ledger = Arc::new(InMemoryLedger::new());
//! let wallet = MockWalletProvider::new(ledger.clone())
//!     .with_accounts(vec![alice])
//!     .with_chain_id(11155111);
//!
//! let accounts = wallet.request_accounts().await?;
//! wallet.emit_accounts_changed(vec![bob]);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tokio::sync::{broadcast, Notify};

use crate::adapters::ledger::InMemoryLedger;
use crate::domain::foundation::Address;
use crate::domain::session::ConnectError;
use crate::ports::{LedgerReader, LedgerWriter, WalletEvent, WalletProvider};

const EVENT_CAPACITY: usize = 16;

/// Mock wallet backed by an [`InMemoryLedger`].
pub struct MockWalletProvider {
    ledger: Arc<InMemoryLedger>,
    installed: bool,
    accounts: RwLock<Vec<Address>>,
    chain_id: RwLock<Option<u64>>,
    /// Error returned by `request_accounts`, e.g. a dismissed approval.
    approval_error: RwLock<Option<ConnectError>>,
    /// While set, each approval prompt stays open until notified.
    approval_gate: RwLock<Option<Arc<Notify>>>,
    open_prompts: AtomicUsize,
    events: broadcast::Sender<WalletEvent>,
}

impl MockWalletProvider {
    /// Creates an installed wallet with no accounts.
    pub fn new(ledger: Arc<InMemoryLedger>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            ledger,
            installed: true,
            accounts: RwLock::new(Vec::new()),
            chain_id: RwLock::new(None),
            approval_error: RwLock::new(None),
            approval_gate: RwLock::new(None),
            open_prompts: AtomicUsize::new(0),
            events,
        }
    }

    /// Simulates a browser with no wallet extension.
    pub fn not_installed(ledger: Arc<InMemoryLedger>) -> Self {
        Self {
            installed: false,
            ..Self::new(ledger)
        }
    }

    pub fn with_accounts(self, accounts: Vec<Address>) -> Self {
        *self.accounts.write().expect("MockWalletProvider: accounts lock poisoned") = accounts;
        self
    }

    pub fn with_chain_id(self, chain_id: u64) -> Self {
        *self.chain_id.write().expect("MockWalletProvider: chain lock poisoned") = Some(chain_id);
        self
    }

    /// Makes the approval prompt fail, as if the user dismissed it.
    pub fn rejecting_approval(self) -> Self {
        self.fail_approval(ConnectError::UserRejected);
        self
    }

    /// Forces `request_accounts` to return `error` until cleared.
    pub fn fail_approval(&self, error: ConnectError) {
        *self
            .approval_error
            .write()
            .expect("MockWalletProvider: approval lock poisoned") = Some(error);
    }

    pub fn clear_approval_error(&self) {
        *self
            .approval_error
            .write()
            .expect("MockWalletProvider: approval lock poisoned") = None;
    }

    /// Keeps every later approval prompt open until the returned gate is
    /// notified once per prompt.
    pub fn hold_approval(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self
            .approval_gate
            .write()
            .expect("MockWalletProvider: gate lock poisoned") = Some(gate.clone());
        gate
    }

    /// Number of approval prompts currently waiting on the gate.
    pub fn open_prompts(&self) -> usize {
        self.open_prompts.load(Ordering::SeqCst)
    }

    /// Switches accounts and notifies subscribers.
    pub fn emit_accounts_changed(&self, accounts: Vec<Address>) {
        *self.accounts.write().expect("MockWalletProvider: accounts lock poisoned") =
            accounts.clone();
        // No live subscribers is not an error for a wallet.
        let _ = self.events.send(WalletEvent::AccountsChanged(accounts));
    }

    /// Switches networks and notifies subscribers.
    pub fn emit_chain_changed(&self, chain_id: u64) {
        *self.chain_id.write().expect("MockWalletProvider: chain lock poisoned") = Some(chain_id);
        let _ = self.events.send(WalletEvent::ChainChanged(chain_id));
    }

    /// Number of live event subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.events.receiver_count()
    }

    pub fn ledger(&self) -> &Arc<InMemoryLedger> {
        &self.ledger
    }
}

#[async_trait]
impl WalletProvider for MockWalletProvider {
    fn is_installed(&self) -> bool {
        self.installed
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, ConnectError> {
        if !self.installed {
            return Err(ConnectError::ProviderUnavailable);
        }
        let gate = self
            .approval_gate
            .read()
            .expect("MockWalletProvider: gate lock poisoned")
            .clone();
        if let Some(gate) = gate {
            self.open_prompts.fetch_add(1, Ordering::SeqCst);
            gate.notified().await;
            self.open_prompts.fetch_sub(1, Ordering::SeqCst);
        }
        if let Some(error) = self
            .approval_error
            .read()
            .expect("MockWalletProvider: approval lock poisoned")
            .clone()
        {
            return Err(error);
        }
        Ok(self
            .accounts
            .read()
            .expect("MockWalletProvider: accounts lock poisoned")
            .clone())
    }

    async fn chain_id(&self) -> Result<Option<u64>, ConnectError> {
        Ok(*self.chain_id.read().expect("MockWalletProvider: chain lock poisoned"))
    }

    fn bind_signer(&self, account: Address) -> Result<Arc<dyn LedgerWriter>, ConnectError> {
        Ok(Arc::new(self.ledger.writer_for(account)))
    }

    fn ledger_reader(&self) -> Arc<dyn LedgerReader> {
        self.ledger.clone()
    }

    fn subscribe(&self) -> broadcast::Receiver<WalletEvent> {
        self.events.subscribe()
    }
}
