//! ChainLink - wallet connection lifecycle.
//!
//! `connect` authorizes an account, binds a signer, resolves the role and
//! publishes the result to the [`SessionStore`] in one swap. While connected,
//! a listener task watches the wallet for account and network changes; any
//! change tears the session down and, if configured, connects again from
//! scratch. Nothing from the old session survives, including its client
//! handle and any transaction tracked against it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use futures::future::{BoxFuture, FutureExt};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use super::{ConnectedSession, LedgerClient, Session, SessionStore};
use crate::config::SessionConfig;
use crate::domain::foundation::Timestamp;
use crate::domain::roles::{resolve_role, RoleDirectory};
use crate::domain::session::ConnectError;
use crate::ports::{WalletEvent, WalletProvider};

/// Behaviour switches for [`ChainLink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainLinkOptions {
    /// Reconnect automatically after an account or network change.
    pub reconnect_on_change: bool,
}

impl Default for ChainLinkOptions {
    fn default() -> Self {
        Self {
            reconnect_on_change: true,
        }
    }
}

impl From<&SessionConfig> for ChainLinkOptions {
    fn from(config: &SessionConfig) -> Self {
        Self {
            reconnect_on_change: config.reconnect_on_change,
        }
    }
}

/// What ended the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
enum WalletChange {
    Event(WalletEvent),
    /// Notifications were dropped; treat as an unknown change.
    Missed(u64),
}

/// Change listener plus a counter bumped by every teardown. A connect
/// publishes only if the counter still matches the value it started with.
#[derive(Default)]
struct ListenerSlot {
    generation: u64,
    task: Option<JoinHandle<()>>,
}

/// Owns the wallet connection and is the only writer of the session store.
pub struct ChainLink {
    provider: Arc<dyn WalletProvider>,
    directory: Arc<RoleDirectory>,
    store: SessionStore,
    options: ChainLinkOptions,
    listener: Mutex<ListenerSlot>,
}

impl ChainLink {
    pub fn new(
        provider: Arc<dyn WalletProvider>,
        directory: Arc<RoleDirectory>,
        store: SessionStore,
        options: ChainLinkOptions,
    ) -> Arc<Self> {
        Arc::new(Self {
            provider,
            directory,
            store,
            options,
            listener: Mutex::new(ListenerSlot::default()),
        })
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn directory(&self) -> &RoleDirectory {
        &self.directory
    }

    /// Establishes a fresh session.
    ///
    /// Any existing session is torn down first. On failure the store is
    /// left disconnected; no partial session is ever published. If another
    /// connect or a disconnect runs while this one waits on the wallet, this
    /// one returns [`ConnectError::Superseded`] and publishes nothing.
    pub async fn connect(self: &Arc<Self>) -> Result<ConnectedSession, ConnectError> {
        let generation = self.teardown();

        // Subscribe before asking for accounts so that a change made during
        // the approval prompt is not lost.
        let events = self.provider.subscribe();

        let session = match self.establish().await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(code = %e.code(), "Wallet connection failed: {}", e);
                return Err(e);
            }
        };

        {
            let mut slot = self.lock_listener();
            if slot.generation != generation {
                tracing::info!(account = %session.account, "Connection superseded, discarding it");
                return Err(ConnectError::Superseded);
            }
            self.store.replace(Session::Connected(session.clone()));
            slot.task = Some(self.spawn_listener(events));
        }

        tracing::info!(
            account = %session.account,
            role = %session.role,
            chain_id = ?session.chain_id,
            handle = %session.client.handle_id(),
            "Wallet connected"
        );
        Ok(session)
    }

    /// Ends the session and drops the wallet subscriptions.
    pub fn disconnect(&self) {
        let was_connected = self.store.current().is_connected();
        self.teardown();
        if was_connected {
            tracing::info!("Wallet disconnected");
        }
    }

    /// True while a change listener is registered.
    pub fn is_listening(&self) -> bool {
        self.lock_listener()
            .task
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    async fn establish(&self) -> Result<ConnectedSession, ConnectError> {
        if !self.provider.is_installed() {
            return Err(ConnectError::ProviderUnavailable);
        }

        let accounts = self.provider.request_accounts().await?;
        let account = accounts.first().copied().ok_or(ConnectError::NoAccounts)?;

        let chain_id = match self.provider.chain_id().await {
            Ok(chain_id) => chain_id,
            Err(e) => {
                tracing::warn!("Wallet did not report a network id: {}", e);
                None
            }
        };

        let writer = self.provider.bind_signer(account)?;
        let client = LedgerClient::with_signer(self.provider.ledger_reader(), account, writer);
        let role = resolve_role(&self.directory, &account);

        Ok(ConnectedSession {
            account,
            role,
            client,
            chain_id,
            connected_at: Timestamp::now(),
        })
    }

    /// Stops the listener, invalidates in-flight connects and resets the
    /// store. Returns the new generation.
    fn teardown(&self) -> u64 {
        let generation = {
            let mut slot = self.lock_listener();
            slot.generation += 1;
            if let Some(handle) = slot.task.take() {
                handle.abort();
            }
            slot.generation
        };
        self.store.reset();
        generation
    }

    /// Like `teardown`, for use from inside the listener task itself.
    fn detach(&self) {
        {
            let mut slot = self.lock_listener();
            slot.generation += 1;
            drop(slot.task.take());
        }
        self.store.reset();
    }

    fn lock_listener(&self) -> MutexGuard<'_, ListenerSlot> {
        self.listener.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Waits for the first wallet change, then hands over to `reload`.
    /// Holds only a weak reference so a dropped link ends the task.
    fn spawn_listener(self: &Arc<Self>, mut events: broadcast::Receiver<WalletEvent>) -> JoinHandle<()> {
        let link: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            let change = match events.recv().await {
                Ok(event) => WalletChange::Event(event),
                Err(RecvError::Lagged(skipped)) => WalletChange::Missed(skipped),
                Err(RecvError::Closed) => {
                    tracing::debug!("Wallet event stream closed");
                    return;
                }
            };
            drop(events);
            if let Some(link) = link.upgrade() {
                link.reload(change).await;
            }
        })
    }

    fn reload(self: Arc<Self>, change: WalletChange) -> BoxFuture<'static, ()> {
        async move {
            tracing::info!(?change, "Wallet changed, discarding session");

            self.detach();

            if !self.options.reconnect_on_change {
                return;
            }
            if let WalletChange::Event(WalletEvent::AccountsChanged(accounts)) = &change {
                if accounts.is_empty() {
                    tracing::info!("Wallet exposes no accounts, staying disconnected");
                    return;
                }
            }

            match self.connect().await {
                Ok(_) | Err(ConnectError::Superseded) => {}
                Err(e) => tracing::warn!("Reconnect after wallet change failed: {}", e),
            }
        }
        .boxed()
    }
}

impl Drop for ChainLink {
    fn drop(&mut self) {
        let slot = self.listener.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = slot.task.take() {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for ChainLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainLink")
            .field("options", &self.options)
            .field("directory_entries", &self.directory.len())
            .finish()
    }
}
