//! TransactionController - drives write operations through their lifecycle.
//!
//! Every write follows `Idle -> Submitted -> Pending -> Confirmed | Failed`.
//! The controller checks the session and role before anything is signed,
//! then hands out a [`TrackedTransaction`] that owns one independent state
//! machine. Failed operations are never resent; the caller starts a new
//! lifecycle if the user asks again.

use thiserror::Error;
use tokio::sync::watch;

use super::{LedgerClient, Session, SessionStore};
use crate::config::SessionConfig;
use crate::domain::foundation::{
    ClientHandleId, ErrorCode, TransitionError, TxReference, ValidationError,
};
use crate::domain::ledger::{LedgerCall, LedgerError, TxReceipt};
use crate::domain::roles::Role;
use crate::domain::transaction::{
    NoticeTone, OperationKind, StatusNotice, TransactionFailure, TransactionRecord,
    TransactionStatus,
};
use crate::ports::PendingTransaction;

/// Reasons a write is refused before its lifecycle starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreflightError {
    #[error("Connect a wallet first")]
    NotConnected,

    #[error("Role {role} may not perform {operation}")]
    Forbidden { role: Role, operation: OperationKind },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl PreflightError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PreflightError::NotConnected => ErrorCode::NotConnected,
            PreflightError::Forbidden { .. } => ErrorCode::Forbidden,
            PreflightError::Invalid(_) => ErrorCode::ValidationFailed,
        }
    }
}

/// Errors from stepping a tracked transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// The step is not valid from the current status.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// The write failed; the record is now `Failed`.
    #[error("Transaction failed: {}", .0.detail)]
    Failed(TransactionFailure),

    /// The session that prepared this transaction is gone.
    #[error("Wallet session changed; transaction is no longer tracked")]
    SessionReplaced,

    /// The session changed after the write was sent. Tracking stopped, but
    /// the transaction may still be mined.
    #[error("Wallet session changed while transaction was pending; it may still be confirmed")]
    Abandoned(Box<AbandonedTransaction>),
}

impl LifecycleError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LifecycleError::Transition(e) => e.code(),
            LifecycleError::Failed(failure) => {
                failure.code.unwrap_or(ErrorCode::RemoteWriteFailure)
            }
            LifecycleError::SessionReplaced | LifecycleError::Abandoned(_) => {
                ErrorCode::SessionReplaced
            }
        }
    }
}

/// Starts write lifecycles against the current session.
#[derive(Debug, Clone)]
pub struct TransactionController {
    store: SessionStore,
    enforce_roles: bool,
}

impl TransactionController {
    /// Creates a controller that enforces role gates.
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            enforce_roles: true,
        }
    }

    /// Creates a controller gated as `config.enforce_roles` says.
    pub fn from_config(store: SessionStore, config: &SessionConfig) -> Self {
        Self::new(store).with_role_enforcement(config.enforce_roles)
    }

    pub fn with_role_enforcement(mut self, enforce: bool) -> Self {
        self.enforce_roles = enforce;
        self
    }

    /// Checks session, role and inputs, then returns an `Idle` tracker.
    pub fn prepare(&self, call: LedgerCall) -> Result<TrackedTransaction, PreflightError> {
        let session = self.store.current();
        let Session::Connected(connected) = session.as_ref() else {
            return Err(PreflightError::NotConnected);
        };

        let operation = call.kind();
        if self.enforce_roles && !operation.is_allowed_for(connected.role) {
            tracing::debug!(role = %connected.role, %operation, "Write refused by role gate");
            return Err(PreflightError::Forbidden {
                role: connected.role,
                operation,
            });
        }

        call.validate()?;

        Ok(TrackedTransaction::new(
            call,
            connected.client.clone(),
            self.store.clone(),
        ))
    }

    /// Prepares and runs a write to completion.
    pub async fn execute(&self, call: LedgerCall) -> Result<TransactionRecord, LifecycleFailure> {
        let tracked = self.prepare(call)?;
        Ok(tracked.run().await?)
    }
}

/// Why [`TransactionController::execute`] produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleFailure {
    #[error(transparent)]
    Preflight(#[from] PreflightError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

/// One write operation and its state machine.
///
/// Independent of every other tracker: several may be pending at once and
/// the ledger decides their order.
pub struct TrackedTransaction {
    call: LedgerCall,
    client: LedgerClient,
    store: SessionStore,
    record: watch::Sender<TransactionRecord>,
    visited: Vec<TransactionStatus>,
    pending: Option<Box<dyn PendingTransaction>>,
}

impl TrackedTransaction {
    fn new(call: LedgerCall, client: LedgerClient, store: SessionStore) -> Self {
        let record = TransactionRecord::new(call.kind());
        let (record, _) = watch::channel(record);
        Self {
            call,
            client,
            store,
            record,
            visited: vec![TransactionStatus::Idle],
            pending: None,
        }
    }

    pub fn operation(&self) -> OperationKind {
        self.call.kind()
    }

    pub fn call(&self) -> &LedgerCall {
        &self.call
    }

    /// Snapshot of the record.
    pub fn record(&self) -> TransactionRecord {
        self.record.borrow().clone()
    }

    pub fn status(&self) -> TransactionStatus {
        self.record.borrow().status
    }

    /// Every status this transaction has been in, oldest first.
    pub fn visited(&self) -> &[TransactionStatus] {
        &self.visited
    }

    /// Receiver notified on every status change.
    pub fn subscribe(&self) -> watch::Receiver<TransactionRecord> {
        self.record.subscribe()
    }

    pub fn notice(&self) -> Option<StatusNotice> {
        self.record.borrow().notice()
    }

    /// Signs and sends the write. Returns the reference as soon as the
    /// network has accepted it, before it is mined.
    pub async fn submit(&mut self) -> Result<TxReference, LifecycleError> {
        if !self.session_is_current() {
            return Err(LifecycleError::SessionReplaced);
        }

        self.step(|record| record.mark_submitted())?;

        let pending = match self.client.submit(self.call.clone()).await {
            Ok(pending) => pending,
            Err(e) => return Err(self.fail(&e)),
        };

        let reference = pending.reference().clone();
        self.step(|record| record.mark_pending(reference.clone()))?;
        self.pending = Some(pending);

        tracing::info!(operation = %self.operation(), %reference, "Transaction pending");
        Ok(reference)
    }

    /// Waits until the pending transaction is mined or fails.
    ///
    /// Returns `SessionReplaced` if the wallet session changes while
    /// waiting. The record then stays `Pending`; see [`Self::abandon`].
    pub async fn confirm(&mut self) -> Result<TxReceipt, LifecycleError> {
        let status = self.status();
        let Some(pending) = self.pending.as_mut() else {
            return Err(LifecycleError::Transition(TransitionError {
                from: format!("{:?}", status),
                to: format!("{:?}", TransactionStatus::Confirmed),
            }));
        };

        let mut session = self.store.subscribe();
        let handle = self.client.handle_id();
        let outcome = tokio::select! {
            biased;
            _ = session_replaced(&mut session, handle) => None,
            outcome = pending.wait() => Some(outcome),
        };

        match outcome {
            Some(Ok(receipt)) => {
                self.pending = None;
                self.step(|record| record.mark_confirmed())?;
                tracing::info!(
                    operation = %self.operation(),
                    reference = %receipt.reference,
                    block = ?receipt.block_number,
                    "Transaction confirmed"
                );
                Ok(receipt)
            }
            Some(Err(e)) => {
                self.pending = None;
                Err(self.fail(&e))
            }
            None => Err(LifecycleError::SessionReplaced),
        }
    }

    /// Submits and confirms, returning the final record.
    ///
    /// Write failures end up in the record with status `Failed`; only a
    /// lifecycle that cannot proceed at all is an `Err`. A session change
    /// while pending abandons the transaction and returns it in
    /// [`LifecycleError::Abandoned`].
    pub async fn run(mut self) -> Result<TransactionRecord, LifecycleError> {
        match self.submit().await {
            Ok(_) => {}
            Err(LifecycleError::Failed(_)) => return Ok(self.record()),
            Err(e) => return Err(e),
        }
        match self.confirm().await {
            Ok(_) | Err(LifecycleError::Failed(_)) => Ok(self.record()),
            Err(LifecycleError::SessionReplaced) => {
                Err(LifecycleError::Abandoned(Box::new(self.abandon())))
            }
            Err(e) => Err(e),
        }
    }

    /// Stops tracking locally. A transaction already sent may still be
    /// mined; the returned notice says so.
    pub fn abandon(self) -> AbandonedTransaction {
        let record = self.record();
        let may_still_confirm = record.status == TransactionStatus::Pending;
        let notice = if may_still_confirm {
            tracing::warn!(
                operation = %record.operation_kind,
                reference = ?record.reference,
                "Pending transaction abandoned; it may still be confirmed"
            );
            StatusNotice {
                tone: NoticeTone::Warning,
                message: "Stopped tracking this transaction. It may still be confirmed on the ledger."
                    .to_string(),
            }
        } else {
            tracing::debug!(operation = %record.operation_kind, status = ?record.status, "Transaction abandoned");
            StatusNotice {
                tone: NoticeTone::Warning,
                message: "Stopped tracking this transaction.".to_string(),
            }
        };
        AbandonedTransaction {
            record,
            may_still_confirm,
            notice,
        }
    }

    fn session_is_current(&self) -> bool {
        self.store.current().client_handle() == Some(self.client.handle_id())
    }

    fn step(
        &mut self,
        change: impl FnOnce(&mut TransactionRecord) -> Result<(), TransitionError>,
    ) -> Result<(), TransitionError> {
        let mut result = Ok(());
        self.record.send_if_modified(|record| {
            result = change(record);
            result.is_ok()
        });
        result?;

        let status = self.status();
        tracing::debug!(operation = %self.operation(), ?status, "Transaction status changed");
        self.visited.push(status);
        Ok(())
    }

    fn fail(&mut self, error: &LedgerError) -> LifecycleError {
        let failure = TransactionFailure::from_ledger_error(error);
        if failure.is_revert() {
            tracing::warn!(
                operation = %self.operation(),
                code = %error.code(),
                "Transaction reverted, likely a contract precondition: {}",
                failure.detail
            );
        } else {
            tracing::error!(
                operation = %self.operation(),
                code = %error.code(),
                "Transaction failed: {}",
                failure.detail
            );
        }

        match self.step(|record| record.mark_failed(failure.clone())) {
            Ok(()) => LifecycleError::Failed(failure),
            Err(e) => LifecycleError::Transition(e),
        }
    }
}

impl std::fmt::Debug for TrackedTransaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackedTransaction")
            .field("record", &*self.record.borrow())
            .field("client", &self.client)
            .finish()
    }
}

/// Resolves once the store no longer holds the session with `handle`.
async fn session_replaced(
    session: &mut watch::Receiver<std::sync::Arc<Session>>,
    handle: ClientHandleId,
) {
    loop {
        if session.borrow_and_update().client_handle() != Some(handle) {
            return;
        }
        if session.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// A transaction the caller stopped waiting for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbandonedTransaction {
    pub record: TransactionRecord,
    /// True if it had reached the network and may still be mined.
    pub may_still_confirm: bool,
    pub notice: StatusNotice,
}
