//! SessionStore - single source of truth for the current session.
//!
//! Readers take snapshots or subscribe for change notifications. Only the
//! chain link writes, and every write swaps the whole session at once, so
//! an observer can never see an account paired with another session's role
//! or client.

use std::sync::Arc;

use tokio::sync::watch;

use super::Session;

/// Shared handle to the process-wide session.
///
/// Cloning is cheap and every clone observes the same state. Starts out
/// disconnected.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sender: Arc<watch::Sender<Arc<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Arc::new(Session::Disconnected));
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Snapshot of the current session.
    pub fn current(&self) -> Arc<Session> {
        self.sender.borrow().clone()
    }

    /// Receiver notified on every replacement. Dropping it unsubscribes.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Session>> {
        self.sender.subscribe()
    }

    /// Swaps in a new session, returning the previous one.
    pub(crate) fn replace(&self, session: Session) -> Arc<Session> {
        self.sender.send_replace(Arc::new(session))
    }

    /// Resets to the disconnected session.
    pub(crate) fn reset(&self) -> Arc<Session> {
        self.replace(Session::Disconnected)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
