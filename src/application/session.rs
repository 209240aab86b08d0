//! Session - the atomic bundle of account, role and bound client.

use crate::domain::foundation::{Address, ClientHandleId, Timestamp};
use crate::domain::roles::Role;
use crate::domain::session::ConnectionStatus;

use super::LedgerClient;

/// Process-wide connection state.
///
/// Modelled as an enum so that `account`, `role` and `client` exist together
/// or not at all. A connected session is replaced wholesale, never edited.
#[derive(Debug, Clone, Default)]
pub enum Session {
    #[default]
    Disconnected,
    Connected(ConnectedSession),
}

/// State of a live wallet connection.
#[derive(Debug, Clone)]
pub struct ConnectedSession {
    pub account: Address,
    pub role: Role,
    pub client: LedgerClient,
    /// Network id reported by the wallet, if any.
    pub chain_id: Option<u64>,
    pub connected_at: Timestamp,
}

impl Session {
    pub fn status(&self) -> ConnectionStatus {
        match self {
            Session::Disconnected => ConnectionStatus::Disconnected,
            Session::Connected(_) => ConnectionStatus::Connected,
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Session::Connected(_))
    }

    pub fn account(&self) -> Option<Address> {
        self.connected().map(|s| s.account)
    }

    /// Role of the connected account; `Others` when disconnected.
    pub fn role(&self) -> Role {
        self.connected().map(|s| s.role).unwrap_or_default()
    }

    pub fn client(&self) -> Option<&LedgerClient> {
        self.connected().map(|s| &s.client)
    }

    pub fn client_handle(&self) -> Option<ClientHandleId> {
        self.client().map(LedgerClient::handle_id)
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.connected().and_then(|s| s.chain_id)
    }

    pub fn connected(&self) -> Option<&ConnectedSession> {
        match self {
            Session::Connected(session) => Some(session),
            Session::Disconnected => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapters::ledger::InMemoryLedger;

    #[test]
    fn disconnected_session_has_no_identity() {
        let session = Session::default();
        assert_eq!(session.status(), ConnectionStatus::Disconnected);
        assert_eq!(session.account(), None);
        assert_eq!(session.role(), Role::Others);
        assert!(session.client().is_none());
        assert_eq!(session.chain_id(), None);
    }

    #[test]
    fn connected_session_exposes_all_parts() {
        let account = Address::repeat_byte(0x42);
        let client = LedgerClient::read_only(Arc::new(InMemoryLedger::new()));
        let handle = client.handle_id();
        let session = Session::Connected(ConnectedSession {
            account,
            role: Role::Retailer,
            client,
            chain_id: Some(1),
            connected_at: Timestamp::now(),
        });

        assert!(session.is_connected());
        assert_eq!(session.account(), Some(account));
        assert_eq!(session.role(), Role::Retailer);
        assert_eq!(session.client_handle(), Some(handle));
        assert_eq!(session.chain_id(), Some(1));
    }
}
