//! Wallet provider port - the browser wallet extension seen from Rust.
//!
//! Covers account authorization, the network id, binding a signer to an
//! account, and the account/network change notifications the wallet pushes.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;

use super::{LedgerReader, LedgerWriter};
use crate::domain::foundation::Address;
use crate::domain::session::ConnectError;

/// Notifications pushed by the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletEvent {
    /// The active account set changed. Empty means the wallet locked or the
    /// user revoked access.
    AccountsChanged(Vec<Address>),
    /// The wallet switched networks.
    ChainChanged(u64),
}

/// Port for the installed wallet.
///
/// # Contract
///
/// Implementations must:
/// - Report `is_installed() == false` when no wallet is present
/// - Suspend in `request_accounts` until the user answers the approval
///   prompt; a dismissed prompt yields `ConnectError::UserRejected`
/// - Deliver every account and network change to all live subscribers
#[async_trait]
pub trait WalletProvider: Send + Sync {
    fn is_installed(&self) -> bool;

    /// Requests account authorization. The first account is the active one.
    async fn request_accounts(&self) -> Result<Vec<Address>, ConnectError>;

    /// Current network id, if the wallet reports one.
    async fn chain_id(&self) -> Result<Option<u64>, ConnectError>;

    /// Binds a signer for `account` to the ledger contract.
    fn bind_signer(&self, account: Address) -> Result<Arc<dyn LedgerWriter>, ConnectError>;

    /// Read access to the ledger through the wallet's node connection.
    fn ledger_reader(&self) -> Arc<dyn LedgerReader>;

    /// Registers for account and network change notifications.
    /// Dropping the receiver deregisters.
    fn subscribe(&self) -> broadcast::Receiver<WalletEvent>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_provider_object_safe(_: &dyn WalletProvider) {}

    #[test]
    fn wallet_provider_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<Arc<dyn WalletProvider>>();
    }

    #[test]
    fn events_compare_by_value() {
        let a = Address::repeat_byte(0x01);
        assert_eq!(
            WalletEvent::AccountsChanged(vec![a]),
            WalletEvent::AccountsChanged(vec![a])
        );
        assert_ne!(WalletEvent::ChainChanged(1), WalletEvent::ChainChanged(5));
    }
}
