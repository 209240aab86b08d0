//! Application layer - session lifecycle and ledger interaction.
//!
//! Orchestrates the domain rules over the wallet and ledger ports. The
//! [`ChainLink`] is the only writer of the [`SessionStore`]; everything else
//! reads the current session from it.

mod chain_link;
mod directory_scanner;
mod ledger_client;
mod session;
mod session_store;
mod transaction_controller;

pub use chain_link::{ChainLink, ChainLinkOptions};
pub use directory_scanner::DirectoryScanner;
pub use ledger_client::LedgerClient;
pub use session::{ConnectedSession, Session};
pub use session_store::SessionStore;
pub use transaction_controller::{
    AbandonedTransaction, LifecycleError, LifecycleFailure, PreflightError, TrackedTransaction,
    TransactionController,
};
