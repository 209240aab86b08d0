//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the client core and the outside world. Adapters implement these ports.
//!
//! ## Ledger Ports
//!
//! - `LedgerReader` - Unsigned reads against the provenance contract
//! - `LedgerWriter` - Signer-bound writes returning a pending transaction
//! - `PendingTransaction` - Handle awaiting network inclusion
//!
//! ## Wallet Ports
//!
//! - `WalletProvider` - Account authorization, signer binding, change events

mod ledger;
mod wallet_provider;

pub use ledger::{LedgerReader, LedgerWriter, PendingTransaction};
pub use wallet_provider::{WalletEvent, WalletProvider};
