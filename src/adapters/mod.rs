//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the client core to external systems:
//! - `ledger` - Ledger readers and writers (in-memory fixture, JSON-RPC gateway)
//! - `wallet` - Wallet providers (mock)

pub mod ledger;
pub mod wallet;

pub use ledger::{InMemoryLedger, RpcGatewayLedger};
pub use wallet::MockWalletProvider;
