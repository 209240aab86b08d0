//! Wallet adapters.
//!
//! Implementations of the `WalletProvider` port:
//!
//! - `mock` - Test wallet backed by the in-memory ledger

mod mock;

pub use mock::MockWalletProvider;
