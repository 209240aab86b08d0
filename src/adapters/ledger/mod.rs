//! Ledger adapters.
//!
//! Implementations of the ledger ports:
//!
//! - `in_memory` - Fixture ledger with contract-like preconditions, for tests
//! - `rpc_gateway` - Read-only JSON-RPC gateway over HTTP

mod in_memory;
mod rpc_gateway;

pub use in_memory::{InMemoryLedger, InMemoryLedgerWriter, InMemoryPendingTransaction};
pub use rpc_gateway::RpcGatewayLedger;
