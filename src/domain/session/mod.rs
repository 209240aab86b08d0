//! Session module - connection status and connect errors.
//!
//! The session value itself lives in the application layer because it
//! carries a bound ledger client.

mod errors;

pub use errors::ConnectError;

use serde::{Deserialize, Serialize};

/// Connection status exposed to observers of the session store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Disconnected,
    Connected,
}
