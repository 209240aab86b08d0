//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the provenance client.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{require_non_empty, ErrorCode, ValidationError};
pub use ids::{ClientHandleId, ItemId, LifecycleId, TxReference};
pub use state_machine::{StateMachine, TransitionError};
pub use timestamp::Timestamp;

/// Account and contract addresses. Equality is byte-wise, so any hex letter
/// case of the same address compares equal.
pub use alloy_primitives::Address;
