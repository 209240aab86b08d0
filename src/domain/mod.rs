//! Domain layer containing the provenance client's types and rules.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (identifiers, addresses, errors, state machine)
//! - `roles` - Participant roles and the static role directory
//! - `ledger` - Item records, history, write calls and ledger errors
//! - `transaction` - Lifecycle of a single write operation
//! - `session` - Connection status and connect errors
//! - `inventory` - Results of the bounded directory scan

pub mod foundation;
pub mod inventory;
pub mod ledger;
pub mod roles;
pub mod session;
pub mod transaction;
