//! Provenance Client - wallet sessions and ledger interaction for a
//! goods-provenance contract.
//!
//! Connects a wallet, derives the participant role of the active account,
//! drives every write through a submit/pending/confirmed lifecycle and
//! rebuilds inventory views by probing the ledger.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
