//! Ledger module - the records, calls and errors of the provenance ledger.
//!
//! The ledger itself is a remote collaborator. These types describe what the
//! client observes and sends; they carry no storage or validation rules of
//! the contract.

mod call;
mod errors;
mod item;
mod status;

pub use call::{LedgerCall, TxReceipt};
pub use errors::LedgerError;
pub use item::{Authenticity, HistoryEntry, ItemRecord, ItemTrace};
pub use status::ItemStatus;
