//! Transaction module - lifecycle of a single write operation.
//!
//! Holds the status state machine, operation kinds with their role gates and
//! messages, failure classification and the per-operation record.

mod failure;
mod operation;
mod record;
mod status;

pub use failure::{FailureClass, TransactionFailure};
pub use operation::{OperationKind, OperationMessages};
pub use record::{NoticeTone, StatusNotice, TransactionRecord};
pub use status::TransactionStatus;
