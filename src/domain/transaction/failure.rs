//! Classification of failed write operations.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ErrorCode;
use crate::domain::ledger::LedgerError;

/// Advisory classification of a failure. Never affects control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
    /// The error text mentions a revert: most likely a contract
    /// precondition (ownership, status) did not hold.
    LikelyPreconditionViolation,
    Generic,
}

impl FailureClass {
    pub fn classify(message: &str) -> Self {
        if message.to_ascii_lowercase().contains("revert") {
            FailureClass::LikelyPreconditionViolation
        } else {
            FailureClass::Generic
        }
    }
}

/// Error detail kept on a failed transaction record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFailure {
    #[serde(skip)]
    pub code: Option<ErrorCode>,
    pub class: FailureClass,
    pub detail: String,
}

impl TransactionFailure {
    pub fn from_ledger_error(error: &LedgerError) -> Self {
        let detail = error.detail();
        Self {
            code: Some(error.code()),
            class: FailureClass::classify(&detail),
            detail,
        }
    }

    pub fn is_revert(&self) -> bool {
        self.class == FailureClass::LikelyPreconditionViolation
    }
}
