//! Transaction record: the observable state of one write operation.

use serde::{Deserialize, Serialize};

use super::{OperationKind, TransactionFailure, TransactionStatus};
use crate::domain::foundation::{LifecycleId, StateMachine, Timestamp, TransitionError, TxReference};

/// One in-flight user action. Discarded once the caller has acknowledged
/// a terminal state; no history of past records is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: LifecycleId,
    pub operation_kind: OperationKind,
    pub status: TransactionStatus,
    pub reference: Option<TxReference>,
    pub error_detail: Option<TransactionFailure>,
    pub submitted_at: Option<Timestamp>,
    pub settled_at: Option<Timestamp>,
}

impl TransactionRecord {
    pub fn new(operation_kind: OperationKind) -> Self {
        Self {
            id: LifecycleId::new(),
            operation_kind,
            status: TransactionStatus::Idle,
            reference: None,
            error_detail: None,
            submitted_at: None,
            settled_at: None,
        }
    }

    pub fn mark_submitted(&mut self) -> Result<(), TransitionError> {
        self.status = self.status.transition_to(TransactionStatus::Submitted)?;
        self.submitted_at = Some(Timestamp::now());
        Ok(())
    }

    pub fn mark_pending(&mut self, reference: TxReference) -> Result<(), TransitionError> {
        self.status = self.status.transition_to(TransactionStatus::Pending)?;
        self.reference = Some(reference);
        Ok(())
    }

    pub fn mark_confirmed(&mut self) -> Result<(), TransitionError> {
        self.status = self.status.transition_to(TransactionStatus::Confirmed)?;
        self.settled_at = Some(Timestamp::now());
        Ok(())
    }

    pub fn mark_failed(&mut self, failure: TransactionFailure) -> Result<(), TransitionError> {
        self.status = self.status.transition_to(TransactionStatus::Failed)?;
        self.error_detail = Some(failure);
        self.settled_at = Some(Timestamp::now());
        Ok(())
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// What the user should currently be shown. `None` before submission.
    pub fn notice(&self) -> Option<StatusNotice> {
        let messages = self.operation_kind.messages();
        match self.status {
            TransactionStatus::Idle => None,
            TransactionStatus::Submitted => Some(StatusNotice {
                tone: NoticeTone::Info,
                message: "Waiting for wallet signature...".to_string(),
            }),
            TransactionStatus::Pending => Some(StatusNotice {
                tone: NoticeTone::Info,
                message: messages.sent.to_string(),
            }),
            TransactionStatus::Confirmed => Some(StatusNotice {
                tone: NoticeTone::Success,
                message: messages.confirmed.to_string(),
            }),
            TransactionStatus::Failed => {
                let reverted = self
                    .error_detail
                    .as_ref()
                    .map(TransactionFailure::is_revert)
                    .unwrap_or(false);
                Some(StatusNotice {
                    tone: NoticeTone::Error,
                    message: if reverted {
                        messages.reverted.to_string()
                    } else {
                        messages.failed.to_string()
                    },
                })
            }
        }
    }
}

/// Severity of a status notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeTone {
    Info,
    Success,
    Warning,
    Error,
}

/// User-facing status line for a tracked operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusNotice {
    pub tone: NoticeTone,
    pub message: String,
}
