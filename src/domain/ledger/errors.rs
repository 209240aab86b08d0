//! Ledger interaction errors.

use thiserror::Error;

use crate::domain::foundation::ErrorCode;

/// Errors raised by ledger reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The user declined to sign in the wallet.
    #[error("User rejected the signature request")]
    UserRejected,

    /// The signer failed before the network ever saw the transaction.
    #[error("Submission rejected: {0}")]
    SubmissionRejected(String),

    /// RPC failure or malformed response on a read.
    #[error("Remote read failed: {0}")]
    RemoteReadError(String),

    /// The network reverted or failed to include the transaction.
    #[error("Remote write failed: {0}")]
    RemoteWriteFailure(String),

    /// A write was attempted on a client with no bound signer.
    #[error("No signer is bound to this client")]
    SignerUnavailable,
}

impl LedgerError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LedgerError::UserRejected => ErrorCode::UserRejected,
            LedgerError::SubmissionRejected(_) => ErrorCode::SubmissionRejected,
            LedgerError::RemoteReadError(_) => ErrorCode::RemoteReadError,
            LedgerError::RemoteWriteFailure(_) => ErrorCode::RemoteWriteFailure,
            LedgerError::SignerUnavailable => ErrorCode::SignerUnavailable,
        }
    }

    /// Raw message text, used for revert classification.
    pub fn detail(&self) -> String {
        match self {
            LedgerError::SubmissionRejected(msg)
            | LedgerError::RemoteReadError(msg)
            | LedgerError::RemoteWriteFailure(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}
