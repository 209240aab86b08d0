//! Error types shared across the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be at least {min}, got {actual}")]
    TooSmall { field: String, min: u64, actual: u64 },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates a lower-bound validation error.
    pub fn too_small(field: impl Into<String>, min: u64, actual: u64) -> Self {
        ValidationError::TooSmall {
            field: field.into(),
            min,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Rejects blank input for a required field.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(())
}

/// Error codes organized by category.
///
/// Every error family in the crate maps onto one of these so callers can
/// branch on a stable value instead of matching display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidStateTransition,

    // Wallet connection errors
    ProviderUnavailable,
    UserRejected,
    NoAccounts,
    ProviderError,
    SignerUnavailable,
    ConnectSuperseded,

    // Ledger errors
    SubmissionRejected,
    RemoteReadError,
    RemoteWriteFailure,

    // Scan advisories
    ScanBoundExceeded,

    // Authorization errors
    NotConnected,
    Forbidden,
    SessionReplaced,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::ProviderUnavailable => "PROVIDER_UNAVAILABLE",
            ErrorCode::UserRejected => "USER_REJECTED",
            ErrorCode::NoAccounts => "NO_ACCOUNTS",
            ErrorCode::ProviderError => "PROVIDER_ERROR",
            ErrorCode::SignerUnavailable => "SIGNER_UNAVAILABLE",
            ErrorCode::ConnectSuperseded => "CONNECT_SUPERSEDED",
            ErrorCode::SubmissionRejected => "SUBMISSION_REJECTED",
            ErrorCode::RemoteReadError => "REMOTE_READ_ERROR",
            ErrorCode::RemoteWriteFailure => "REMOTE_WRITE_FAILURE",
            ErrorCode::ScanBoundExceeded => "SCAN_BOUND_EXCEEDED",
            ErrorCode::NotConnected => "NOT_CONNECTED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::SessionReplaced => "SESSION_REPLACED",
        };
        write!(f, "{}", s)
    }
}
