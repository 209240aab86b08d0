//! Wallet connection errors.

use thiserror::Error;

use crate::domain::foundation::ErrorCode;

/// Errors raised while establishing a wallet session.
///
/// Any of these leaves the session store empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// No wallet provider is installed.
    #[error("No wallet provider found. Install a wallet extension.")]
    ProviderUnavailable,

    /// The user dismissed the account authorization request.
    #[error("User rejected the account authorization request")]
    UserRejected,

    /// Authorization succeeded but the wallet exposed no account.
    #[error("Wallet returned no authorized accounts")]
    NoAccounts,

    /// The provider failed for any other reason.
    #[error("Wallet provider error: {0}")]
    Provider(String),

    /// A signer could not be bound to the authorized account.
    #[error("Could not bind a signer: {0}")]
    SignerUnavailable(String),

    /// A newer connect or disconnect ran while this attempt was waiting.
    #[error("Connection attempt superseded by a newer connect or disconnect")]
    Superseded,
}

impl ConnectError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ConnectError::ProviderUnavailable => ErrorCode::ProviderUnavailable,
            ConnectError::UserRejected => ErrorCode::UserRejected,
            ConnectError::NoAccounts => ErrorCode::NoAccounts,
            ConnectError::Provider(_) => ErrorCode::ProviderError,
            ConnectError::SignerUnavailable(_) => ErrorCode::SignerUnavailable,
            ConnectError::Superseded => ErrorCode::ConnectSuperseded,
        }
    }
}
