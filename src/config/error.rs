//! Configuration error types

use thiserror::Error;

use crate::domain::roles::RoleDirectoryError;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Logging setup failed: {0}")]
    LoggingInit(String),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid contract address: {0}")]
    InvalidContractAddress(String),

    #[error("Invalid ledger gateway URL: {0}")]
    InvalidGatewayUrl(String),

    #[error("Invalid explorer URL: {0}")]
    InvalidExplorerUrl(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Scanner probe bound must be between 1 and {max}")]
    InvalidProbeBound { max: u64 },

    #[error("Invalid role directory: {0}")]
    InvalidRoleDirectory(#[from] RoleDirectoryError),

    #[error("Invalid log filter: {0}")]
    InvalidLogLevel(String),
}
