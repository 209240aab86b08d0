//! Ledger connection configuration

use std::time::Duration;

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::{Address, TxReference};

/// Where the provenance ledger lives and how to reach it
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Address of the provenance contract
    pub contract_address: String,

    /// JSON-RPC read gateway, used when no wallet is present
    pub gateway_url: Option<String>,

    /// Per-request timeout for gateway reads, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Block explorer prefix for transaction links
    #[serde(default = "default_explorer_tx_url")]
    pub explorer_tx_url: String,
}

impl LedgerConfig {
    /// Parsed contract address
    pub fn contract_address(&self) -> Result<Address, ValidationError> {
        self.contract_address
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidContractAddress(self.contract_address.clone()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Explorer link for a submitted transaction
    pub fn explorer_link(&self, reference: &TxReference) -> String {
        reference.explorer_url(&self.explorer_tx_url)
    }

    /// Validate ledger configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.contract_address.trim().is_empty() {
            return Err(ValidationError::MissingRequired("ledger.contract_address"));
        }
        self.contract_address()?;

        if let Some(url) = &self.gateway_url {
            if !is_http_url(url) {
                return Err(ValidationError::InvalidGatewayUrl(url.clone()));
            }
        }
        if !is_http_url(&self.explorer_tx_url) {
            return Err(ValidationError::InvalidExplorerUrl(self.explorer_tx_url.clone()));
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn is_http_url(input: &str) -> bool {
    reqwest::Url::parse(input)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

fn default_request_timeout() -> u64 {
    30
}

fn default_explorer_tx_url() -> String {
    "https://etherscan.io/tx/".to_string()
}
