//! Provenance client CLI.
//!
//! Runs one inventory scan over the configured read gateway and prints the
//! result as JSON.
//!
//! ```text
//! provenance-client [VIEWER_ADDRESS]
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use provenance_client::adapters::RpcGatewayLedger;
use provenance_client::application::{DirectoryScanner, LedgerClient};
use provenance_client::config::{AppConfig, ConfigError, ValidationError};
use provenance_client::domain::foundation::Address;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = config.logging.init_tracing() {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.validate().map_err(ConfigError::from)?;

    let viewer = match std::env::args().nth(1) {
        Some(raw) => Some(
            raw.trim()
                .parse::<Address>()
                .map_err(|e| format!("Invalid viewer address {:?}: {}", raw, e))?,
        ),
        None => None,
    };

    let gateway_url = config
        .ledger
        .gateway_url
        .clone()
        .ok_or(ValidationError::MissingRequired("ledger.gateway_url"))?;

    let contract = config.ledger.contract_address()?;
    tracing::info!(
        %contract,
        gateway = %gateway_url,
        max_probe_id = config.scanner.max_probe_id,
        "Starting inventory scan"
    );

    let reader = RpcGatewayLedger::new(gateway_url, config.ledger.request_timeout())?;
    let scanner = DirectoryScanner::new(LedgerClient::read_only(Arc::new(reader)));
    let scan = scanner
        .scan_inventory(config.scanner.max_probe_id, viewer.as_ref())
        .await;

    if let Some(advisory) = &scan.advisory {
        tracing::warn!(
            code = %advisory.code(),
            "Probe bound reached; raise scanner.max_probe_id for a complete view"
        );
    }

    println!("{}", serde_json::to_string_pretty(&scan)?);
    Ok(())
}
