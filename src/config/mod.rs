//! Application configuration module
//!
//! Type-safe configuration loaded with the `config` and `dotenvy` crates.
//! Values come from an optional `provenance.toml` file, overridden by
//! environment variables with the `PROVENANCE` prefix; nested values use
//! `__` as separator.
//!
//! # Example
//!
//! ```no_run
//! use provenance_client::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Scanning up to item {}", config.scanner.max_probe_id);
//! ```

mod error;
mod ledger;
mod logging;
mod roles;
mod scanner;
mod session;

pub use error::{ConfigError, ValidationError};
pub use ledger::LedgerConfig;
pub use logging::LoggingConfig;
pub use roles::RolesConfig;
pub use scanner::{ScannerConfig, MAX_PROBE_LIMIT};
pub use session::SessionConfig;

use std::path::Path;

use serde::Deserialize;

use crate::domain::roles::RoleDirectory;

const ENV_PREFIX: &str = "PROVENANCE";
const DEFAULT_CONFIG_FILE: &str = "provenance.toml";
const ROLE_LIST_KEYS: [&str; 4] = [
    "roles.manufacturer",
    "roles.supplier",
    "roles.distributor",
    "roles.retailer",
];

/// Root application configuration
///
/// Load using [`AppConfig::load()`], then call [`AppConfig::validate()`]
/// before handing sections to the components.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Ledger contract and read gateway
    pub ledger: LedgerConfig,

    /// Static role directory
    #[serde(default)]
    pub roles: RolesConfig,

    /// Inventory scan bounds
    #[serde(default)]
    pub scanner: ScannerConfig,

    /// Session behaviour
    #[serde(default)]
    pub session: SessionConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `provenance.toml` (if present) and the
    /// environment
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads `provenance.toml` from the working directory if it exists
    /// 3. Reads environment variables with `PROVENANCE` prefix
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PROVENANCE__LEDGER__CONTRACT_ADDRESS=0x...` -> `ledger.contract_address`
    /// - `PROVENANCE__SCANNER__MAX_PROBE_ID=100` -> `scanner.max_probe_id = 100`
    /// - `PROVENANCE__ROLES__SUPPLIER=0xa...,0xb...` -> `roles.supplier = [..]`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required values are missing or cannot be
    /// parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Like [`AppConfig::load`], but reads the given file, which must exist.
    pub fn load_from(file: Option<&Path>) -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let file_source = match file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let mut environment = config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .list_separator(",")
            .try_parsing(true);
        for key in ROLE_LIST_KEYS {
            environment = environment.with_list_parse_key(key);
        }

        let config = config::Config::builder()
            .add_source(file_source)
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ledger.validate()?;
        self.roles.validate()?;
        self.scanner.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Role directory built from the `roles` section
    pub fn role_directory(&self) -> Result<RoleDirectory, ValidationError> {
        self.roles.role_directory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    use crate::domain::foundation::Address;
    use crate::domain::roles::Role;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

    fn set_minimal_env() {
        env::set_var("PROVENANCE__LEDGER__CONTRACT_ADDRESS", CONTRACT);
    }

    fn clear_env() {
        env::remove_var("PROVENANCE__LEDGER__CONTRACT_ADDRESS");
        env::remove_var("PROVENANCE__LEDGER__GATEWAY_URL");
        env::remove_var("PROVENANCE__SCANNER__MAX_PROBE_ID");
        env::remove_var("PROVENANCE__SESSION__ENFORCE_ROLES");
        env::remove_var("PROVENANCE__ROLES__SUPPLIER");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("PROVENANCE__LEDGER__GATEWAY_URL", "http://localhost:8545");
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("config should load");
        assert_eq!(config.ledger.contract_address, CONTRACT);
        assert_eq!(config.ledger.gateway_url.as_deref(), Some("http://localhost:8545"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_apply() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ledger.request_timeout_secs, 30);
        assert_eq!(config.ledger.explorer_tx_url, "https://etherscan.io/tx/");
        assert_eq!(config.scanner.max_probe_id, 50);
        assert!(config.session.reconnect_on_change);
        assert!(config.session.enforce_roles);
        assert!(!config.logging.json);
        assert!(config.role_directory().unwrap().is_empty());
    }

    #[test]
    fn test_missing_contract_address_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("PROVENANCE__SCANNER__MAX_PROBE_ID", "120");
        env::set_var("PROVENANCE__SESSION__ENFORCE_ROLES", "false");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.scanner.max_probe_id, 120);
        assert!(!config.session.enforce_roles);
    }

    #[test]
    fn test_role_lists_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var(
            "PROVENANCE__ROLES__SUPPLIER",
            "0x1111111111111111111111111111111111111111,0x2222222222222222222222222222222222222222",
        );
        let result = AppConfig::load();
        clear_env();

        let directory = result.unwrap().role_directory().unwrap();
        assert_eq!(directory.addresses_for(Role::Supplier).len(), 2);
    }

    #[test]
    fn test_load_from_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[ledger]
contract_address = "{CONTRACT}"
explorer_tx_url = "https://sepolia.etherscan.io/tx/"

[roles]
manufacturer = ["0x1111111111111111111111111111111111111111"]
retailer = ["0x4444444444444444444444444444444444444444"]

[scanner]
max_probe_id = 25
"#
        )
        .unwrap();

        let config = AppConfig::load_from(Some(file.path())).unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.scanner.max_probe_id, 25);
        let directory = config.role_directory().unwrap();
        assert_eq!(directory.resolve(&Address::repeat_byte(0x44)), Role::Retailer);
        assert_eq!(directory.resolve(&Address::repeat_byte(0x11)), Role::Manufacturer);
    }

    #[test]
    fn test_environment_overrides_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[ledger]\ncontract_address = \"{CONTRACT}\"\n\n[scanner]\nmax_probe_id = 25\n"
        )
        .unwrap();
        env::set_var("PROVENANCE__SCANNER__MAX_PROBE_ID", "75");
        let result = AppConfig::load_from(Some(file.path()));
        clear_env();

        assert_eq!(result.unwrap().scanner.max_probe_id, 75);
    }

    #[test]
    fn test_conflicting_roles_fail_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[ledger]
contract_address = "{CONTRACT}"

[roles]
supplier = ["0x1111111111111111111111111111111111111111"]
distributor = ["0x1111111111111111111111111111111111111111"]
"#
        )
        .unwrap();

        let config = AppConfig::load_from(Some(file.path())).unwrap();

        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidRoleDirectory(_))
        ));
    }
}
