//! Directory scanner configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Upper limit accepted for `max_probe_id`
pub const MAX_PROBE_LIMIT: u64 = 10_000;

/// Directory scan bounds
#[derive(Debug, Clone, Deserialize)]
pub struct ScannerConfig {
    /// Highest item id probed by an inventory scan
    #[serde(default = "default_max_probe_id")]
    pub max_probe_id: u64,
}

impl ScannerConfig {
    /// Validate scanner configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_probe_id == 0 || self.max_probe_id > MAX_PROBE_LIMIT {
            return Err(ValidationError::InvalidProbeBound {
                max: MAX_PROBE_LIMIT,
            });
        }
        Ok(())
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            max_probe_id: default_max_probe_id(),
        }
    }
}

fn default_max_probe_id() -> u64 {
    50
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_probe_bound() {
        let config = ScannerConfig::default();
        assert_eq!(config.max_probe_id, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_probe_bound_limits() {
        assert!(ScannerConfig { max_probe_id: 0 }.validate().is_err());
        assert!(ScannerConfig { max_probe_id: 1 }.validate().is_ok());
        assert!(ScannerConfig { max_probe_id: MAX_PROBE_LIMIT }.validate().is_ok());
        assert!(ScannerConfig { max_probe_id: MAX_PROBE_LIMIT + 1 }.validate().is_err());
    }
}
