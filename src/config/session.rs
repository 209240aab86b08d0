//! Session behaviour configuration

use serde::Deserialize;

/// Session and write-gating switches
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Reconnect automatically after a wallet account or network change
    #[serde(default = "default_true")]
    pub reconnect_on_change: bool,

    /// Refuse writes the connected role may not perform
    #[serde(default = "default_true")]
    pub enforce_roles: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            reconnect_on_change: true,
            enforce_roles: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_enable_everything() {
        let config = SessionConfig::default();
        assert!(config.reconnect_on_change);
        assert!(config.enforce_roles);
    }
}
