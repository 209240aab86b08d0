//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Ledger-assigned item identifier. Dense from 1; zero is never a real item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct ItemId(u64);

impl ItemId {
    /// Creates an ItemId, rejecting zero.
    pub fn new(value: u64) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::too_small("item_id", 1, value));
        }
        Ok(Self(value))
    }

    /// Returns the raw numeric value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for ItemId {
    type Error = ValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ItemId> for u64 {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u64>()
            .map_err(|e| ValidationError::invalid_format("item_id", e.to_string()))?;
        Self::new(value)
    }
}

/// Identity of one bound ledger client handle.
///
/// Every successful connect mints a new one, so two sessions never share
/// a handle even when they point at the same account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientHandleId(Uuid);

impl ClientHandleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientHandleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientHandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one tracked write operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LifecycleId(Uuid);

impl LifecycleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LifecycleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LifecycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque transaction identifier handed back by the signer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxReference(String);

impl TxReference {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Renders the reference as a block explorer link.
    pub fn explorer_url(&self, base: &str) -> String {
        if base.ends_with('/') {
            format!("{}{}", base, self.0)
        } else {
            format!("{}/{}", base, self.0)
        }
    }
}

impl fmt::Display for TxReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_rejects_zero() {
        assert!(ItemId::new(0).is_err());
        assert_eq!(ItemId::new(7).unwrap().value(), 7);
    }

    #[test]
    fn item_id_parses_form_input() {
        assert_eq!(" 12 ".parse::<ItemId>().unwrap().value(), 12);
        assert!("abc".parse::<ItemId>().is_err());
        assert!("0".parse::<ItemId>().is_err());
    }

    #[test]
    fn item_id_deserialization_rejects_zero() {
        assert!(serde_json::from_str::<ItemId>("0").is_err());
        let id: ItemId = serde_json::from_str("5").unwrap();
        assert_eq!(id.value(), 5);
        assert_eq!(serde_json::to_string(&id).unwrap(), "5");
    }

    #[test]
    fn client_handles_are_unique() {
        assert_ne!(ClientHandleId::new(), ClientHandleId::new());
    }

    #[test]
    fn explorer_url_joins_with_single_slash() {
        let reference = TxReference::new("0xabc");
        assert_eq!(
            reference.explorer_url("https://etherscan.io/tx/"),
            "https://etherscan.io/tx/0xabc"
        );
        assert_eq!(
            reference.explorer_url("https://etherscan.io/tx"),
            "https://etherscan.io/tx/0xabc"
        );
    }
}
