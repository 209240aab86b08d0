//! Participant roles in the provenance workflow.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// One of the fixed participant categories, derived from a wallet address.
///
/// `Others` covers every address the directory does not know, including
/// end consumers, who only use read operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    Manufacturer,
    Supplier,
    Distributor,
    Retailer,
    #[default]
    Others,
}

impl Role {
    /// All roles that can appear in a directory entry.
    pub const PARTICIPANTS: [Role; 4] = [
        Role::Manufacturer,
        Role::Supplier,
        Role::Distributor,
        Role::Retailer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manufacturer => "Manufacturer",
            Role::Supplier => "Supplier",
            Role::Distributor => "Distributor",
            Role::Retailer => "Retailer",
            Role::Others => "Others",
        }
    }

    /// Returns true for the four directory-backed roles.
    pub fn is_participant(&self) -> bool {
        !matches!(self, Role::Others)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manufacturer" => Ok(Role::Manufacturer),
            "supplier" => Ok(Role::Supplier),
            "distributor" => Ok(Role::Distributor),
            "retailer" => Ok(Role::Retailer),
            "others" => Ok(Role::Others),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_role_is_others() {
        assert_eq!(Role::default(), Role::Others);
        assert!(!Role::Others.is_participant());
    }

    #[test]
    fn parses_labels_in_any_case() {
        assert_eq!("SUPPLIER".parse::<Role>().unwrap(), Role::Supplier);
        assert_eq!("retailer".parse::<Role>().unwrap(), Role::Retailer);
        assert!("courier".parse::<Role>().is_err());
    }

    #[test]
    fn display_matches_label() {
        for role in Role::PARTICIPANTS {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }
}
