//! Role directory configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::roles::{Role, RoleDirectory};

/// Participant addresses grouped by role.
///
/// In the environment each list is comma separated, e.g.
/// `PROVENANCE__ROLES__SUPPLIER=0xabc...,0xdef...`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RolesConfig {
    #[serde(default)]
    pub manufacturer: Vec<String>,

    #[serde(default)]
    pub supplier: Vec<String>,

    #[serde(default)]
    pub distributor: Vec<String>,

    #[serde(default)]
    pub retailer: Vec<String>,
}

impl RolesConfig {
    /// Builds the immutable directory used for role resolution
    pub fn role_directory(&self) -> Result<RoleDirectory, ValidationError> {
        let entries = [
            (Role::Manufacturer, &self.manufacturer),
            (Role::Supplier, &self.supplier),
            (Role::Distributor, &self.distributor),
            (Role::Retailer, &self.retailer),
        ]
        .into_iter()
        .flat_map(|(role, addresses)| {
            addresses
                .iter()
                .map(|address| address.trim())
                .filter(|address| !address.is_empty())
                .map(move |address| (role, address))
        });

        Ok(RoleDirectory::from_text_entries(entries)?)
    }

    /// Validate role directory configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.role_directory().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Address;
    use crate::domain::roles::RoleDirectoryError;

    const MAKER: &str = "0x1111111111111111111111111111111111111111";
    const SUPPLIER: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    #[test]
    fn test_empty_config_builds_empty_directory() {
        let directory = RolesConfig::default().role_directory().unwrap();
        assert!(directory.is_empty());
    }

    #[test]
    fn test_directory_resolves_configured_roles() {
        let config = RolesConfig {
            manufacturer: vec![MAKER.to_string()],
            supplier: vec![format!(" {} ", SUPPLIER), String::new()],
            ..Default::default()
        };

        let directory = config.role_directory().unwrap();

        assert_eq!(directory.len(), 2);
        assert_eq!(directory.resolve_str(&SUPPLIER.to_lowercase()), Role::Supplier);
        assert_eq!(directory.resolve(&Address::repeat_byte(0x11)), Role::Manufacturer);
    }

    #[test]
    fn test_address_in_two_roles_is_rejected() {
        let config = RolesConfig {
            supplier: vec![MAKER.to_string()],
            retailer: vec![MAKER.to_string()],
            ..Default::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidRoleDirectory(
                RoleDirectoryError::ConflictingRoles { .. }
            ))
        ));
    }

    #[test]
    fn test_malformed_address_is_rejected() {
        let config = RolesConfig {
            distributor: vec!["not-an-address".to_string()],
            ..Default::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidRoleDirectory(
                RoleDirectoryError::InvalidAddress { .. }
            ))
        ));
    }
}
