//! Static address-to-role directory and the role resolver.

use std::collections::HashMap;

use thiserror::Error;

use super::Role;
use crate::domain::foundation::Address;

/// Errors raised while building a directory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleDirectoryError {
    #[error("Address {address} cannot be assigned role Others")]
    OthersNotAssignable { address: Address },

    #[error("Address {address} is listed as both {first} and {second}")]
    ConflictingRoles {
        address: Address,
        first: Role,
        second: Role,
    },

    #[error("Invalid address '{input}' for role {role}")]
    InvalidAddress { input: String, role: Role },
}

/// Read-only mapping from account address to participant role.
///
/// Loaded once at startup and never mutated afterwards. Lookups are by
/// address bytes, so the hex letter case of the input is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleDirectory {
    entries: HashMap<Address, Role>,
}

impl RoleDirectory {
    /// Creates an empty directory where every address resolves to `Others`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a directory from `(address, role)` pairs.
    ///
    /// Repeating an identical pair is harmless; giving one address two
    /// different roles is rejected.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (Address, Role)>,
    ) -> Result<Self, RoleDirectoryError> {
        let mut map = HashMap::new();
        for (address, role) in entries {
            if !role.is_participant() {
                return Err(RoleDirectoryError::OthersNotAssignable { address });
            }
            if let Some(existing) = map.insert(address, role) {
                if existing != role {
                    return Err(RoleDirectoryError::ConflictingRoles {
                        address,
                        first: existing,
                        second: role,
                    });
                }
            }
        }
        Ok(Self { entries: map })
    }

    /// Builds a directory from textual addresses grouped by role.
    pub fn from_text_entries<'a>(
        entries: impl IntoIterator<Item = (Role, &'a str)>,
    ) -> Result<Self, RoleDirectoryError> {
        let mut parsed = Vec::new();
        for (role, input) in entries {
            let address = input
                .trim()
                .parse::<Address>()
                .map_err(|_| RoleDirectoryError::InvalidAddress {
                    input: input.to_string(),
                    role,
                })?;
            parsed.push((address, role));
        }
        Self::from_entries(parsed)
    }

    /// Maps an address to its role. Unknown addresses yield `Others`.
    pub fn resolve(&self, address: &Address) -> Role {
        self.entries.get(address).copied().unwrap_or(Role::Others)
    }

    /// Resolves textual input. Anything that is not a valid address yields
    /// `Others`, so the resolver stays total.
    pub fn resolve_str(&self, input: &str) -> Role {
        input
            .trim()
            .parse::<Address>()
            .map(|address| self.resolve(&address))
            .unwrap_or(Role::Others)
    }

    /// Addresses registered for a role, in no particular order.
    pub fn addresses_for(&self, role: Role) -> Vec<Address> {
        self.entries
            .iter()
            .filter(|(_, r)| **r == role)
            .map(|(address, _)| *address)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Role resolver: total, pure lookup of an address in the directory.
pub fn resolve_role(directory: &RoleDirectory, address: &Address) -> Role {
    directory.resolve(address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SUPPLIER: &str = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";

    fn directory() -> RoleDirectory {
        RoleDirectory::from_entries([
            (Address::repeat_byte(0x11), Role::Manufacturer),
            (SUPPLIER.parse().unwrap(), Role::Supplier),
            (Address::repeat_byte(0x33), Role::Distributor),
            (Address::repeat_byte(0x44), Role::Retailer),
        ])
        .unwrap()
    }

    #[test]
    fn resolves_known_addresses() {
        let dir = directory();
        assert_eq!(dir.resolve(&Address::repeat_byte(0x11)), Role::Manufacturer);
        assert_eq!(dir.resolve(&Address::repeat_byte(0x44)), Role::Retailer);
    }

    #[test]
    fn unknown_address_is_others() {
        assert_eq!(directory().resolve(&Address::repeat_byte(0x99)), Role::Others);
    }

    #[test]
    fn resolve_str_ignores_letter_case() {
        let dir = directory();
        assert_eq!(dir.resolve_str(SUPPLIER), Role::Supplier);
        assert_eq!(
            dir.resolve_str("0x5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED"),
            Role::Supplier
        );
        assert_eq!(
            dir.resolve_str("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"),
            Role::Supplier
        );
    }

    #[test]
    fn resolve_str_is_total_for_garbage() {
        assert_eq!(directory().resolve_str("not-an-address"), Role::Others);
        assert_eq!(directory().resolve_str(""), Role::Others);
    }

    #[test]
    fn rejects_conflicting_roles() {
        let result = RoleDirectory::from_entries([
            (Address::repeat_byte(0x11), Role::Manufacturer),
            (Address::repeat_byte(0x11), Role::Retailer),
        ]);
        assert!(matches!(
            result,
            Err(RoleDirectoryError::ConflictingRoles { .. })
        ));
    }

    #[test]
    fn rejects_others_entries() {
        let result = RoleDirectory::from_entries([(Address::repeat_byte(0x11), Role::Others)]);
        assert!(matches!(
            result,
            Err(RoleDirectoryError::OthersNotAssignable { .. })
        ));
    }

    #[test]
    fn from_text_entries_reports_bad_input() {
        let result = RoleDirectory::from_text_entries([(Role::Supplier, "0xnothex")]);
        assert!(matches!(result, Err(RoleDirectoryError::InvalidAddress { .. })));
    }

    #[test]
    fn addresses_for_lists_role_members() {
        assert_eq!(
            directory().addresses_for(Role::Distributor),
            vec![Address::repeat_byte(0x33)]
        );
    }

    fn mixed_case(hex: &str, mask: &[bool]) -> String {
        hex.chars()
            .zip(mask.iter().cycle())
            .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
            .collect()
    }

    proptest! {
        #[test]
        fn any_letter_case_resolves_to_the_mapped_role(
            bytes in proptest::array::uniform20(any::<u8>()),
            role_index in 0usize..4,
            mask in proptest::collection::vec(any::<bool>(), 1..40),
        ) {
            let address = Address::from(bytes);
            let role = Role::PARTICIPANTS[role_index];
            let dir = RoleDirectory::from_entries([(address, role)]).unwrap();

            let lower: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
            let input = format!("0x{}", mixed_case(&lower, &mask));

            prop_assert_eq!(dir.resolve_str(&input), role);
        }

        #[test]
        fn unlisted_addresses_resolve_to_others(
            bytes in proptest::array::uniform20(any::<u8>()),
        ) {
            let address = Address::from(bytes);
            prop_assume!(address != Address::repeat_byte(0x11));
            prop_assume!(address != Address::repeat_byte(0x33));
            prop_assume!(address != Address::repeat_byte(0x44));
            prop_assume!(address != SUPPLIER.parse::<Address>().unwrap());
            prop_assert_eq!(resolve_role(&directory(), &address), Role::Others);
        }
    }
}
