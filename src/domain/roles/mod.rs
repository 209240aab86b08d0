//! Roles module - participant roles and the static role directory.

mod directory;
mod role;

pub use directory::{resolve_role, RoleDirectory, RoleDirectoryError};
pub use role::Role;
