//! # Ports
//!
//! Read-side interface other components use to check role membership without
//! depending on how the registry stores it.

use crate::domain::Registry;
use shared_types::{Address, Role};

/// Answers "is this address registered for this role?".
pub trait RoleDirectory {
    /// True if `address` is currently registered for `role`.
    fn is_registered(&self, role: Role, address: Address) -> bool;
}

impl RoleDirectory for Registry {
    fn is_registered(&self, role: Role, address: Address) -> bool {
        Registry::is_registered(self, role, address)
    }
}
