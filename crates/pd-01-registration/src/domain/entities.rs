//! Registry entities.

use serde::{Deserialize, Serialize};
use shared_types::{Address, RegistrationNumber, Role};

/// One registry binding: `address` may act as `role` under the given number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Role the address is registered for.
    pub role: Role,
    /// Registered address.
    pub address: Address,
    /// Company registration number, null-padded to 32 bytes.
    pub company_registration_number: RegistrationNumber,
}
