//! # PD-01 Registration - Participant Registry
//!
//! **Component ID:** 1
//!
//! ## Purpose
//!
//! Binds verified real-world identities (company registration numbers) to the
//! ledger addresses allowed to act as consignor, consignee or verifier. Only
//! the registry owner, fixed at construction, may write.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Owner-only writes | `domain/registry.rs` - `Registry::register()` |
//! | One number per (role, address) | `domain/registry.rs` - upsert into a single map slot |
//! | Absence reads as zero | `domain/registry.rs` - `Registry::registration_number()` |
//! | Failed writes emit nothing | `Registry::register()` checks before effects |
//!
//! ## Usage Example
//!
//! ```ignore
//! use pd_01_registration::prelude::*;
//!
//! let mut registry = Registry::new(registry_address, owner);
//! let receipt = registry.register_consignor(
//!     &CallContext::new(owner),
//!     consignor,
//!     RegistrationNumber::new("HRB 27814"),
//! )?;
//! assert!(registry.is_registered(Role::Consignor, consignor));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod domain;
pub mod ports;

pub use domain::*;
pub use ports::*;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::domain::{RegistrationError, Registry, RegistryEntry};
    pub use crate::ports::RoleDirectory;
    pub use shared_types::{Address, CallContext, RegistrationNumber, Role};
}

/// Component ID.
pub const COMPONENT_ID: u8 = 1;

/// Component name.
pub const COMPONENT_NAME: &str = "Registration";
