//! # Ledger Events
//!
//! Structured records emitted by every successful state transition. A
//! transaction that fails emits nothing.
//!
//! ## Event Catalogue
//!
//! | Event | Emitter | Signature |
//! |-------|---------|-----------|
//! | `ConsignorRegistered` | Registry | `ConsignorRegistered(address,bytes32)` |
//! | `ConsigneeRegistered` | Registry | `ConsigneeRegistered(address,bytes32)` |
//! | `VerifierRegistered` | Registry | `VerifierRegistered(address,bytes32)` |
//! | `ConsignmentCreated` | Factory | `ConsignmentCreated(address)` |
//! | `ConsigneeAssigned` | Consignment | `ConsigneeAssigned(address)` |
//! | `VerifierAssigned` | Consignment | `VerifierAssigned(address)` |
//! | `RequirementsVerified` | Consignment | `RequirementsVerified()` |

use crate::roles::Role;
use crate::services::keccak256;
use crate::value_objects::{Address, Hash, RegistrationNumber};
use serde::{Deserialize, Serialize};

// =============================================================================
// EVENTS
// =============================================================================

/// Every event PlusD can emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "args")]
pub enum PlusDEvent {
    /// An address was registered as consignor.
    ConsignorRegistered {
        /// Registered address.
        consignor: Address,
        /// Company registration number bound to it.
        company_registration_number: RegistrationNumber,
    },
    /// An address was registered as consignee.
    ConsigneeRegistered {
        /// Registered address.
        consignee: Address,
        /// Company registration number bound to it.
        company_registration_number: RegistrationNumber,
    },
    /// An address was registered as verifier.
    VerifierRegistered {
        /// Registered address.
        verifier: Address,
        /// Company registration number bound to it.
        company_registration_number: RegistrationNumber,
    },
    /// The factory created a consignment instance.
    ConsignmentCreated {
        /// Address of the new instance.
        consignment: Address,
    },
    /// The consignor assigned a (new) consignee.
    ConsigneeAssigned {
        /// New consignee.
        consignee: Address,
    },
    /// The consignee assigned a (new) verifier.
    VerifierAssigned {
        /// New verifier.
        verifier: Address,
    },
    /// The verifier attested the requirements.
    RequirementsVerified,
}

impl PlusDEvent {
    /// Builds the registration event for `role`.
    #[must_use]
    pub fn registered(role: Role, address: Address, number: RegistrationNumber) -> Self {
        match role {
            Role::Consignor => Self::ConsignorRegistered {
                consignor: address,
                company_registration_number: number,
            },
            Role::Consignee => Self::ConsigneeRegistered {
                consignee: address,
                company_registration_number: number,
            },
            Role::Verifier => Self::VerifierRegistered {
                verifier: address,
                company_registration_number: number,
            },
        }
    }

    /// Event name, as used for journal filtering.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ConsignorRegistered { .. } => "ConsignorRegistered",
            Self::ConsigneeRegistered { .. } => "ConsigneeRegistered",
            Self::VerifierRegistered { .. } => "VerifierRegistered",
            Self::ConsignmentCreated { .. } => "ConsignmentCreated",
            Self::ConsigneeAssigned { .. } => "ConsigneeAssigned",
            Self::VerifierAssigned { .. } => "VerifierAssigned",
            Self::RequirementsVerified => "RequirementsVerified",
        }
    }

    /// Canonical signature, e.g. `ConsigneeAssigned(address)`.
    #[must_use]
    pub const fn signature(&self) -> &'static str {
        match self {
            Self::ConsignorRegistered { .. } => "ConsignorRegistered(address,bytes32)",
            Self::ConsigneeRegistered { .. } => "ConsigneeRegistered(address,bytes32)",
            Self::VerifierRegistered { .. } => "VerifierRegistered(address,bytes32)",
            Self::ConsignmentCreated { .. } => "ConsignmentCreated(address)",
            Self::ConsigneeAssigned { .. } => "ConsigneeAssigned(address)",
            Self::VerifierAssigned { .. } => "VerifierAssigned(address)",
            Self::RequirementsVerified => "RequirementsVerified()",
        }
    }

    /// First topic: keccak256 of the signature.
    #[must_use]
    pub fn topic0(&self) -> Hash {
        keccak256(self.signature().as_bytes())
    }
}

// =============================================================================
// LOG & RECEIPT
// =============================================================================

/// An event together with the address of the component that emitted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    /// Registry, factory or consignment instance address.
    pub emitter: Address,
    /// The event.
    pub event: PlusDEvent,
}

impl Log {
    /// Creates a new log.
    #[must_use]
    pub fn new(emitter: Address, event: PlusDEvent) -> Self {
        Self { emitter, event }
    }
}

/// Outcome of a successful transaction: its return value and emitted logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt<T> {
    /// Operation return value.
    pub output: T,
    /// Logs in emission order.
    pub logs: Vec<Log>,
}

impl<T> Receipt<T> {
    /// Creates a receipt.
    #[must_use]
    pub fn new(output: T, logs: Vec<Log>) -> Self {
        Self { output, logs }
    }

    /// Receipt carrying a single log.
    #[must_use]
    pub fn single(output: T, log: Log) -> Self {
        Self::new(output, vec![log])
    }

    /// Maps the output while keeping the logs.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Receipt<U> {
        Receipt {
            output: f(self.output),
            logs: self.logs,
        }
    }

    /// Splits into output and logs.
    pub fn into_parts(self) -> (T, Vec<Log>) {
        (self.output, self.logs)
    }
}

// =============================================================================
// TESTS
// =============================================================================
