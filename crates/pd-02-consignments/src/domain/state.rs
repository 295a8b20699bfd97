//! # Consignment Lifecycle
//!
//! ```text
//! CONSIGNMENT_CREATED(0) ──▶ CONSIGNEE_ASSIGNED(1) ──▶ VERIFIER_ASSIGNED(2) ──▶ REQUIREMENTS_VERIFIED(3)
//!                                   ▲                          │    ▲                    │
//!                                   │                          │    └─ assign_verifier ──┤
//!                                   └──── assign_consignee ────┴─────────────────────────┘
//! ```
//!
//! States are ordered. The only backward edges are the consignee reset and
//! the verifier reassignment out of `REQUIREMENTS_VERIFIED`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a consignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum ConsignmentState {
    /// Created by the consignor, no consignee yet.
    ConsignmentCreated = 0,
    /// A consignee holds the shipment.
    ConsigneeAssigned = 1,
    /// The consignee nominated a verifier.
    VerifierAssigned = 2,
    /// The verifier attested the requirements.
    RequirementsVerified = 3,
}

impl ConsignmentState {
    /// Numeric state code as stored on the ledger.
    #[must_use]
    pub const fn code(&self) -> u8 {
        *self as u8
    }

    /// Decodes a stored state code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::ConsignmentCreated),
            1 => Some(Self::ConsigneeAssigned),
            2 => Some(Self::VerifierAssigned),
            3 => Some(Self::RequirementsVerified),
            _ => None,
        }
    }

    /// True once a consignee has been assigned and not since removed.
    #[must_use]
    pub fn has_consignee(&self) -> bool {
        *self >= Self::ConsigneeAssigned
    }

    /// True once a verifier has been assigned and not since cleared.
    #[must_use]
    pub fn has_verifier(&self) -> bool {
        *self >= Self::VerifierAssigned
    }
}

impl fmt::Display for ConsignmentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ConsignmentCreated => "CONSIGNMENT_CREATED",
            Self::ConsigneeAssigned => "CONSIGNEE_ASSIGNED",
            Self::VerifierAssigned => "VERIFIER_ASSIGNED",
            Self::RequirementsVerified => "REQUIREMENTS_VERIFIED",
        };
        f.write_str(s)
    }
}

/// Mutating operations on a consignment instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Consignor (re)assigns the consignee.
    AssignConsignee,
    /// Consignee (re)assigns the verifier.
    AssignVerifier,
    /// Verifier attests the requirements.
    VerifyRequirements,
}

impl Operation {
    /// Operation name as used in logs and errors.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AssignConsignee => "assign_consignee",
            Self::AssignVerifier => "assign_verifier",
            Self::VerifyRequirements => "verify_requirements",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
