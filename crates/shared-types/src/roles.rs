//! # Participant Roles
//!
//! The three parties of a shipment. Earlier iterations called the consignee
//! the "carrier" and the verifier the "insurer"; they are the same roles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A registrable participant role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Originates the shipment, creates the record and assigns the consignee.
    Consignor,
    /// Receives the shipment and assigns the verifier.
    Consignee,
    /// Attests that the shipment requirements are satisfied.
    Verifier,
}

impl Role {
    /// Every role, in pipeline order.
    pub const ALL: [Role; 3] = [Role::Consignor, Role::Consignee, Role::Verifier];

    /// Lowercase name used in log fields.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Consignor => "consignor",
            Self::Consignee => "consignee",
            Self::Verifier => "verifier",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
