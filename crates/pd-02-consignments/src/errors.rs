//! # Error Types
//!
//! Every failed operation reverts the whole transaction: no field changes and
//! no event is emitted. Callers match on [`ConsignmentError::kind`] to tell
//! the failure classes apart.

use crate::domain::{ConsignmentState, Operation};
use pd_01_registration::RegistrationError;
use shared_types::{Address, CodecError, Role};
use std::fmt;
use thiserror::Error;

// =============================================================================
// AUTHORITY
// =============================================================================

/// The party an operation required the caller to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority {
    /// The registry owner.
    RegistryOwner(Address),
    /// Any registered consignor.
    RegisteredConsignor,
    /// The consignor of the instance.
    Consignor(Address),
    /// The current consignee of the instance.
    Consignee(Address),
    /// The current verifier of the instance.
    Verifier(Address),
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RegistryOwner(addr) => write!(f, "registry owner {addr:?}"),
            Self::RegisteredConsignor => write!(f, "a registered consignor"),
            Self::Consignor(addr) => write!(f, "consignor {addr:?}"),
            Self::Consignee(addr) => write!(f, "consignee {addr:?}"),
            Self::Verifier(addr) => write!(f, "verifier {addr:?}"),
        }
    }
}

// =============================================================================
// CONSIGNMENT ERRORS
// =============================================================================

/// Coarse failure classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller lacks the required role or ownership.
    Unauthorized,
    /// Operation not valid in the current lifecycle state.
    InvalidState,
    /// Referenced address is not registered for the required role.
    InvalidParty,
    /// Referenced consignment does not exist.
    NotFound,
}

/// Errors raised by consignment and factory operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsignmentError {
    /// Caller is not the party the operation requires.
    #[error("unauthorized: {caller:?} is not {required}")]
    Unauthorized {
        /// Address that sent the transaction.
        caller: Address,
        /// Who the caller had to be.
        required: Authority,
    },

    /// Operation is not valid from the current state.
    #[error("invalid state: {operation} not allowed in {state}")]
    InvalidState {
        /// Rejected operation.
        operation: Operation,
        /// State at the time of the call.
        state: ConsignmentState,
    },

    /// A referenced party is not registered for the role it would take.
    #[error("invalid party: {address:?} is not a registered {role}")]
    InvalidParty {
        /// Unregistered address.
        address: Address,
        /// Role it was supposed to hold.
        role: Role,
    },

    /// The factory never created a consignment at this address.
    #[error("unknown consignment: {0:?}")]
    UnknownConsignment(Address),
}

impl ConsignmentError {
    /// The failure class of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::InvalidParty { .. } => ErrorKind::InvalidParty,
            Self::UnknownConsignment(_) => ErrorKind::NotFound,
        }
    }
}

impl From<RegistrationError> for ConsignmentError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::Unauthorized { caller, owner } => Self::Unauthorized {
                caller,
                required: Authority::RegistryOwner(owner),
            },
        }
    }
}

// =============================================================================
// CONFIG ERRORS
// =============================================================================

/// Errors from loading or validating [`crate::config::ServiceConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("{0} is not set")]
    Missing(&'static str),

    /// An environment variable did not hold a valid address.
    #[error("{var}: {source}")]
    InvalidAddress {
        /// Variable name.
        var: &'static str,
        /// Decoding failure.
        source: CodecError,
    },

    /// The registry owner is the zero address, so nobody could register.
    #[error("registry owner must not be the zero address")]
    ZeroOwner,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let unauthorized = ConsignmentError::Unauthorized {
            caller: Address::repeat_byte(1),
            required: Authority::RegisteredConsignor,
        };
        assert_eq!(unauthorized.kind(), ErrorKind::Unauthorized);

        let invalid_state = ConsignmentError::InvalidState {
            operation: Operation::VerifyRequirements,
            state: ConsignmentState::ConsigneeAssigned,
        };
        assert_eq!(invalid_state.kind(), ErrorKind::InvalidState);
        assert_eq!(
            invalid_state.to_string(),
            "invalid state: verify_requirements not allowed in CONSIGNEE_ASSIGNED"
        );

        assert_eq!(
            ConsignmentError::UnknownConsignment(Address::ZERO).kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_invalid_party_display() {
        let err = ConsignmentError::InvalidParty {
            address: Address::repeat_byte(2),
            role: Role::Verifier,
        };
        assert_eq!(err.kind(), ErrorKind::InvalidParty);
        assert!(err.to_string().ends_with("is not a registered verifier"));
    }

    #[test]
    fn test_registration_error_conversion() {
        let err: ConsignmentError = RegistrationError::Unauthorized {
            caller: Address::repeat_byte(3),
            owner: Address::repeat_byte(4),
        }
        .into();
        assert_eq!(
            err,
            ConsignmentError::Unauthorized {
                caller: Address::repeat_byte(3),
                required: Authority::RegistryOwner(Address::repeat_byte(4)),
            }
        );
    }
}
