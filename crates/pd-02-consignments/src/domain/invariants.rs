//! # Domain Invariants
//!
//! Properties that MUST hold for every consignment after every transaction.
//!
//! - Party fields: `consignee` non-zero only from `CONSIGNEE_ASSIGNED`,
//!   `verifier` non-zero only from `VERIFIER_ASSIGNED`.
//! - Fixed fields: `consignor`, `requirements` and `address` never change.
//! - Monotonic state: the state never decreases, except to
//!   `CONSIGNEE_ASSIGNED` after `assign_consignee` and to `VERIFIER_ASSIGNED`
//!   after `assign_verifier`.

use super::consignment::Consignment;
use super::state::{ConsignmentState, Operation};
use std::fmt;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// A non-zero consignee requires `state >= CONSIGNEE_ASSIGNED`.
#[must_use]
pub fn check_consignee_invariant(c: &Consignment) -> bool {
    c.consignee().is_zero() || c.state().has_consignee()
}

/// A non-zero verifier requires `state >= VERIFIER_ASSIGNED`.
#[must_use]
pub fn check_verifier_invariant(c: &Consignment) -> bool {
    c.verifier().is_zero() || c.state().has_verifier()
}

/// Fields fixed at deployment are unchanged.
#[must_use]
pub fn check_fixed_fields_invariant(before: &Consignment, after: &Consignment) -> bool {
    before.address() == after.address()
        && before.consignor() == after.consignor()
        && before.requirements() == after.requirements()
}

/// `before -> after` is a legal state move for `operation`.
#[must_use]
pub fn check_transition(
    operation: Operation,
    before: ConsignmentState,
    after: ConsignmentState,
) -> bool {
    match operation {
        Operation::AssignConsignee => after == ConsignmentState::ConsigneeAssigned,
        Operation::AssignVerifier => {
            before.has_consignee() && after == ConsignmentState::VerifierAssigned
        }
        Operation::VerifyRequirements => {
            before == ConsignmentState::VerifierAssigned
                && after == ConsignmentState::RequirementsVerified
        }
    }
}

/// Checks every invariant across one successful `operation`.
#[must_use]
pub fn check_all_invariants(
    operation: Operation,
    before: &Consignment,
    after: &Consignment,
) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_consignee_invariant(after) {
        violations.push(InvariantViolation::ConsigneeWithoutState {
            state: after.state(),
        });
    }

    if !check_verifier_invariant(after) {
        violations.push(InvariantViolation::VerifierWithoutState {
            state: after.state(),
        });
    }

    if !check_fixed_fields_invariant(before, after) {
        violations.push(InvariantViolation::FixedFieldChanged);
    }

    if !check_transition(operation, before.state(), after.state()) {
        violations.push(InvariantViolation::IllegalTransition {
            operation,
            from: before.state(),
            to: after.state(),
        });
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Consignee set while the state says none is assigned.
    ConsigneeWithoutState {
        /// Offending state.
        state: ConsignmentState,
    },
    /// Verifier set while the state says none is assigned.
    VerifierWithoutState {
        /// Offending state.
        state: ConsignmentState,
    },
    /// Consignor, requirements or address changed.
    FixedFieldChanged,
    /// State moved along an edge the operation does not have.
    IllegalTransition {
        /// Operation applied.
        operation: Operation,
        /// State before.
        from: ConsignmentState,
        /// State after.
        to: ConsignmentState,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConsigneeWithoutState { state } => {
                write!(f, "consignee assigned in state {state}")
            }
            Self::VerifierWithoutState { state } => {
                write!(f, "verifier assigned in state {state}")
            }
            Self::FixedFieldChanged => write!(f, "immutable field changed"),
            Self::IllegalTransition {
                operation,
                from,
                to,
            } => write!(f, "{operation} moved {from} -> {to}"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
