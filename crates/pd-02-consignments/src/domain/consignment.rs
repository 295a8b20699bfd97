//! # Consignment State Machine
//!
//! The authoritative record of one shipment.
//!
//! Authorization is bound to the *current holder* of each role field, except
//! `consignor`, which is fixed at deployment. The consignor can always
//! re-route the downstream chain by assigning a new consignee; doing so
//! discards the verifier and any verification.
//!
//! Every operation checks caller and state first, then mutates, then emits.
//! A rejected call leaves the record untouched and emits nothing.

use super::state::{ConsignmentState, Operation};
use crate::errors::{Authority, ConsignmentError};
use serde::{Deserialize, Serialize};
use shared_types::{Address, CallContext, Log, PlusDEvent, Receipt, Requirements};

/// One shipment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consignment {
    address: Address,
    consignor: Address,
    consignee: Address,
    verifier: Address,
    requirements: Requirements,
    state: ConsignmentState,
}

impl Consignment {
    /// Deploys a new record at `address`.
    ///
    /// With a `consignee` the record starts in `CONSIGNEE_ASSIGNED`;
    /// otherwise in `CONSIGNMENT_CREATED`. Callers vet the consignee; the
    /// factory never passes the zero address. Deployment
    /// emits no event of its own; the deploying factory announces it.
    #[must_use]
    pub fn deploy(
        address: Address,
        consignor: Address,
        consignee: Option<Address>,
        requirements: Requirements,
    ) -> Self {
        let (consignee, state) = match consignee {
            Some(consignee) => (consignee, ConsignmentState::ConsigneeAssigned),
            None => (Address::ZERO, ConsignmentState::ConsignmentCreated),
        };

        Self {
            address,
            consignor,
            consignee,
            verifier: Address::ZERO,
            requirements,
            state,
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Address of this instance.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Originating party. Never changes.
    #[must_use]
    pub fn consignor(&self) -> Address {
        self.consignor
    }

    /// Current consignee; zero when unassigned.
    #[must_use]
    pub fn consignee(&self) -> Address {
        self.consignee
    }

    /// Current verifier; zero when unassigned.
    #[must_use]
    pub fn verifier(&self) -> Address {
        self.verifier
    }

    /// Shipment requirements. Never change.
    #[must_use]
    pub fn requirements(&self) -> Requirements {
        self.requirements
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ConsignmentState {
        self.state
    }

    // =========================================================================
    // TRANSITIONS
    // =========================================================================

    /// Consignor assigns `new_consignee`. Valid from any state.
    ///
    /// Clears the verifier when one was assigned and rewinds to
    /// `CONSIGNEE_ASSIGNED`. Emits `ConsigneeAssigned(new_consignee)`.
    ///
    /// # Errors
    ///
    /// [`ConsignmentError::Unauthorized`] unless the caller is the consignor.
    pub fn assign_consignee(
        &mut self,
        ctx: &CallContext,
        new_consignee: Address,
    ) -> Result<Receipt<()>, ConsignmentError> {
        Self::authorize(ctx, self.consignor, Authority::Consignor(self.consignor))?;

        if self.state.has_verifier() {
            self.verifier = Address::ZERO;
        }
        self.consignee = new_consignee;
        self.state = ConsignmentState::ConsigneeAssigned;

        Ok(self.emit(PlusDEvent::ConsigneeAssigned {
            consignee: new_consignee,
        }))
    }

    /// Current consignee assigns `new_verifier`.
    ///
    /// Valid from `CONSIGNEE_ASSIGNED` onwards. Reassigning while already at
    /// or past `VERIFIER_ASSIGNED` replaces the verifier and leaves the
    /// record in `VERIFIER_ASSIGNED`, discarding any verification. Emits
    /// `VerifierAssigned(new_verifier)`.
    ///
    /// # Errors
    ///
    /// - [`ConsignmentError::InvalidState`] before `CONSIGNEE_ASSIGNED`.
    /// - [`ConsignmentError::Unauthorized`] unless the caller is the consignee.
    pub fn assign_verifier(
        &mut self,
        ctx: &CallContext,
        new_verifier: Address,
    ) -> Result<Receipt<()>, ConsignmentError> {
        // No consignee exists before CONSIGNEE_ASSIGNED, so the state check
        // comes first.
        self.require(Operation::AssignVerifier, self.state.has_consignee())?;
        Self::authorize(ctx, self.consignee, Authority::Consignee(self.consignee))?;

        self.verifier = new_verifier;
        self.state = ConsignmentState::VerifierAssigned;

        Ok(self.emit(PlusDEvent::VerifierAssigned {
            verifier: new_verifier,
        }))
    }

    /// Current verifier attests the requirements. One-way; only a consignee
    /// or verifier reassignment leaves `REQUIREMENTS_VERIFIED` again.
    ///
    /// # Errors
    ///
    /// - [`ConsignmentError::Unauthorized`] unless the caller is the verifier.
    /// - [`ConsignmentError::InvalidState`] unless in `VERIFIER_ASSIGNED`.
    pub fn verify_requirements(
        &mut self,
        ctx: &CallContext,
    ) -> Result<Receipt<()>, ConsignmentError> {
        Self::authorize(ctx, self.verifier, Authority::Verifier(self.verifier))?;
        self.require(
            Operation::VerifyRequirements,
            self.state == ConsignmentState::VerifierAssigned,
        )?;

        self.state = ConsignmentState::RequirementsVerified;

        Ok(self.emit(PlusDEvent::RequirementsVerified))
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    /// The zero address never holds a role, so an unassigned field admits no
    /// caller.
    fn authorize(
        ctx: &CallContext,
        holder: Address,
        required: Authority,
    ) -> Result<(), ConsignmentError> {
        if holder.is_zero() || ctx.sender != holder {
            return Err(ConsignmentError::Unauthorized {
                caller: ctx.sender,
                required,
            });
        }
        Ok(())
    }

    fn require(&self, operation: Operation, allowed: bool) -> Result<(), ConsignmentError> {
        if allowed {
            Ok(())
        } else {
            Err(ConsignmentError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }

    fn emit(&self, event: PlusDEvent) -> Receipt<()> {
        Receipt::single((), Log::new(self.address, event))
    }
}

// =============================================================================
// TESTS
// =============================================================================
