//! # Consignment Factory
//!
//! `PlusDConsignments` owns the participant registry and every consignment
//! instance it deploys. It is the entry point participants call:
//!
//! 1. Registry writes are forwarded to the embedded [`Registry`].
//! 2. Creation requires a registered consignor and a registered consignee.
//! 3. Mutations check that any newly named party is registered for its
//!    role, then delegate to the instance, which checks the caller and the
//!    state. Instance errors propagate unchanged.
//!
//! Instance addresses are derived from the factory address and a creation
//! nonce, so they are deterministic and never collide.

use crate::domain::{check_all_invariants, Consignment, Operation};
use crate::errors::{Authority, ConsignmentError};
use pd_01_registration::{Registry, RoleDirectory};
use pd_telemetry::log_consignment_event;
use shared_types::{
    compute_contract_address, Address, CallContext, Log, PlusDEvent, Receipt,
    RegistrationNumber, Requirements, Role,
};
use std::collections::HashMap;
use tracing::{info, warn};

/// Nonce of the first instance; contract accounts start at 1.
const INITIAL_NONCE: u64 = 1;

/// The consignment factory and registry.
#[derive(Debug, Clone)]
pub struct PlusDConsignments {
    address: Address,
    registry: Registry,
    nonce: u64,
    instances: HashMap<Address, Consignment>,
    by_consignor: HashMap<Address, Vec<Address>>,
}

impl PlusDConsignments {
    /// Creates a factory at `address` whose registry is administered by `owner`.
    #[must_use]
    pub fn new(address: Address, owner: Address) -> Self {
        Self {
            address,
            registry: Registry::new(address, owner),
            nonce: INITIAL_NONCE,
            instances: HashMap::new(),
            by_consignor: HashMap::new(),
        }
    }

    /// Factory address; registry and creation events are emitted from it.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Registry owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.registry.owner()
    }

    /// Read access to the embedded registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    // =========================================================================
    // REGISTRATION
    // =========================================================================

    /// Owner registers `address` for `role`.
    ///
    /// # Errors
    ///
    /// [`ConsignmentError::Unauthorized`] if the caller is not the owner.
    pub fn register(
        &mut self,
        ctx: &CallContext,
        role: Role,
        address: Address,
        number: RegistrationNumber,
    ) -> Result<Receipt<()>, ConsignmentError> {
        Ok(self.registry.register(ctx, role, address, number)?)
    }

    /// Owner registers a consignor.
    ///
    /// # Errors
    ///
    /// See [`PlusDConsignments::register`].
    pub fn register_consignor(
        &mut self,
        ctx: &CallContext,
        address: Address,
        number: RegistrationNumber,
    ) -> Result<Receipt<()>, ConsignmentError> {
        self.register(ctx, Role::Consignor, address, number)
    }

    /// Owner registers a consignee.
    ///
    /// # Errors
    ///
    /// See [`PlusDConsignments::register`].
    pub fn register_consignee(
        &mut self,
        ctx: &CallContext,
        address: Address,
        number: RegistrationNumber,
    ) -> Result<Receipt<()>, ConsignmentError> {
        self.register(ctx, Role::Consignee, address, number)
    }

    /// Owner registers a verifier.
    ///
    /// # Errors
    ///
    /// See [`PlusDConsignments::register`].
    pub fn register_verifier(
        &mut self,
        ctx: &CallContext,
        address: Address,
        number: RegistrationNumber,
    ) -> Result<Receipt<()>, ConsignmentError> {
        self.register(ctx, Role::Verifier, address, number)
    }

    // =========================================================================
    // CREATION
    // =========================================================================

    /// Registered consignor creates a consignment for a registered consignee.
    ///
    /// The instance starts in `CONSIGNEE_ASSIGNED`. Emits
    /// `ConsignmentCreated(instance)` and returns the instance address.
    ///
    /// # Errors
    ///
    /// - [`ConsignmentError::Unauthorized`] if the caller is not a registered consignor.
    /// - [`ConsignmentError::InvalidParty`] if `consignee` is not a registered consignee.
    pub fn create_consignment(
        &mut self,
        ctx: &CallContext,
        consignee: Address,
        requirements: Requirements,
    ) -> Result<Receipt<Address>, ConsignmentError> {
        self.create(ctx, Some(consignee), requirements)
    }

    /// Registered consignor creates a consignment with no consignee yet.
    ///
    /// The instance starts in `CONSIGNMENT_CREATED`.
    ///
    /// # Errors
    ///
    /// [`ConsignmentError::Unauthorized`] if the caller is not a registered consignor.
    pub fn create_unassigned_consignment(
        &mut self,
        ctx: &CallContext,
        requirements: Requirements,
    ) -> Result<Receipt<Address>, ConsignmentError> {
        self.create(ctx, None, requirements)
    }

    fn create(
        &mut self,
        ctx: &CallContext,
        consignee: Option<Address>,
        requirements: Requirements,
    ) -> Result<Receipt<Address>, ConsignmentError> {
        if !self.registry.is_registered(Role::Consignor, ctx.sender) {
            warn!(caller = %ctx.sender, "Consignment creation by unregistered consignor");
            return Err(ConsignmentError::Unauthorized {
                caller: ctx.sender,
                required: Authority::RegisteredConsignor,
            });
        }
        if let Some(consignee) = consignee {
            require_registered(&self.registry, Role::Consignee, consignee)?;
        }

        let address = compute_contract_address(self.address, self.nonce);
        self.nonce += 1;

        let instance = Consignment::deploy(address, ctx.sender, consignee, requirements);
        let state = instance.state();
        self.instances.insert(address, instance);
        self.by_consignor.entry(ctx.sender).or_default().push(address);

        log_consignment_event!(
            info,
            "Consignment created",
            address,
            consignor = %ctx.sender,
            state = %state
        );

        Ok(Receipt::single(
            address,
            Log::new(
                self.address,
                PlusDEvent::ConsignmentCreated {
                    consignment: address,
                },
            ),
        ))
    }

    // =========================================================================
    // DELEGATED MUTATIONS
    // =========================================================================

    /// Assigns a registered consignee to `consignment` on behalf of its consignor.
    ///
    /// # Errors
    ///
    /// - [`ConsignmentError::UnknownConsignment`] if the factory did not create it.
    /// - [`ConsignmentError::InvalidParty`] if `consignee` is not a registered consignee.
    /// - Any error of [`Consignment::assign_consignee`].
    pub fn assign_consignee(
        &mut self,
        ctx: &CallContext,
        consignment: Address,
        consignee: Address,
    ) -> Result<Receipt<()>, ConsignmentError> {
        self.require_known(consignment)?;
        require_registered(&self.registry, Role::Consignee, consignee)?;
        self.apply(ctx, consignment, Operation::AssignConsignee, |c| {
            c.assign_consignee(ctx, consignee)
        })
    }

    /// Assigns a registered verifier to `consignment` on behalf of its consignee.
    ///
    /// # Errors
    ///
    /// - [`ConsignmentError::UnknownConsignment`] if the factory did not create it.
    /// - [`ConsignmentError::InvalidParty`] if `verifier` is not a registered verifier.
    /// - Any error of [`Consignment::assign_verifier`].
    pub fn assign_verifier(
        &mut self,
        ctx: &CallContext,
        consignment: Address,
        verifier: Address,
    ) -> Result<Receipt<()>, ConsignmentError> {
        self.require_known(consignment)?;
        require_registered(&self.registry, Role::Verifier, verifier)?;
        self.apply(ctx, consignment, Operation::AssignVerifier, |c| {
            c.assign_verifier(ctx, verifier)
        })
    }

    /// Verifier of `consignment` attests its requirements.
    ///
    /// # Errors
    ///
    /// - [`ConsignmentError::UnknownConsignment`] if the factory did not create it.
    /// - Any error of [`Consignment::verify_requirements`].
    pub fn verify_requirements(
        &mut self,
        ctx: &CallContext,
        consignment: Address,
    ) -> Result<Receipt<()>, ConsignmentError> {
        self.apply(ctx, consignment, Operation::VerifyRequirements, |c| {
            c.verify_requirements(ctx)
        })
    }

    fn apply(
        &mut self,
        ctx: &CallContext,
        consignment: Address,
        operation: Operation,
        f: impl FnOnce(&mut Consignment) -> Result<Receipt<()>, ConsignmentError>,
    ) -> Result<Receipt<()>, ConsignmentError> {
        let instance = self
            .instances
            .get_mut(&consignment)
            .ok_or(ConsignmentError::UnknownConsignment(consignment))?;
        let before = instance.clone();

        let receipt = f(instance).map_err(|err| {
            log_consignment_event!(
                warn,
                "Consignment operation rejected",
                consignment,
                operation = %operation,
                caller = %ctx.sender,
                error = %err
            );
            err
        })?;

        debug_assert!(
            check_all_invariants(operation, &before, instance).is_valid(),
            "invariant violated by {operation}"
        );

        log_consignment_event!(
            info,
            "Consignment updated",
            consignment,
            operation = %operation,
            caller = %ctx.sender,
            from = %before.state(),
            to = %instance.state()
        );

        Ok(receipt)
    }

    fn require_known(&self, consignment: Address) -> Result<(), ConsignmentError> {
        if self.instances.contains_key(&consignment) {
            Ok(())
        } else {
            Err(ConsignmentError::UnknownConsignment(consignment))
        }
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// The `index`-th consignment created by `consignor`, in creation order.
    #[must_use]
    pub fn consignments(&self, consignor: Address, index: usize) -> Option<Address> {
        self.by_consignor
            .get(&consignor)
            .and_then(|list| list.get(index))
            .copied()
    }

    /// Every consignment created by `consignor`, in creation order.
    #[must_use]
    pub fn consignments_of(&self, consignor: Address) -> &[Address] {
        self.by_consignor
            .get(&consignor)
            .map_or(&[], Vec::as_slice)
    }

    /// Number of consignments created by `consignor`.
    #[must_use]
    pub fn consignment_count(&self, consignor: Address) -> usize {
        self.consignments_of(consignor).len()
    }

    /// The instance at `address`.
    #[must_use]
    pub fn consignment(&self, address: Address) -> Option<&Consignment> {
        self.instances.get(&address)
    }

    /// Total number of instances created.
    #[must_use]
    pub fn total_consignments(&self) -> usize {
        self.instances.len()
    }
}

/// Fails with `InvalidParty` unless `address` is registered for `role`.
///
/// The zero address marks an empty role field and never qualifies, even if
/// the owner registered it.
fn require_registered(
    directory: &impl RoleDirectory,
    role: Role,
    address: Address,
) -> Result<(), ConsignmentError> {
    if !address.is_zero() && directory.is_registered(role, address) {
        Ok(())
    } else {
        info!(address = %address, role = %role, "Referenced party not registered");
        Err(ConsignmentError::InvalidParty { address, role })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConsignmentState;
    use crate::errors::ErrorKind;

    const FACTORY: Address = Address::repeat_byte(0xfa);
    const OWNER: Address = Address::repeat_byte(0x01);
    const CONSIGNOR: Address = Address::repeat_byte(0x02);
    const CONSIGNEE: Address = Address::repeat_byte(0x03);
    const VERIFIER: Address = Address::repeat_byte(0x04);

    fn as_(addr: Address) -> CallContext {
        CallContext::new(addr)
    }

    fn registered() -> PlusDConsignments {
        let mut f = PlusDConsignments::new(FACTORY, OWNER);
        f.register_consignor(&as_(OWNER), CONSIGNOR, RegistrationNumber::new("HRB 27814"))
            .unwrap();
        f.register_consignee(&as_(OWNER), CONSIGNEE, RegistrationNumber::new("HRB 28806"))
            .unwrap();
        f.register_verifier(&as_(OWNER), VERIFIER, RegistrationNumber::new("HRB 30011"))
            .unwrap();
        f
    }

    #[test]
    fn test_registration_is_owner_only() {
        let mut f = PlusDConsignments::new(FACTORY, OWNER);
        let err = f
            .register_consignor(&as_(CONSIGNOR), CONSIGNOR, RegistrationNumber::new("X"))
            .unwrap_err();
        assert_eq!(
            err,
            ConsignmentError::Unauthorized {
                caller: CONSIGNOR,
                required: Authority::RegistryOwner(OWNER),
            }
        );
        assert_eq!(f.owner(), OWNER);
    }

    #[test]
    fn test_registration_events_come_from_factory() {
        let mut f = PlusDConsignments::new(FACTORY, OWNER);
        let receipt = f
            .register_verifier(&as_(OWNER), VERIFIER, RegistrationNumber::new("HRB 30011"))
            .unwrap();
        assert_eq!(receipt.logs[0].emitter, FACTORY);
    }

    #[test]
    fn test_create_consignment() {
        let mut f = registered();
        let receipt = f
            .create_consignment(&as_(CONSIGNOR), CONSIGNEE, Requirements::new("explosive goods"))
            .unwrap();
        let address = receipt.output;

        assert_eq!(f.consignments(CONSIGNOR, 0), Some(address));
        assert_eq!(
            receipt.logs,
            vec![Log::new(
                FACTORY,
                PlusDEvent::ConsignmentCreated {
                    consignment: address
                }
            )]
        );

        let c = f.consignment(address).unwrap();
        assert_eq!(c.state(), ConsignmentState::ConsigneeAssigned);
        assert_eq!(c.consignor(), CONSIGNOR);
        assert_eq!(c.consignee(), CONSIGNEE);
        assert_eq!(c.address(), address);
    }

    #[test]
    fn test_instance_addresses_follow_nonce() {
        let mut f = registered();
        let first = f
            .create_unassigned_consignment(&as_(CONSIGNOR), Requirements::new("a"))
            .unwrap()
            .output;
        let second = f
            .create_unassigned_consignment(&as_(CONSIGNOR), Requirements::new("b"))
            .unwrap()
            .output;

        assert_eq!(first, compute_contract_address(FACTORY, 1));
        assert_eq!(second, compute_contract_address(FACTORY, 2));
        assert_eq!(f.consignments(CONSIGNOR, 1), Some(second));
        assert_eq!(f.consignment_count(CONSIGNOR), 2);
        assert_eq!(f.consignments(CONSIGNOR, 2), None);
    }

    #[test]
    fn test_unassigned_creation_starts_in_created() {
        let mut f = registered();
        let address = f
            .create_unassigned_consignment(&as_(CONSIGNOR), Requirements::new("fragile"))
            .unwrap()
            .output;
        let c = f.consignment(address).unwrap();
        assert_eq!(c.state(), ConsignmentState::ConsignmentCreated);
        assert!(c.consignee().is_zero());
    }

    #[test]
    fn test_unregistered_caller_cannot_create() {
        let mut f = registered();
        let err = f
            .create_consignment(&as_(CONSIGNEE), CONSIGNEE, Requirements::new("x"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(f.total_consignments(), 0);
        assert_eq!(f.consignment_count(CONSIGNEE), 0);
    }

    #[test]
    fn test_unregistered_consignee_is_invalid_party() {
        let mut f = registered();
        let err = f
            .create_consignment(&as_(CONSIGNOR), CONSIGNOR, Requirements::new("x"))
            .unwrap_err();
        assert_eq!(
            err,
            ConsignmentError::InvalidParty {
                address: CONSIGNOR,
                role: Role::Consignee,
            }
        );
        assert_eq!(f.total_consignments(), 0);
    }

    #[test]
    fn test_assign_verifier_through_factory() {
        let mut f = registered();
        let address = f
            .create_consignment(&as_(CONSIGNOR), CONSIGNEE, Requirements::new("x"))
            .unwrap()
            .output;

        // Someone other than the consignee.
        let err = f
            .assign_verifier(&as_(VERIFIER), address, VERIFIER)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);

        // Someone other than a registered verifier.
        let err = f
            .assign_verifier(&as_(CONSIGNEE), address, CONSIGNEE)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParty);

        f.assign_verifier(&as_(CONSIGNEE), address, VERIFIER)
            .unwrap();
        assert_eq!(f.consignment(address).unwrap().verifier(), VERIFIER);
    }

    #[test]
    fn test_unknown_consignment() {
        let mut f = registered();
        let stranger = Address::repeat_byte(0x99);
        for err in [
            f.assign_consignee(&as_(CONSIGNOR), stranger, CONSIGNEE)
                .unwrap_err(),
            f.assign_verifier(&as_(CONSIGNEE), stranger, VERIFIER)
                .unwrap_err(),
            f.verify_requirements(&as_(VERIFIER), stranger).unwrap_err(),
        ] {
            assert_eq!(err, ConsignmentError::UnknownConsignment(stranger));
        }
    }

    #[test]
    fn test_instance_error_propagates_unchanged() {
        let mut f = registered();
        let address = f
            .create_consignment(&as_(CONSIGNOR), CONSIGNEE, Requirements::new("x"))
            .unwrap()
            .output;
        let mut direct = f.consignment(address).unwrap().clone();

        let via_factory = f.verify_requirements(&as_(VERIFIER), address).unwrap_err();
        let via_instance = direct.verify_requirements(&as_(VERIFIER)).unwrap_err();
        assert_eq!(via_factory, via_instance);
    }
}
