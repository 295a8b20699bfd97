//! # Registry
//!
//! Owner-gated mapping from `(role, address)` to company registration number.
//!
//! Writes are upserts: registering an address again for the same role
//! replaces its number. Entries are never deleted. Reads never fail; an
//! unknown address reads as [`RegistrationNumber::ZERO`].

use super::entities::RegistryEntry;
use super::errors::RegistrationError;
use pd_telemetry::log_registry_event;
use shared_types::{Address, CallContext, Log, PlusDEvent, Receipt, RegistrationNumber, Role};
use std::collections::HashMap;

/// The participant registry.
#[derive(Debug, Clone)]
pub struct Registry {
    /// Address events are emitted from.
    address: Address,
    /// Administrator, fixed at construction.
    owner: Address,
    /// Registration numbers keyed by role and address.
    entries: HashMap<(Role, Address), RegistrationNumber>,
}

impl Registry {
    /// Creates an empty registry administered by `owner`.
    #[must_use]
    pub fn new(address: Address, owner: Address) -> Self {
        Self {
            address,
            owner,
            entries: HashMap::new(),
        }
    }

    /// Address the registry emits events from.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// The registry owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    // =========================================================================
    // WRITES (owner only)
    // =========================================================================

    /// Binds `address` to `number` for `role`, emitting `<Role>Registered`.
    ///
    /// # Errors
    ///
    /// [`RegistrationError::Unauthorized`] if the caller is not the owner. No
    /// state changes and no event is emitted in that case.
    pub fn register(
        &mut self,
        ctx: &CallContext,
        role: Role,
        address: Address,
        number: RegistrationNumber,
    ) -> Result<Receipt<()>, RegistrationError> {
        if ctx.sender != self.owner {
            log_registry_event!(
                warn,
                "Rejected registration from non-owner",
                role,
                address,
                caller = %ctx.sender
            );
            return Err(RegistrationError::Unauthorized {
                caller: ctx.sender,
                owner: self.owner,
            });
        }

        let previous = self.entries.insert((role, address), number);

        log_registry_event!(
            info,
            "Participant registered",
            role,
            address,
            registration_number = %number,
            overwritten = previous.is_some()
        );

        Ok(Receipt::single(
            (),
            Log::new(self.address, PlusDEvent::registered(role, address, number)),
        ))
    }

    /// Registers `address` as consignor.
    ///
    /// # Errors
    ///
    /// See [`Registry::register`].
    pub fn register_consignor(
        &mut self,
        ctx: &CallContext,
        address: Address,
        number: RegistrationNumber,
    ) -> Result<Receipt<()>, RegistrationError> {
        self.register(ctx, Role::Consignor, address, number)
    }

    /// Registers `address` as consignee.
    ///
    /// # Errors
    ///
    /// See [`Registry::register`].
    pub fn register_consignee(
        &mut self,
        ctx: &CallContext,
        address: Address,
        number: RegistrationNumber,
    ) -> Result<Receipt<()>, RegistrationError> {
        self.register(ctx, Role::Consignee, address, number)
    }

    /// Registers `address` as verifier.
    ///
    /// # Errors
    ///
    /// See [`Registry::register`].
    pub fn register_verifier(
        &mut self,
        ctx: &CallContext,
        address: Address,
        number: RegistrationNumber,
    ) -> Result<Receipt<()>, RegistrationError> {
        self.register(ctx, Role::Verifier, address, number)
    }

    // =========================================================================
    // READS (unrestricted)
    // =========================================================================

    /// Registration number of `address` for `role`; zero if unregistered.
    #[must_use]
    pub fn registration_number(&self, role: Role, address: Address) -> RegistrationNumber {
        self.entries
            .get(&(role, address))
            .copied()
            .unwrap_or(RegistrationNumber::ZERO)
    }

    /// Consignor registration number of `address`.
    #[must_use]
    pub fn consignors(&self, address: Address) -> RegistrationNumber {
        self.registration_number(Role::Consignor, address)
    }

    /// Consignee registration number of `address`.
    #[must_use]
    pub fn consignees(&self, address: Address) -> RegistrationNumber {
        self.registration_number(Role::Consignee, address)
    }

    /// Verifier registration number of `address`.
    #[must_use]
    pub fn verifiers(&self, address: Address) -> RegistrationNumber {
        self.registration_number(Role::Verifier, address)
    }

    /// True if `address` holds a non-zero registration number for `role`.
    #[must_use]
    pub fn is_registered(&self, role: Role, address: Address) -> bool {
        !self.registration_number(role, address).is_zero()
    }

    /// The full entry for `(role, address)`, if one was ever written.
    #[must_use]
    pub fn entry(&self, role: Role, address: Address) -> Option<RegistryEntry> {
        self.entries
            .get(&(role, address))
            .map(|&company_registration_number| RegistryEntry {
                role,
                address,
                company_registration_number,
            })
    }

    /// Addresses registered for `role` under `number`, in address order.
    #[must_use]
    pub fn registered_under(&self, role: Role, number: RegistrationNumber) -> Vec<Address> {
        let mut found: Vec<Address> = self
            .entries
            .iter()
            .filter(|((r, _), n)| *r == role && **n == number)
            .map(|((_, address), _)| *address)
            .collect();
        found.sort();
        found
    }

    /// Every entry, ordered by role then address.
    #[must_use]
    pub fn entries(&self) -> Vec<RegistryEntry> {
        let mut all: Vec<RegistryEntry> = self
            .entries
            .iter()
            .map(|(&(role, address), &company_registration_number)| RegistryEntry {
                role,
                address,
                company_registration_number,
            })
            .collect();
        all.sort_by_key(|e| (e.role, e.address));
        all
    }
}

// =============================================================================
// TESTS
// =============================================================================
