//! # Driving Port (API - Inbound)
//!
//! The transaction surface PlusD exposes to participants. Every mutating
//! call is atomic: it either applies in full and returns a receipt, or
//! returns an error and leaves no trace.

use crate::domain::Consignment;
use crate::errors::ConsignmentError;
use async_trait::async_trait;
use shared_types::{Address, CallContext, Receipt, RegistrationNumber, Requirements, Role};

/// Public API of the consignment component.
#[async_trait]
pub trait ConsignmentsApi: Send + Sync {
    /// Owner registers a consignor.
    async fn register_consignor(
        &self,
        ctx: CallContext,
        consignor: Address,
        number: RegistrationNumber,
    ) -> Result<Receipt<()>, ConsignmentError>;

    /// Owner registers a consignee.
    async fn register_consignee(
        &self,
        ctx: CallContext,
        consignee: Address,
        number: RegistrationNumber,
    ) -> Result<Receipt<()>, ConsignmentError>;

    /// Owner registers a verifier.
    async fn register_verifier(
        &self,
        ctx: CallContext,
        verifier: Address,
        number: RegistrationNumber,
    ) -> Result<Receipt<()>, ConsignmentError>;

    /// Registered consignor creates a consignment for a registered consignee.
    async fn create_consignment(
        &self,
        ctx: CallContext,
        consignee: Address,
        requirements: Requirements,
    ) -> Result<Receipt<Address>, ConsignmentError>;

    /// Registered consignor creates a consignment with no consignee yet.
    async fn create_unassigned_consignment(
        &self,
        ctx: CallContext,
        requirements: Requirements,
    ) -> Result<Receipt<Address>, ConsignmentError>;

    /// Consignor (re)assigns the consignee of `consignment`.
    async fn assign_consignee(
        &self,
        ctx: CallContext,
        consignment: Address,
        consignee: Address,
    ) -> Result<Receipt<()>, ConsignmentError>;

    /// Consignee (re)assigns the verifier of `consignment`.
    async fn assign_verifier(
        &self,
        ctx: CallContext,
        consignment: Address,
        verifier: Address,
    ) -> Result<Receipt<()>, ConsignmentError>;

    /// Verifier attests the requirements of `consignment`.
    async fn verify_requirements(
        &self,
        ctx: CallContext,
        consignment: Address,
    ) -> Result<Receipt<()>, ConsignmentError>;

    /// The `index`-th consignment created by `consignor`.
    async fn consignments(&self, consignor: Address, index: usize) -> Option<Address>;

    /// Snapshot of the instance at `address`.
    async fn consignment(&self, address: Address) -> Option<Consignment>;

    /// Registration number of `address` for `role`, zero if unregistered.
    async fn registration_number(&self, role: Role, address: Address) -> RegistrationNumber;
}
