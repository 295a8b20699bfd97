//! # Consignment Service
//!
//! Async front of the factory. Each call is one transaction: it runs under
//! the factory write lock, and on success its logs are journaled before the
//! lock is released, so journal order is commit order. A failed call changes
//! nothing and journals nothing.

use crate::config::ServiceConfig;
use crate::domain::Consignment;
use crate::errors::{ConfigError, ConsignmentError, ErrorKind};
use crate::factory::PlusDConsignments;
use crate::ports::inbound::ConsignmentsApi;
use crate::ports::outbound::{EventJournal, JournalEntry};

use async_trait::async_trait;
use shared_types::{Address, CallContext, Receipt, RegistrationNumber, Requirements, Role};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Statistics for the consignment service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Transactions that committed.
    pub transactions_applied: u64,
    /// Transactions that failed and were discarded.
    pub transactions_reverted: u64,
    /// Events written to the journal.
    pub events_emitted: u64,
    /// Failures of kind `Unauthorized`.
    pub unauthorized_rejections: u64,
}

/// The consignment service.
pub struct ConsignmentService<J: EventJournal> {
    /// Service configuration.
    config: ServiceConfig,
    /// Factory, registry and every instance.
    factory: Arc<RwLock<PlusDConsignments>>,
    /// Committed events.
    journal: Arc<RwLock<J>>,
    /// Service statistics.
    stats: Arc<RwLock<ServiceStats>>,
}

impl<J: EventJournal> Clone for ConsignmentService<J> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            factory: Arc::clone(&self.factory),
            journal: Arc::clone(&self.journal),
            stats: Arc::clone(&self.stats),
        }
    }
}

impl<J: EventJournal> ConsignmentService<J> {
    /// Creates a service with an empty registry.
    ///
    /// # Errors
    ///
    /// Fails if `config` does not validate.
    pub fn new(config: ServiceConfig, journal: J) -> Result<Self, ConfigError> {
        config.validate()?;
        let factory = PlusDConsignments::new(config.factory_address, config.owner);
        Ok(Self {
            config,
            factory: Arc::new(RwLock::new(factory)),
            journal: Arc::new(RwLock::new(journal)),
            stats: Arc::new(RwLock::new(ServiceStats::default())),
        })
    }

    /// Service configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Get current service statistics.
    pub async fn stats(&self) -> ServiceStats {
        self.stats.read().await.clone()
    }

    /// Journal entries with `sequence >= from`.
    pub async fn events_since(&self, from: u64) -> Vec<JournalEntry> {
        self.journal.read().await.since(from)
    }

    /// Journal entries for the named event.
    pub async fn events_named(&self, name: &str) -> Vec<JournalEntry> {
        self.journal.read().await.by_event(name)
    }

    /// Number of consignments `consignor` has created.
    pub async fn consignment_count(&self, consignor: Address) -> usize {
        self.factory.read().await.consignment_count(consignor)
    }

    /// Addresses registered for `role` under `number`.
    pub async fn registered_under(&self, role: Role, number: RegistrationNumber) -> Vec<Address> {
        self.factory
            .read()
            .await
            .registry()
            .registered_under(role, number)
    }

    /// Runs `op` as one transaction.
    async fn transact<T, F>(&self, op: F) -> Result<Receipt<T>, ConsignmentError>
    where
        T: Send,
        F: FnOnce(&mut PlusDConsignments) -> Result<Receipt<T>, ConsignmentError> + Send,
    {
        let mut factory = self.factory.write().await;
        let result = op(&mut *factory);

        match &result {
            Ok(receipt) => {
                {
                    let mut journal = self.journal.write().await;
                    for log in &receipt.logs {
                        let sequence = journal.append(log.clone());
                        if self.config.enable_tracing {
                            debug!(
                                sequence,
                                event = log.event.name(),
                                emitter = %log.emitter,
                                "Event journaled"
                            );
                        }
                    }
                }
                drop(factory);

                let mut stats = self.stats.write().await;
                stats.transactions_applied += 1;
                stats.events_emitted += receipt.logs.len() as u64;
            }
            Err(err) => {
                drop(factory);

                let mut stats = self.stats.write().await;
                stats.transactions_reverted += 1;
                if err.kind() == ErrorKind::Unauthorized {
                    stats.unauthorized_rejections += 1;
                }
            }
        }

        result
    }
}

#[async_trait]
impl<J: EventJournal + 'static> ConsignmentsApi for ConsignmentService<J> {
    #[instrument(skip_all, fields(tx_id = %Uuid::new_v4(), sender = %ctx.sender))]
    async fn register_consignor(
        &self,
        ctx: CallContext,
        consignor: Address,
        number: RegistrationNumber,
    ) -> Result<Receipt<()>, ConsignmentError> {
        self.transact(|f| f.register_consignor(&ctx, consignor, number))
            .await
    }

    #[instrument(skip_all, fields(tx_id = %Uuid::new_v4(), sender = %ctx.sender))]
    async fn register_consignee(
        &self,
        ctx: CallContext,
        consignee: Address,
        number: RegistrationNumber,
    ) -> Result<Receipt<()>, ConsignmentError> {
        self.transact(|f| f.register_consignee(&ctx, consignee, number))
            .await
    }

    #[instrument(skip_all, fields(tx_id = %Uuid::new_v4(), sender = %ctx.sender))]
    async fn register_verifier(
        &self,
        ctx: CallContext,
        verifier: Address,
        number: RegistrationNumber,
    ) -> Result<Receipt<()>, ConsignmentError> {
        self.transact(|f| f.register_verifier(&ctx, verifier, number))
            .await
    }

    #[instrument(skip_all, fields(tx_id = %Uuid::new_v4(), sender = %ctx.sender))]
    async fn create_consignment(
        &self,
        ctx: CallContext,
        consignee: Address,
        requirements: Requirements,
    ) -> Result<Receipt<Address>, ConsignmentError> {
        self.transact(|f| f.create_consignment(&ctx, consignee, requirements))
            .await
    }

    #[instrument(skip_all, fields(tx_id = %Uuid::new_v4(), sender = %ctx.sender))]
    async fn create_unassigned_consignment(
        &self,
        ctx: CallContext,
        requirements: Requirements,
    ) -> Result<Receipt<Address>, ConsignmentError> {
        self.transact(|f| f.create_unassigned_consignment(&ctx, requirements))
            .await
    }

    #[instrument(skip_all, fields(tx_id = %Uuid::new_v4(), sender = %ctx.sender, consignment = %consignment))]
    async fn assign_consignee(
        &self,
        ctx: CallContext,
        consignment: Address,
        consignee: Address,
    ) -> Result<Receipt<()>, ConsignmentError> {
        self.transact(|f| f.assign_consignee(&ctx, consignment, consignee))
            .await
    }

    #[instrument(skip_all, fields(tx_id = %Uuid::new_v4(), sender = %ctx.sender, consignment = %consignment))]
    async fn assign_verifier(
        &self,
        ctx: CallContext,
        consignment: Address,
        verifier: Address,
    ) -> Result<Receipt<()>, ConsignmentError> {
        self.transact(|f| f.assign_verifier(&ctx, consignment, verifier))
            .await
    }

    #[instrument(skip_all, fields(tx_id = %Uuid::new_v4(), sender = %ctx.sender, consignment = %consignment))]
    async fn verify_requirements(
        &self,
        ctx: CallContext,
        consignment: Address,
    ) -> Result<Receipt<()>, ConsignmentError> {
        self.transact(|f| f.verify_requirements(&ctx, consignment))
            .await
    }

    async fn consignments(&self, consignor: Address, index: usize) -> Option<Address> {
        self.factory.read().await.consignments(consignor, index)
    }

    async fn consignment(&self, address: Address) -> Option<Consignment> {
        self.factory.read().await.consignment(address).cloned()
    }

    async fn registration_number(&self, role: Role, address: Address) -> RegistrationNumber {
        self.factory
            .read()
            .await
            .registry()
            .registration_number(role, address)
    }
}

// =============================================================================
// TESTS
// =============================================================================
