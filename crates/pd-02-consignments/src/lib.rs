//! # PD-02 Consignments - Shipment Lifecycle
//!
//! **Component ID:** 2
//!
//! ## Purpose
//!
//! Tracks one shipment per consignment instance through a linear lifecycle.
//! The factory deploys instances on behalf of registered consignors and
//! checks every newly named party against the registry; the instance decides
//! who may call it and in which state.
//!
//! ```text
//! CONSIGNMENT_CREATED --assign_consignee--> CONSIGNEE_ASSIGNED
//!        CONSIGNEE_ASSIGNED --assign_verifier--> VERIFIER_ASSIGNED
//!        VERIFIER_ASSIGNED --verify_requirements--> REQUIREMENTS_VERIFIED
//! any state --assign_consignee--> CONSIGNEE_ASSIGNED (verifier cleared)
//! ```
//!
//! ## Operations
//!
//! | Operation | Caller | Allowed from |
//! |-----------|--------|--------------|
//! | `create_consignment` | registered consignor | - |
//! | `assign_consignee` | instance consignor | any state |
//! | `assign_verifier` | instance consignee | `CONSIGNEE_ASSIGNED` or later |
//! | `verify_requirements` | instance verifier | `VERIFIER_ASSIGNED` |
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Consignee set only from `CONSIGNEE_ASSIGNED` | `domain/consignment.rs` |
//! | Verifier set only from `VERIFIER_ASSIGNED` | `domain/consignment.rs` - cleared on reset |
//! | Consignor and requirements fixed | `domain/consignment.rs` - no setters |
//! | Failed calls change nothing | checks run before any write |
//! | Named parties are registered | `factory.rs` - `require_registered()` |
//! | Journal order is commit order | `service.rs` - journal written under factory lock |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod factory;
pub mod ports;
pub mod service;

pub use adapters::*;
pub use config::*;
pub use domain::*;
pub use errors::*;
pub use factory::PlusDConsignments;
pub use ports::*;
pub use service::{ConsignmentService, ServiceStats};

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::adapters::InMemoryJournal;
    pub use crate::config::ServiceConfig;
    pub use crate::domain::{Consignment, ConsignmentState, Operation};
    pub use crate::errors::{Authority, ConsignmentError, ErrorKind};
    pub use crate::factory::PlusDConsignments;
    pub use crate::ports::{ConsignmentsApi, EventJournal, JournalEntry};
    pub use crate::service::{ConsignmentService, ServiceStats};
    pub use shared_types::{
        Address, CallContext, Log, PlusDEvent, Receipt, RegistrationNumber, Requirements, Role,
    };
}

/// Component ID.
pub const COMPONENT_ID: u8 = 2;

/// Component name.
pub const COMPONENT_NAME: &str = "Consignments";
