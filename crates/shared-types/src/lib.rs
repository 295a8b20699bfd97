//! # Shared Types Crate
//!
//! This crate contains the ledger primitives used by every PlusD component:
//! addresses, fixed-width padded values, participant roles, the transaction
//! call context and the event records written to the append-only journal.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: all cross-crate types are defined here.
//! - **Sender-Only Identity**: the caller of an operation is carried solely by
//!   [`CallContext::sender`]; payloads never repeat it.
//! - **Explicit Codec**: 32-byte fields are value types with a pad/truncate
//!   codec at the boundary, never raw strings.

pub mod context;
pub mod errors;
pub mod events;
pub mod roles;
pub mod services;
pub mod value_objects;

pub use context::CallContext;
pub use errors::*;
pub use events::*;
pub use roles::Role;
pub use services::*;
pub use value_objects::*;
