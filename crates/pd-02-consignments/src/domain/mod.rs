//! # Domain Layer (Inner Hexagon)
//!
//! Pure business logic for consignment records.
//! NO I/O, NO async, NO registry knowledge.

pub mod consignment;
pub mod invariants;
pub mod state;

pub use consignment::*;
pub use invariants::*;
pub use state::*;
