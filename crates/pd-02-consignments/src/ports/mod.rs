//! # Ports Layer (Middle Hexagon)
//!
//! - **Driving Port (Inbound)**: `ConsignmentsApi`
//! - **Driven Port (Outbound)**: `EventJournal`
//!
//! No concrete implementations in this module.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
