//! # Domain Layer
//!
//! Pure registry logic. NO I/O, NO async.

pub mod entities;
pub mod errors;
pub mod registry;

pub use entities::*;
pub use errors::*;
pub use registry::*;
