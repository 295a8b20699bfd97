//! # Call Context
//!
//! Identity of the party invoking an operation. The hosting ledger
//! authenticates the sender; every authorization decision in PlusD is taken
//! against this value and nothing else.

use crate::value_objects::Address;
use serde::{Deserialize, Serialize};

/// Context of a single transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// Authenticated originator of the transaction.
    pub sender: Address,
}

impl CallContext {
    /// Creates a context for a transaction sent by `sender`.
    #[must_use]
    pub const fn new(sender: Address) -> Self {
        Self { sender }
    }
}

impl From<Address> for CallContext {
    fn from(sender: Address) -> Self {
        Self::new(sender)
    }
}
