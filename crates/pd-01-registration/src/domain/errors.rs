//! Registry error types.

use shared_types::Address;
use thiserror::Error;

/// Errors raised by registry writes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Caller is not the registry owner.
    #[error("unauthorized: {caller:?} is not the registry owner {owner:?}")]
    Unauthorized {
        /// Address that attempted the write.
        caller: Address,
        /// The registry owner.
        owner: Address,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_display() {
        let err = RegistrationError::Unauthorized {
            caller: Address::repeat_byte(1),
            owner: Address::repeat_byte(2),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("unauthorized"));
        assert!(msg.contains(&Address::repeat_byte(2).to_hex()));
    }
}
