//! # Error Types
//!
//! Errors raised while decoding ledger primitives from their text form.

use thiserror::Error;

/// Errors that can occur when parsing addresses and fixed-width values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Input was not valid hexadecimal.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Decoded byte length does not match the expected width.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_error_display() {
        let err = CodecError::InvalidLength {
            expected: 20,
            actual: 3,
        };
        assert_eq!(err.to_string(), "invalid length: expected 20 bytes, got 3");
    }
}
