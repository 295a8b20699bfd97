//! # Value Objects
//!
//! Immutable ledger primitives. These types are defined by their value, not
//! identity.

use crate::errors::CodecError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// ADDRESS (20 bytes)
// =============================================================================

/// A 20-byte ledger address identifying a participant or a contract instance.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The zero address (0x0000...0000). Stands for "unassigned".
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an address from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Creates an address whose every byte is `byte`. Handy for fixtures.
    #[must_use]
    pub const fn repeat_byte(byte: u8) -> Self {
        Self([byte; 20])
    }

    /// Creates an address from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        <[u8; 20]>::try_from(slice).ok().map(Self)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Full `0x`-prefixed lowercase hex form.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "...")?;
        for byte in &self.0[18..] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for Address {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|e| CodecError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes).ok_or(CodecError::InvalidLength {
            expected: 20,
            actual: bytes.len(),
        })
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl From<Address> for [u8; 20] {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

// =============================================================================
// HASH (32 bytes)
// =============================================================================

/// A 32-byte Keccak-256 digest, used for event topics.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    /// The zero hash.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates a hash from a 32-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

// =============================================================================
// BYTES32 (fixed-width, null-padded)
// =============================================================================

/// Width of every fixed-width ledger field.
pub const BYTES32_LEN: usize = 32;

/// A 32-byte null-padded value.
///
/// Encoding pads short input with trailing zero bytes and truncates long
/// input to 32 bytes. Decoding strips the trailing zero bytes again.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Bytes32(pub [u8; BYTES32_LEN]);

impl Bytes32 {
    /// All-zero value. Represents absence.
    pub const ZERO: Self = Self([0u8; BYTES32_LEN]);

    /// Encodes arbitrary bytes, padding or truncating to 32 bytes.
    #[must_use]
    pub fn from_slice_padded(bytes: &[u8]) -> Self {
        let mut out = [0u8; BYTES32_LEN];
        let len = bytes.len().min(BYTES32_LEN);
        out[..len].copy_from_slice(&bytes[..len]);
        Self(out)
    }

    /// Encodes UTF-8 text, padding or truncating to 32 bytes.
    ///
    /// Truncation backs off to a character boundary, so the stored bytes
    /// always decode as valid UTF-8.
    #[must_use]
    pub fn from_str_padded(text: &str) -> Self {
        let mut end = text.len().min(BYTES32_LEN);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        Self::from_slice_padded(&text.as_bytes()[..end])
    }

    /// Returns the raw 32 bytes including padding.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; BYTES32_LEN] {
        &self.0
    }

    /// Returns the value with trailing null bytes stripped.
    #[must_use]
    pub fn trimmed(&self) -> &[u8] {
        let end = self
            .0
            .iter()
            .rposition(|&b| b != 0)
            .map_or(0, |last| last + 1);
        &self.0[..end]
    }

    /// Decodes the value as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(self.trimmed()).into_owned()
    }

    /// Returns true if every byte is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; BYTES32_LEN]
    }

    /// Full `0x`-prefixed hex form, padding included.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bytes32({:?})", self.to_string_lossy())
    }
}

impl From<[u8; BYTES32_LEN]> for Bytes32 {
    fn from(bytes: [u8; BYTES32_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<&str> for Bytes32 {
    fn from(text: &str) -> Self {
        Self::from_str_padded(text)
    }
}

/// Declares a semantic wrapper around [`Bytes32`].
macro_rules! padded_value {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        pub struct $name(pub Bytes32);

        impl $name {
            /// All-zero value. Represents absence.
            pub const ZERO: Self = Self(Bytes32::ZERO);

            /// Encodes text, padding or truncating to 32 bytes.
            #[must_use]
            pub fn new(text: &str) -> Self {
                Self(Bytes32::from_str_padded(text))
            }

            /// Returns the padded 32-byte form.
            #[must_use]
            pub const fn as_bytes32(&self) -> &Bytes32 {
                &self.0
            }

            /// Returns true if this is the all-zero value.
            #[must_use]
            pub fn is_zero(&self) -> bool {
                self.0.is_zero()
            }

            /// Decodes the value as text with trailing nulls stripped.
            #[must_use]
            pub fn to_string_lossy(&self) -> String {
                self.0.to_string_lossy()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({:?})"), self.0.to_string_lossy())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0.to_string_lossy())
            }
        }

        impl From<&str> for $name {
            fn from(text: &str) -> Self {
                Self::new(text)
            }
        }

        impl From<Bytes32> for $name {
            fn from(bytes: Bytes32) -> Self {
                Self(bytes)
            }
        }
    };
}

padded_value! {
    /// Company registration number binding a real-world identity to an address
    /// (e.g. `"HRB 27814"`).
    RegistrationNumber
}

padded_value! {
    /// Shipment handling requirements (e.g. `"explosive goods"`).
    Requirements
}

// =============================================================================
// TESTS
// =============================================================================
