//! # Service Configuration
//!
//! | Variable | Required | Description |
//! |----------|----------|-------------|
//! | `PD_OWNER_ADDRESS` | yes | Registry owner, hex with or without `0x` |
//! | `PD_FACTORY_ADDRESS` | no | Factory address (default [`DEFAULT_FACTORY_ADDRESS`]) |
//! | `PD_ENABLE_TRACING` | no | Log every journaled event at debug level |

use crate::errors::ConfigError;
use shared_types::Address;
use std::env;

/// Factory address used when none is configured.
pub const DEFAULT_FACTORY_ADDRESS: Address = Address::repeat_byte(0xfa);

/// Consignment service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Registry owner, the only address allowed to register participants.
    pub owner: Address,
    /// Address of the factory; registry and creation events come from it.
    pub factory_address: Address,
    /// Log every journaled event.
    pub enable_tracing: bool,
}

impl ServiceConfig {
    /// Configuration with the default factory address.
    #[must_use]
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            factory_address: DEFAULT_FACTORY_ADDRESS,
            enable_tracing: false,
        }
    }

    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`ServiceConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Missing`] if `PD_OWNER_ADDRESS` is unset.
    /// - [`ConfigError::InvalidAddress`] if an address does not decode.
    /// - [`ConfigError::ZeroOwner`] if the owner is the zero address.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let owner = lookup("PD_OWNER_ADDRESS").ok_or(ConfigError::Missing("PD_OWNER_ADDRESS"))?;
        let owner = parse_address("PD_OWNER_ADDRESS", &owner)?;

        let factory_address = match lookup("PD_FACTORY_ADDRESS") {
            Some(raw) => parse_address("PD_FACTORY_ADDRESS", &raw)?,
            None => DEFAULT_FACTORY_ADDRESS,
        };

        let enable_tracing = lookup("PD_ENABLE_TRACING")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let config = Self {
            owner,
            factory_address,
            enable_tracing,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration is usable.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroOwner`] if the owner is the zero address.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.owner.is_zero() {
            return Err(ConfigError::ZeroOwner);
        }
        Ok(())
    }
}

fn parse_address(var: &'static str, raw: &str) -> Result<Address, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|source| ConfigError::InvalidAddress { var, source })
}
