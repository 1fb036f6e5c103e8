//! Bitcoin network selection
//!
//! The network decides the address version byte and the magic number
//! carried in every P2P message header.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Network Constants
// =============================================================================

/// Message magic of the main network
pub const MAIN_NET_MAGIC: u32 = 0xd9b4_bef9;

/// Message magic of testnet3
pub const TEST_NET_MAGIC: u32 = 0x0709_110b;

/// Address version byte on the main network
pub const MAIN_ADDRESS_VERSION: u8 = 0x00;

/// Address version byte on the test network
pub const TEST_ADDRESS_VERSION: u8 = 0x6f;

/// Version byte reserved for WIF private keys
pub const WIF_VERSION: u8 = 0x80;

// =============================================================================
// Network Type
// =============================================================================

/// The Bitcoin network a key, address or message belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    #[default]
    Main,
    Test,
}

impl NetworkType {
    /// Version byte prefixed to addresses on this network
    pub fn address_version(self) -> u8 {
        match self {
            NetworkType::Main => MAIN_ADDRESS_VERSION,
            NetworkType::Test => TEST_ADDRESS_VERSION,
        }
    }

    /// Magic number written at the start of every message header
    pub fn magic(self) -> u32 {
        match self {
            NetworkType::Main => MAIN_NET_MAGIC,
            NetworkType::Test => TEST_NET_MAGIC,
        }
    }

    /// Resolve the network from a header magic
    pub fn from_magic(magic: u32) -> Result<Self, ConfigError> {
        match magic {
            MAIN_NET_MAGIC => Ok(NetworkType::Main),
            TEST_NET_MAGIC => Ok(NetworkType::Test),
            other => Err(ConfigError::UnknownNetwork(format!("magic {:#010x}", other))),
        }
    }

    /// Resolve the network from an address version byte
    pub fn from_address_version(version: u8) -> Option<Self> {
        match version {
            MAIN_ADDRESS_VERSION => Some(NetworkType::Main),
            TEST_ADDRESS_VERSION => Some(NetworkType::Test),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NetworkType::Main => "main",
            NetworkType::Test => "test",
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NetworkType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(NetworkType::Main),
            "test" | "testnet" | "testnet3" => Ok(NetworkType::Test),
            _ => Err(ConfigError::UnknownNetwork(s.to_string())),
        }
    }
}
