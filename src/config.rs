//! Wallet node configuration
//!
//! Settings that shape the version handshake and select the network.
//! Loaded from a JSON file; every field falls back to its default.

use crate::core::NetworkType;
use crate::network::{ServiceFlags, DEFAULT_USER_AGENT, PROTOCOL_VERSION};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Wallet node configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Network to derive addresses and frame messages for
    pub network: NetworkType,
    /// User agent advertised in the version message
    pub user_agent: String,
    /// Protocol version advertised in the version message
    pub protocol_version: i32,
    /// Raw service bits advertised in the version message
    pub services: u64,
    /// Whether the peer should relay transactions to us
    pub relay: bool,
    /// Height of our best block
    pub start_height: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkType::Main,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            protocol_version: PROTOCOL_VERSION,
            services: 0,
            relay: false,
            start_height: 0,
        }
    }
}

impl Config {
    /// Load the configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        let config = Self::from_json(&data)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse the configuration from JSON text
    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(data)?)
    }

    /// Advertised services as flags
    pub fn service_flags(&self) -> ServiceFlags {
        ServiceFlags::from_bits_retain(self.services)
    }
}
