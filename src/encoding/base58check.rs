//! Base58Check: `Base58(version ‖ payload ‖ checksum4(version ‖ payload))`
//!
//! The checksum is never trusted on decode; it is always recomputed.

use std::fmt;
use std::str::FromStr;

use super::{base58, EncodingError};
use crate::crypto::checksum4;

/// Length of the trailing checksum
pub const CHECKSUM_SIZE: usize = 4;

/// A version-prefixed payload with a checksummed Base58 text form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Base58Check {
    pub version: u8,
    pub payload: Vec<u8>,
}

impl Base58Check {
    pub fn new(version: u8, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            version,
            payload: payload.into(),
        }
    }

    /// Raw bytes: version, payload, then the 4-byte checksum
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(1 + self.payload.len() + CHECKSUM_SIZE);
        data.push(self.version);
        data.extend_from_slice(&self.payload);
        let checksum = checksum4(&data);
        data.extend_from_slice(&checksum);
        data
    }

    /// Encode `version` and `payload` straight to text
    pub fn encode(version: u8, payload: &[u8]) -> String {
        Self::new(version, payload).to_string()
    }

    /// Decode text, verifying the checksum
    pub fn decode(text: &str) -> Result<Self, EncodingError> {
        let raw = base58::decode(text)?;

        // At least one version byte, one payload byte and the checksum
        if raw.len() <= CHECKSUM_SIZE + 1 {
            return Err(EncodingError::MalformedInput(raw.len()));
        }

        let (data, checksum) = raw.split_at(raw.len() - CHECKSUM_SIZE);
        if checksum != &checksum4(data)[..] {
            return Err(EncodingError::ChecksumMismatch);
        }

        Ok(Self::new(data[0], &data[1..]))
    }
}

impl fmt::Display for Base58Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&base58::encode(&self.to_bytes()))
    }
}

impl FromStr for Base58Check {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}
