//! Pay-to-pubkey-hash addresses
//!
//! `address = Base58Check(version(network), RIPEMD160(SHA256(uncompressed pubkey)))`

use super::network::NetworkType;
use crate::crypto::{hash160, KeyError, PublicKey};
use crate::encoding::{Base58Check, EncodingError};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of the hash160 carried by an address
pub const ADDRESS_HASH_SIZE: usize = 20;

/// Errors raised while parsing addresses and WIF strings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),
    #[error("Key error: {0}")]
    Key(#[from] KeyError),
    #[error("Unknown version byte: {0:#04x}")]
    UnknownVersion(u8),
    #[error("Invalid payload length: {0} bytes")]
    InvalidPayloadLength(usize),
}

/// A spendable address, computed from a public key for a given network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    network: NetworkType,
    hash: [u8; ADDRESS_HASH_SIZE],
}

impl Address {
    /// Derive the address of `public_key` on `network`
    pub fn derive(network: NetworkType, public_key: &PublicKey) -> Self {
        Self {
            network,
            hash: hash160(&public_key.uncompressed()),
        }
    }

    pub fn network(&self) -> NetworkType {
        self.network
    }

    /// RIPEMD160(SHA256(pubkey))
    pub fn hash160(&self) -> &[u8; ADDRESS_HASH_SIZE] {
        &self.hash
    }

    /// The Base58Check value behind the text form
    pub fn to_base58check(&self) -> Base58Check {
        Base58Check::new(self.network.address_version(), self.hash.to_vec())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58check())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decoded = Base58Check::decode(s.trim())?;
        let network = NetworkType::from_address_version(decoded.version)
            .ok_or(AddressError::UnknownVersion(decoded.version))?;

        let hash: [u8; ADDRESS_HASH_SIZE] = decoded
            .payload
            .as_slice()
            .try_into()
            .map_err(|_| AddressError::InvalidPayloadLength(decoded.payload.len()))?;

        Ok(Self { network, hash })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::PrivateKey;

    const FIXTURES: [(&str, &str, &str); 3] = [
        (
            "d41864467935fd11de1479e8712bc3df8455ace9b417db9bbb8c8622f5ba782f",
            "1KrGeH76a6JPQyr4DhCBzWH8GgdNNnZxNd",
            "mzNDwLC5P7jeC6KfwGAZpRVT8gE5MGVP6G",
        ),
        (
            "80a1641bca4f685b67a802ba1a9e35d16b30f4dd054ae557803330386876d629",
            "1H5sZz8MXujvEPAAXmKKyC3YYhBJRYQY8",
            "mfo3Ad57AZLzhLrmt6jh9tQNQYHtHmQdrq",
        ),
        (
            "ee9bbdf1ad6b95e616f869d4c984b7e4db2523138b61aca478fefb94543f5bc0",
            "1Kwz8ZycdCZWAW6uJoQhza5LJV8xv2Mmtd",
            "mzTwRd4bSDzkwcaX2NP5pVHfAUjftUtmnP",
        ),
    ];

    #[test]
    fn test_derive_known_addresses() {
        for (key_hex, main, test) in FIXTURES {
            let key = PrivateKey::from_hex(key_hex).unwrap();
            let public_key = key.public_key();
            assert_eq!(Address::derive(NetworkType::Main, public_key).to_string(), main);
            assert_eq!(Address::derive(NetworkType::Test, public_key).to_string(), test);
        }
    }

    #[test]
    fn test_address_format() {
        let key = PrivateKey::generate();
        // Mainnet addresses start with 1, testnet with m or n
        let main = Address::derive(NetworkType::Main, key.public_key()).to_string();
        let test = Address::derive(NetworkType::Test, key.public_key()).to_string();
        assert!(main.starts_with('1'));
        assert!(test.starts_with('m') || test.starts_with('n'));
    }

    #[test]
    fn test_parse_round_trip() {
        let (_, main, test) = FIXTURES[0];
        let parsed: Address = main.parse().unwrap();
        assert_eq!(parsed.network(), NetworkType::Main);
        assert_eq!(
            hex::encode(parsed.hash160()),
            "cec3b4412cfa2c25ec0c108afeb10e0ca8a8faf0"
        );
        assert_eq!(parsed.to_string(), main);

        let parsed: Address = test.parse().unwrap();
        assert_eq!(parsed.network(), NetworkType::Test);
        assert_eq!(parsed.to_string(), test);
    }

    #[test]
    fn test_parse_rejects_foreign_version() {
        let text = Base58Check::encode(0x05, &[0u8; 20]);
        assert_eq!(
            text.parse::<Address>(),
            Err(AddressError::UnknownVersion(0x05))
        );
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        let text = Base58Check::encode(0x00, &[0u8; 19]);
        assert_eq!(
            text.parse::<Address>(),
            Err(AddressError::InvalidPayloadLength(19))
        );
    }

    #[test]
    fn test_parse_rejects_bad_checksum() {
        let mut text = FIXTURES[0].1.to_string();
        text.pop();
        text.push('e');
        assert_eq!(
            text.parse::<Address>(),
            Err(AddressError::Encoding(EncodingError::ChecksumMismatch))
        );
    }
}
