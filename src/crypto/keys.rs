//! Private key management for the wallet
//!
//! Generation, import and fixed-width export of secp256k1 private keys
//! (same curve as Bitcoin), and derivation of the matching public key.

use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use secp256k1::{All, Secp256k1, SecretKey};
use std::fmt;
use thiserror::Error;

use super::pubkey::PublicKey;

/// Byte length of a secp256k1 scalar
pub const SECRET_KEY_SIZE: usize = 32;

/// Shared signing/verification context, built once on first use
pub(crate) static SECP: Lazy<Secp256k1<All>> = Lazy::new(Secp256k1::new);

/// Errors that can occur during key operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("Invalid key length: expected at most {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },
    #[error("Private key scalar is zero or not below the curve order")]
    ScalarOutOfRange,
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}

impl From<hex::FromHexError> for KeyError {
    fn from(e: hex::FromHexError) -> Self {
        KeyError::InvalidHex(e.to_string())
    }
}

/// A secp256k1 private key.
///
/// The scalar always lies in `[1, n-1]`; both [`PrivateKey::generate`] and
/// [`PrivateKey::import`] guarantee it, so every instance is usable.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    secret_key: SecretKey,
    public_key: PublicKey,
}

impl PrivateKey {
    /// Generate a new random private key from the OS random source
    pub fn generate() -> Self {
        let (secret_key, public_key) = SECP.generate_keypair(&mut OsRng);
        Self {
            secret_key,
            public_key: PublicKey::from(public_key),
        }
    }

    /// Import a private key from raw big-endian scalar bytes.
    ///
    /// Inputs shorter than 32 bytes are treated as having leading zeros.
    /// The public point is re-derived by base point multiplication.
    pub fn import(raw: &[u8]) -> Result<Self, KeyError> {
        if raw.len() > SECRET_KEY_SIZE {
            return Err(KeyError::InvalidLength {
                expected: SECRET_KEY_SIZE,
                got: raw.len(),
            });
        }

        let mut scalar = [0u8; SECRET_KEY_SIZE];
        scalar[SECRET_KEY_SIZE - raw.len()..].copy_from_slice(raw);

        let secret_key =
            SecretKey::from_slice(&scalar).map_err(|_| KeyError::ScalarOutOfRange)?;
        Ok(Self::from_secret_key(secret_key))
    }

    /// Create a private key from an existing secret key
    pub fn from_secret_key(secret_key: SecretKey) -> Self {
        let public_key = secp256k1::PublicKey::from_secret_key(&SECP, &secret_key);
        Self {
            secret_key,
            public_key: PublicKey::from(public_key),
        }
    }

    /// Create a private key from a hex-encoded scalar
    pub fn from_hex(hex_key: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_key.trim())?;
        Self::import(&bytes)
    }

    /// Export the scalar as exactly 32 big-endian bytes (leading zeros kept)
    pub fn export_raw(&self) -> [u8; SECRET_KEY_SIZE] {
        self.secret_key.secret_bytes()
    }

    /// Get the private key as a hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.export_raw())
    }

    /// The public key derived from this private key
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}
