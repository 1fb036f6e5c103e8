//! Cryptographic utilities for the wallet
//!
//! This module provides:
//! - SHA-256 / RIPEMD-160 hashing
//! - secp256k1 private key management
//! - Public key encodings

pub mod hash;
pub mod keys;
pub mod pubkey;

pub use hash::{
    checksum4, double_sha256, double_sha256_hex, hash160, ripemd160, sha256, sha256_hex,
};
pub use keys::{KeyError, PrivateKey, SECRET_KEY_SIZE};
pub use pubkey::{PubkeyFormat, PublicKey, COMPRESSED_SIZE, COORDINATE_SIZE, UNCOMPRESSED_SIZE};
