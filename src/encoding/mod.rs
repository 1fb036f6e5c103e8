//! Text encodings for keys and addresses
//!
//! - Base58 with the Bitcoin alphabet
//! - Base58Check: version byte, payload and double SHA-256 checksum

pub mod base58;
pub mod base58check;

pub use base58check::{Base58Check, CHECKSUM_SIZE};

use thiserror::Error;

/// Errors raised while decoding Base58 / Base58Check text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Invalid base58 encoding: {0}")]
    InvalidBase58(String),
    #[error("Base58Check data too short: {0} bytes")]
    MalformedInput(usize),
    #[error("Base58Check checksum mismatch")]
    ChecksumMismatch,
}
