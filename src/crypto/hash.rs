//! Cryptographic hashing utilities for the wallet
//!
//! Provides the SHA-256 / RIPEMD-160 pipeline used for message checksums,
//! Base58Check checksums and address derivation.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Computes SHA-256 hash of the input data
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Computes double SHA-256 hash (SHA-256 of SHA-256)
/// Used for P2P message checksums and Base58Check checksums
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Computes RIPEMD-160 hash of the input data
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// RIPEMD160(SHA256(data)), the digest behind every pay-to-pubkey-hash address
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}

/// First four bytes of the double SHA-256, as carried in headers and Base58Check
pub fn checksum4(data: &[u8]) -> [u8; 4] {
    let hash = double_sha256(data);
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Computes SHA-256 hash and returns it as a hex string
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

/// Computes double SHA-256 hash and returns it as a hex string
pub fn double_sha256_hex(data: &[u8]) -> String {
    hex::encode(double_sha256(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256() {
        let data = b"hello world";
        let hash = sha256(data);
        assert_eq!(hash.len(), 32);
        assert_eq!(
            sha256_hex(data),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_double_sha256_of_empty_input() {
        // The checksum every empty-payload message carries
        assert_eq!(
            double_sha256_hex(b""),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
        assert_eq!(checksum4(b""), [0x5d, 0xf6, 0xe0, 0xe2]);
    }

    #[test]
    fn test_ripemd160() {
        assert_eq!(
            hex::encode(ripemd160(b"")),
            "9c1185a5c5e9fc54612808977ee8f548b2258d31"
        );
    }

    #[test]
    fn test_hash160_of_generator_point() {
        let pubkey = hex::decode(
            "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
             483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
        )
        .unwrap();
        assert_eq!(
            hex::encode(hash160(&pubkey)),
            "91b24bf9f5288532960ac687abb035127b1d28a5"
        );
    }
}
