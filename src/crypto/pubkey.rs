//! Public key encodings
//!
//! Uncompressed: `0x04 ‖ X ‖ Y`. Compressed: `0x02|0x03 ‖ X`, the tag
//! carrying the parity of `Y`. Coordinates are always 32 bytes wide.

use std::fmt;

use super::keys::KeyError;

/// Byte length of one affine coordinate
pub const COORDINATE_SIZE: usize = 32;

/// Length of the compressed encoding
pub const COMPRESSED_SIZE: usize = 1 + COORDINATE_SIZE;

/// Length of the uncompressed encoding
pub const UNCOMPRESSED_SIZE: usize = 1 + 2 * COORDINATE_SIZE;

/// Leading tag of an encoded public key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PubkeyFormat {
    CompressedEven = 0x02,
    CompressedOdd = 0x03,
    Uncompressed = 0x04,
}

/// A point on secp256k1, derived from a private key
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey {
    inner: secp256k1::PublicKey,
}

impl PublicKey {
    /// Parse a public key from either its compressed or uncompressed encoding
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        secp256k1::PublicKey::from_slice(bytes)
            .map(Self::from)
            .map_err(|e| KeyError::InvalidPublicKey(e.to_string()))
    }

    /// Parse a public key from hex
    pub fn from_hex(hex_key: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_key.trim())?;
        Self::from_bytes(&bytes)
    }

    /// The X coordinate, big-endian, zero-padded to 32 bytes
    pub fn x(&self) -> [u8; COORDINATE_SIZE] {
        let full = self.inner.serialize_uncompressed();
        let mut x = [0u8; COORDINATE_SIZE];
        x.copy_from_slice(&full[1..1 + COORDINATE_SIZE]);
        x
    }

    /// The Y coordinate, big-endian, zero-padded to 32 bytes
    pub fn y(&self) -> [u8; COORDINATE_SIZE] {
        let full = self.inner.serialize_uncompressed();
        let mut y = [0u8; COORDINATE_SIZE];
        y.copy_from_slice(&full[1 + COORDINATE_SIZE..]);
        y
    }

    /// Tag used by the compressed encoding
    pub fn compressed_format(&self) -> PubkeyFormat {
        if self.y()[COORDINATE_SIZE - 1] & 1 == 1 {
            PubkeyFormat::CompressedOdd
        } else {
            PubkeyFormat::CompressedEven
        }
    }

    /// `0x04 ‖ X ‖ Y`
    pub fn uncompressed(&self) -> [u8; UNCOMPRESSED_SIZE] {
        let mut out = [0u8; UNCOMPRESSED_SIZE];
        out[0] = PubkeyFormat::Uncompressed as u8;
        out[1..1 + COORDINATE_SIZE].copy_from_slice(&self.x());
        out[1 + COORDINATE_SIZE..].copy_from_slice(&self.y());
        out
    }

    /// `(0x02 if Y is even else 0x03) ‖ X`
    pub fn compressed(&self) -> [u8; COMPRESSED_SIZE] {
        let mut out = [0u8; COMPRESSED_SIZE];
        out[0] = self.compressed_format() as u8;
        out[1..].copy_from_slice(&self.x());
        out
    }

    /// Compressed encoding as hex
    pub fn to_hex(&self) -> String {
        hex::encode(self.compressed())
    }
}

impl From<secp256k1::PublicKey> for PublicKey {
    fn from(inner: secp256k1::PublicKey) -> Self {
        Self { inner }
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::PrivateKey;

    const FIXTURE_UNCOMPRESSED: &str = "0428640b78c0ad482b16a74d595ecc5c8017ff9b4fffa782e6acdf35305096de94\
                                        d36e14684b768c01e8dac6e361d2a67b63d368008ea77cf40f19ddc1b7ad0fdf";

    #[test]
    fn test_uncompressed_layout() {
        let key = PrivateKey::from_hex(
            "d41864467935fd11de1479e8712bc3df8455ace9b417db9bbb8c8622f5ba782f",
        )
        .unwrap();
        let encoded = key.public_key().uncompressed();
        assert_eq!(encoded.len(), UNCOMPRESSED_SIZE);
        assert_eq!(hex::encode(encoded), FIXTURE_UNCOMPRESSED);
    }

    #[test]
    fn test_compressed_odd_and_even_tags() {
        // Y of the fixture key is odd
        let odd = PublicKey::from_hex(FIXTURE_UNCOMPRESSED).unwrap();
        assert_eq!(odd.compressed_format(), PubkeyFormat::CompressedOdd);
        assert_eq!(odd.compressed()[0], 0x03);

        // Y of the generator point is even
        let generator = PrivateKey::import(&[0x01]).unwrap();
        let compressed = generator.public_key().compressed();
        assert_eq!(
            hex::encode(compressed),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
    }

    #[test]
    fn test_encodings_match_library_serialization() {
        for _ in 0..16 {
            let key = PrivateKey::generate();
            let public = key.public_key();
            assert_eq!(public.compressed(), public.inner.serialize());
            assert_eq!(public.uncompressed(), public.inner.serialize_uncompressed());
        }
    }

    #[test]
    fn test_parse_both_forms() {
        let key = PrivateKey::generate();
        let public = *key.public_key();
        assert_eq!(PublicKey::from_bytes(&public.compressed()).unwrap(), public);
        assert_eq!(PublicKey::from_bytes(&public.uncompressed()).unwrap(), public);
    }

    #[test]
    fn test_parse_rejects_off_curve_bytes() {
        let mut bytes = [0u8; COMPRESSED_SIZE];
        bytes[0] = 0x05;
        assert!(matches!(
            PublicKey::from_bytes(&bytes),
            Err(KeyError::InvalidPublicKey(_))
        ));
    }
}
