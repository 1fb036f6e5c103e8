//! Wallet Import Format for private keys

use super::address::AddressError;
use super::network::WIF_VERSION;
use crate::crypto::{PrivateKey, SECRET_KEY_SIZE};
use crate::encoding::Base58Check;

/// Suffix some wallets append to mark a key whose public key is used compressed
pub const COMPRESSED_FLAG: u8 = 0x01;

/// WIF encoding and decoding
pub struct Wif;

impl Wif {
    /// `Base58Check(0x80, raw scalar)`
    pub fn export(key: &PrivateKey) -> String {
        Base58Check::encode(WIF_VERSION, &key.export_raw())
    }

    /// Decode a WIF string back into a private key.
    ///
    /// Accepts the 32-byte form and the 33-byte form carrying the
    /// compression flag.
    pub fn import(wif: &str) -> Result<PrivateKey, AddressError> {
        let decoded = Base58Check::decode(wif.trim())?;
        if decoded.version != WIF_VERSION {
            return Err(AddressError::UnknownVersion(decoded.version));
        }

        let scalar = match decoded.payload.as_slice() {
            raw if raw.len() == SECRET_KEY_SIZE => raw,
            [raw @ .., COMPRESSED_FLAG] if raw.len() == SECRET_KEY_SIZE => raw,
            other => return Err(AddressError::InvalidPayloadLength(other.len())),
        };

        Ok(PrivateKey::import(scalar)?)
    }
}
