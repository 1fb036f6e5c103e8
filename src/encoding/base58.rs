//! Base58 encoding with the Bitcoin alphabet

use super::EncodingError;

/// Bitcoin's Base58 alphabet, without 0, O, I and l
pub const ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Encode bytes as Base58; each leading zero byte becomes a leading '1'
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_string()
}

/// Decode Base58 text back into bytes
pub fn decode(text: &str) -> Result<Vec<u8>, EncodingError> {
    bs58::decode(text)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| EncodingError::InvalidBase58(e.to_string()))
}
