//! btc-wallet: Bitcoin wallet identity and wire layer in Rust
//!
//! This crate provides:
//! - secp256k1 key generation, import and export
//! - Compressed and uncompressed public key encodings
//! - Base58Check and P2PKH address derivation for main and test networks
//! - Wallet Import Format (WIF) export and import
//! - P2P message framing with a typed little-endian value codec
//! - Version handshake over tokio streams
//!
//! # Example
//!
//! ```rust
//! use btc_wallet::core::{Address, NetworkType, Wif};
//! use btc_wallet::crypto::PrivateKey;
//! use btc_wallet::network::{self, Message};
//!
//! // Derive an address
//! let key = PrivateKey::from_hex(
//!     "d41864467935fd11de1479e8712bc3df8455ace9b417db9bbb8c8622f5ba782f",
//! )
//! .unwrap();
//! let address = Address::derive(NetworkType::Main, key.public_key());
//! assert_eq!(address.to_string(), "1KrGeH76a6JPQyr4DhCBzWH8GgdNNnZxNd");
//! println!("WIF: {}", Wif::export(&key));
//!
//! // Frame a message and read it back
//! let mut wire = Vec::new();
//! network::send(&mut wire, NetworkType::Main, &Message::Verack).unwrap();
//! let received = network::receive(&mut wire.as_slice()).unwrap();
//! assert_eq!(received, Message::Verack);
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod crypto;
pub mod encoding;
pub mod network;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use core::{Address, AddressError, NetworkType, Wif};
pub use crypto::{KeyError, PrivateKey, PublicKey};
pub use encoding::{Base58Check, EncodingError};
pub use network::{Message, MessageRegistry, MsgVersion, ProtocolError};
