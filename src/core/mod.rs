//! Core wallet identity components
//!
//! This module contains:
//! - Network selection (address versions, message magics)
//! - Address derivation from public keys
//! - WIF private key export and import

pub mod address;
pub mod network;
pub mod wif;

pub use address::{Address, AddressError, ADDRESS_HASH_SIZE};
pub use network::{
    NetworkType, MAIN_ADDRESS_VERSION, MAIN_NET_MAGIC, TEST_ADDRESS_VERSION, TEST_NET_MAGIC,
    WIF_VERSION,
};
pub use wif::{Wif, COMPRESSED_FLAG};
