//! Wallet integration tests
//!
//! Exercises the public API end to end: keys to addresses and WIF,
//! configuration files, and message frames over a byte stream.

use btc_wallet::config::Config;
use btc_wallet::core::{Address, NetworkType, Wif};
use btc_wallet::crypto::{PrivateKey, PublicKey};
use btc_wallet::encoding::{Base58Check, EncodingError};
use btc_wallet::network::{
    self, Connection, Message, MsgVersion, NetAddress, ProtocolError, ServiceFlags, HEADER_SIZE,
};
use std::io::{Cursor, Write};
use std::net::SocketAddr;
use tempfile::NamedTempFile;

const FIXTURE_KEY: &str = "d41864467935fd11de1479e8712bc3df8455ace9b417db9bbb8c8622f5ba782f";

#[test]
fn test_fixture_key_to_addresses_and_wif() {
    let key = PrivateKey::from_hex(FIXTURE_KEY).unwrap();

    assert_eq!(
        Address::derive(NetworkType::Main, key.public_key()).to_string(),
        "1KrGeH76a6JPQyr4DhCBzWH8GgdNNnZxNd"
    );
    assert_eq!(
        Address::derive(NetworkType::Test, key.public_key()).to_string(),
        "mzNDwLC5P7jeC6KfwGAZpRVT8gE5MGVP6G"
    );
    assert_eq!(
        Wif::export(&key),
        "5KRhGf9UkubWeyE8stnUqv9JKL6SCQ1UUr4LbgmGm6ABkqWAxCg"
    );
}

#[test]
fn test_more_fixture_addresses() {
    let cases = [
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

    for (hex_key, main, test) in cases {
        let key = PrivateKey::from_hex(hex_key).unwrap();
        assert_eq!(Address::derive(NetworkType::Main, key.public_key()).to_string(), main);
        assert_eq!(Address::derive(NetworkType::Test, key.public_key()).to_string(), test);
    }
}

#[test]
fn test_generated_key_survives_wif_and_address_parse() {
    let key = PrivateKey::generate();
    let imported = Wif::import(&Wif::export(&key)).unwrap();
    assert_eq!(imported.export_raw(), key.export_raw());

    let address = Address::derive(NetworkType::Test, key.public_key());
    let parsed: Address = address.to_string().parse().unwrap();
    assert_eq!(parsed, address);
    assert_eq!(parsed.network(), NetworkType::Test);
}

#[test]
fn test_public_key_encodings_agree() {
    let key = PrivateKey::from_hex(FIXTURE_KEY).unwrap();
    let public = key.public_key();

    let from_uncompressed = PublicKey::from_bytes(&public.uncompressed()).unwrap();
    let from_compressed = PublicKey::from_bytes(&public.compressed()).unwrap();
    assert_eq!(&from_uncompressed, public);
    assert_eq!(&from_compressed, public);
}

#[test]
fn test_base58check_rejects_tampering() {
    let text = Base58Check::encode(0x01, &[0x12, 0x13, 0x14]);
    assert_eq!(text, "BPQAVrczKd");

    let mut corrupted: Vec<char> = text.chars().collect();
    corrupted[3] = if corrupted[3] == 'A' { 'B' } else { 'A' };
    let corrupted: String = corrupted.into_iter().collect();
    assert_eq!(
        Base58Check::decode(&corrupted),
        Err(EncodingError::ChecksumMismatch)
    );
}

#[test]
fn test_config_file_drives_version_message() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"network": "test", "user_agent": "/it:0.1/", "services": 9, "start_height": 12}}"#
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.network, NetworkType::Test);

    let recv: SocketAddr = "10.0.0.1:18333".parse().unwrap();
    let version = MsgVersion::new(
        &config,
        NetAddress::new(recv, ServiceFlags::NETWORK),
        NetAddress::default(),
        99,
    );
    assert_eq!(version.services, ServiceFlags::NETWORK | ServiceFlags::WITNESS);

    let mut wire = Vec::new();
    network::send(&mut wire, config.network, &Message::Version(version.clone())).unwrap();
    assert_eq!(&wire[..4], &[0x0b, 0x11, 0x09, 0x07]);

    let received = network::receive_on(&mut wire.as_slice(), NetworkType::Test).unwrap();
    assert_eq!(received, Message::Version(version));
}

#[test]
fn test_connection_exchanges_several_messages() {
    let mut conn = Connection::new(Cursor::new(Vec::new()), NetworkType::Main);
    conn.send(&Message::Version(MsgVersion::default())).unwrap();
    conn.send(&Message::Verack).unwrap();

    let mut bytes = conn.into_inner().into_inner();
    // Corrupt the first payload; the second message must still be readable
    bytes[HEADER_SIZE] ^= 0xff;

    let mut conn = Connection::new(Cursor::new(bytes), NetworkType::Main);
    assert!(matches!(
        conn.receive(),
        Err(ProtocolError::ChecksumMismatch { .. })
    ));
    assert_eq!(conn.receive().unwrap(), Message::Verack);
}
