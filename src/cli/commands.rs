//! CLI commands for the wallet
//!
//! Implements all command handlers for the CLI interface.

use crate::config::Config;
use crate::core::{Address, NetworkType, Wif};
use crate::crypto::{PrivateKey, PublicKey};
use crate::encoding::{base58, Base58Check};
use crate::network::{self, Message, MsgVersion, NetAddress};
use std::net::SocketAddr;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Message kinds the `frame` command can build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Version,
    Verack,
}

/// Generate a fresh key and show everything derived from it
pub fn cmd_keygen(config: &Config) -> CliResult<()> {
    let key = PrivateKey::generate();
    let address = Address::derive(config.network, key.public_key());

    println!("🔐 New key generated ({})", config.network);
    println!("   ├─ Private key: {}", key.to_hex());
    println!("   ├─ WIF: {}", Wif::export(&key));
    println!(
        "   ├─ Public key: {}",
        hex::encode(key.public_key().uncompressed())
    );
    println!("   ├─ Compressed: {}", key.public_key().to_hex());
    println!("   └─ Address: {}", address);
    println!("\n   ⚠️  IMPORTANT: Anyone holding the private key controls the funds!");

    Ok(())
}

/// Derive the address for a private key or a serialized public key
pub fn cmd_address(config: &Config, key: Option<&str>, pubkey: Option<&str>) -> CliResult<()> {
    let public_key = match (key, pubkey) {
        (Some(key), None) => *PrivateKey::from_hex(key)?.public_key(),
        (None, Some(pubkey)) => PublicKey::from_hex(pubkey)?,
        _ => return Err("pass exactly one of --key or --pubkey".into()),
    };

    let address = Address::derive(config.network, &public_key);
    println!("📍 Address ({}): {}", config.network, address);
    println!("   └─ hash160: {}", hex::encode(address.hash160()));

    Ok(())
}

/// Export a hex private key as WIF
pub fn cmd_wif(key: &str) -> CliResult<()> {
    let key = PrivateKey::from_hex(key)?;
    println!("🔑 WIF: {}", Wif::export(&key));
    Ok(())
}

/// Import a WIF string and show the key and its address
pub fn cmd_import_wif(config: &Config, wif: &str) -> CliResult<()> {
    let key = Wif::import(wif)?;
    let address = Address::derive(config.network, key.public_key());

    println!("🔓 WIF imported");
    println!("   ├─ Private key: {}", key.to_hex());
    println!("   ├─ Public key: {}", key.public_key().to_hex());
    println!("   └─ Address ({}): {}", config.network, address);

    Ok(())
}

/// Base58Check-encode hex data under `version`
pub fn cmd_base58_encode(version: u8, data: &str, raw: bool) -> CliResult<()> {
    let bytes = hex::decode(data.trim())?;
    if raw {
        println!("{}", base58::encode(&bytes));
    } else {
        println!("{}", Base58Check::encode(version, &bytes));
    }
    Ok(())
}

/// Decode Base58 or Base58Check text
pub fn cmd_base58_decode(text: &str, raw: bool) -> CliResult<()> {
    if raw {
        println!("{}", hex::encode(base58::decode(text.trim())?));
        return Ok(());
    }

    let decoded: Base58Check = text.trim().parse()?;
    println!("📦 Base58Check");
    println!("   ├─ Version: {:#04x}", decoded.version);
    println!("   └─ Payload: {}", hex::encode(&decoded.payload));
    if let Some(network) = NetworkType::from_address_version(decoded.version) {
        log::debug!("Version byte matches {} addresses", network);
    }

    Ok(())
}

/// Build a message frame and print it as hex
pub fn cmd_frame(config: &Config, kind: FrameKind, peer: Option<&str>) -> CliResult<()> {
    let message = match kind {
        FrameKind::Verack => Message::Verack,
        FrameKind::Version => {
            let addr_recv = match peer {
                Some(peer) => {
                    let socket: SocketAddr = peer.parse()?;
                    NetAddress::new(socket, Default::default())
                }
                None => NetAddress::default(),
            };
            Message::Version(MsgVersion::new(
                config,
                addr_recv,
                NetAddress::default(),
                rand::random(),
            ))
        }
    };

    let frame = message.to_frame(config.network)?;
    log::debug!(
        "Framed {} message: {} bytes",
        message.command(),
        frame.len()
    );
    println!("{}", hex::encode(frame));

    Ok(())
}

/// Decode a hex frame and print the message it carries
pub fn cmd_decode_frame(config: &Config, frame: &str) -> CliResult<()> {
    let bytes = hex::decode(frame.trim())?;
    let mut reader = bytes.as_slice();
    let message = network::receive_on(&mut reader, config.network)?;

    println!("📨 {} message ({})", message.command(), config.network);
    if let Message::Version(version) = &message {
        println!("   ├─ Protocol: {}", version.protocol_version);
        println!("   ├─ Services: {:#x}", version.services.bits());
        println!("   ├─ Timestamp: {}", version.timestamp.0);
        println!("   ├─ Receiver: {}", version.addr_recv);
        println!("   ├─ Sender: {}", version.addr_from);
        println!("   ├─ Nonce: {:#018x}", version.nonce);
        println!("   ├─ User agent: {}", version.user_agent);
        println!("   ├─ Start height: {}", version.start_height);
        println!("   └─ Relay: {}", version.relay);
    }
    if !reader.is_empty() {
        println!("   ⚠️  {} bytes left after the frame", reader.len());
    }

    Ok(())
}

/// Connect to a node and complete the version handshake
pub async fn cmd_handshake(config: &Config, peer: &str) -> CliResult<()> {
    let stream = tokio::net::TcpStream::connect(peer).await?;
    let peer_addr = stream.peer_addr()?;
    let local_addr = stream.local_addr()?;
    println!("🌐 Connected to {}", peer_addr);

    let (_framed, version) = network::handshake(
        stream,
        config,
        NetAddress::new(peer_addr, Default::default()),
        NetAddress::new(local_addr, config.service_flags()),
    )
    .await?;

    println!("🤝 Handshake complete");
    println!("   ├─ User agent: {}", version.user_agent);
    println!("   ├─ Protocol: {}", version.protocol_version);
    println!("   ├─ Services: {:#x}", version.services.bits());
    println!("   └─ Start height: {}", version.start_height);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE_KEY: &str = "d41864467935fd11de1479e8712bc3df8455ace9b417db9bbb8c8622f5ba782f";

    #[test]
    fn test_address_needs_exactly_one_key() {
        let config = Config::default();
        assert!(cmd_address(&config, Some(FIXTURE_KEY), None).is_ok());
        assert!(cmd_address(&config, None, None).is_err());
        assert!(cmd_address(&config, Some(FIXTURE_KEY), Some("02")).is_err());
    }

    #[test]
    fn test_decode_frame_uses_configured_network() {
        let frame = hex::encode(Message::Verack.to_frame(NetworkType::Test).unwrap());
        let test = Config {
            network: NetworkType::Test,
            ..Config::default()
        };
        assert!(cmd_decode_frame(&test, &frame).is_ok());
        assert!(cmd_decode_frame(&Config::default(), &frame).is_err());
    }

    #[test]
    fn test_base58_commands_reject_bad_input() {
        assert!(cmd_base58_encode(0, "zz", false).is_err());
        assert!(cmd_base58_decode("BPQAVrczKd", false).is_ok());
        assert!(cmd_base58_decode("0OIl", true).is_err());
    }
}
