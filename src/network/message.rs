//! Network message types and framing for P2P communication
//!
//! Every message travels as a 24-byte header followed by its payload:
//!
//! | field    | size | encoding                               |
//! |----------|------|----------------------------------------|
//! | magic    | 4    | u32 little-endian, selects the network |
//! | command  | 12   | ASCII, zero padded                     |
//! | length   | 4    | u32 little-endian payload size         |
//! | checksum | 4    | first bytes of SHA256(SHA256(payload)) |

use super::codec::{decode_fields, encode_fields, Decodable, Encodable};
use super::error::ProtocolError;
use super::registry::MessageRegistry;
use super::types::{Int64Time, NetAddress, ServiceFlags};
use crate::config::Config;
use crate::core::NetworkType;
use crate::crypto::checksum4;
use std::io::{self, Read, Write};

// =============================================================================
// Protocol Constants
// =============================================================================

/// Protocol version (Bitcoin Core 0.13.2)
pub const PROTOCOL_VERSION: i32 = 70015;

/// User agent advertised by this client (BIP 14 format)
pub const DEFAULT_USER_AGENT: &str = concat!("/btc-wallet:", env!("CARGO_PKG_VERSION"), "/");

/// Byte length of the command field
pub const COMMAND_SIZE: usize = 12;

/// Byte length of the header checksum
pub const CHECKSUM_SIZE: usize = 4;

/// Total header size
pub const HEADER_SIZE: usize = 4 + COMMAND_SIZE + 4 + CHECKSUM_SIZE;

/// Maximum payload size (32 MiB)
pub const MAX_MESSAGE_SIZE: u32 = 0x0200_0000;

/// Command of the version handshake message
pub const COMMAND_VERSION: &str = "version";

/// Command acknowledging a version message
pub const COMMAND_VERACK: &str = "verack";

// =============================================================================
// Message Header
// =============================================================================

/// Fixed-size header preceding every payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    pub magic: u32,
    pub command: [u8; COMMAND_SIZE],
    pub length: u32,
    pub checksum: [u8; CHECKSUM_SIZE],
}

impl MessageHeader {
    /// Build the header for `payload` sent as `command` on `network`
    pub fn for_payload(
        network: NetworkType,
        command: &str,
        payload: &[u8],
    ) -> Result<Self, ProtocolError> {
        let command_bytes = pad_command(command)?;

        if payload.len() > MAX_MESSAGE_SIZE as usize {
            return Err(ProtocolError::PayloadTooLarge {
                command: command.to_string(),
                length: payload.len() as u64,
                max: MAX_MESSAGE_SIZE,
            });
        }

        Ok(Self {
            magic: network.magic(),
            command: command_bytes,
            length: payload.len() as u32,
            checksum: checksum4(payload),
        })
    }

    /// Command name with the zero padding trimmed
    pub fn command_name(&self) -> Result<String, ProtocolError> {
        let end = self
            .command
            .iter()
            .rposition(|b| *b != 0)
            .map_or(0, |last| last + 1);
        let name = &self.command[..end];

        if name.iter().any(|b| *b == 0 || !b.is_ascii_graphic()) {
            return Err(ProtocolError::InvalidCommand(hex::encode(self.command)));
        }
        // ASCII checked above
        Ok(String::from_utf8_lossy(name).into_owned())
    }

    /// Reject payload lengths above [`MAX_MESSAGE_SIZE`]
    pub fn check_length(&self) -> Result<(), ProtocolError> {
        if self.length > MAX_MESSAGE_SIZE {
            return Err(ProtocolError::PayloadTooLarge {
                command: String::from_utf8_lossy(&self.command)
                    .trim_end_matches('\0')
                    .to_string(),
                length: u64::from(self.length),
                max: MAX_MESSAGE_SIZE,
            });
        }
        Ok(())
    }

    /// Whether `payload` matches the header checksum
    pub fn verify_checksum(&self, payload: &[u8]) -> bool {
        checksum4(payload) == self.checksum
    }
}

impl Encodable for MessageHeader {
    fn encode(&self, w: &mut dyn Write) -> Result<(), ProtocolError> {
        encode_fields(w, &[&self.magic, &self.command, &self.length, &self.checksum])
    }
}

impl Decodable for MessageHeader {
    fn decode(r: &mut dyn Read) -> Result<Self, ProtocolError> {
        let mut header = MessageHeader {
            magic: 0,
            command: [0u8; COMMAND_SIZE],
            length: 0,
            checksum: [0u8; CHECKSUM_SIZE],
        };
        decode_fields(
            r,
            &mut [
                &mut header.magic,
                &mut header.command,
                &mut header.length,
                &mut header.checksum,
            ],
        )?;
        Ok(header)
    }
}

/// Zero-pad `command` to the header field.
///
/// Only names [`MessageHeader::command_name`] reads back unchanged are
/// accepted: 1 to 12 printable ASCII bytes.
pub(crate) fn pad_command(command: &str) -> Result<[u8; COMMAND_SIZE], ProtocolError> {
    let bytes = command.as_bytes();
    if bytes.len() > COMMAND_SIZE {
        return Err(ProtocolError::CommandTooLong(command.to_string()));
    }
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_graphic) {
        return Err(ProtocolError::InvalidCommand(command.escape_default().to_string()));
    }
    let mut padded = [0u8; COMMAND_SIZE];
    padded[..bytes.len()].copy_from_slice(bytes);
    Ok(padded)
}

// =============================================================================
// Version Message
// =============================================================================

/// Version message exchanged when connecting to a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsgVersion {
    /// Protocol version
    pub protocol_version: i32,
    /// Services offered by the sending node
    pub services: ServiceFlags,
    /// Creation time of the message
    pub timestamp: Int64Time,
    /// Address of the receiving node
    pub addr_recv: NetAddress,
    /// Address of the sending node
    pub addr_from: NetAddress,
    /// Random value used to detect connections to self
    pub nonce: u64,
    /// Sender's user agent
    pub user_agent: String,
    /// Height of the sender's best block
    pub start_height: i32,
    /// Whether the sender wants transaction inventory relayed (BIP 37)
    pub relay: bool,
}

impl MsgVersion {
    /// Create a version message for `addr_recv` from the configured node
    pub fn new(config: &Config, addr_recv: NetAddress, addr_from: NetAddress, nonce: u64) -> Self {
        Self {
            protocol_version: config.protocol_version,
            services: config.service_flags(),
            timestamp: Int64Time::now(),
            addr_recv,
            addr_from,
            nonce,
            user_agent: config.user_agent.clone(),
            start_height: config.start_height,
            relay: config.relay,
        }
    }

    fn encode_payload(&self, w: &mut dyn Write) -> Result<(), ProtocolError> {
        encode_fields(
            w,
            &[
                &self.protocol_version,
                &self.services,
                &self.timestamp,
                &self.addr_recv,
                &self.addr_from,
                &self.nonce,
                &self.user_agent,
                &self.start_height,
                &self.relay,
            ],
        )
    }

    fn decode_payload(&mut self, r: &mut dyn Read) -> Result<(), ProtocolError> {
        decode_fields(
            r,
            &mut [
                &mut self.protocol_version,
                &mut self.services,
                &mut self.timestamp,
                &mut self.addr_recv,
                &mut self.addr_from,
                &mut self.nonce,
                &mut self.user_agent,
                &mut self.start_height,
                &mut self.relay,
            ],
        )
    }
}

impl Default for MsgVersion {
    fn default() -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION,
            services: ServiceFlags::empty(),
            timestamp: Int64Time::default(),
            addr_recv: NetAddress::default(),
            addr_from: NetAddress::default(),
            nonce: 0,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            start_height: 0,
            relay: false,
        }
    }
}

// =============================================================================
// Message
// =============================================================================

/// Network message types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Initial handshake when connecting
    Version(MsgVersion),

    /// Acknowledges a received version message
    Verack,
}

impl Message {
    /// Command name carried in the header
    pub fn command(&self) -> &'static str {
        match self {
            Message::Version(_) => COMMAND_VERSION,
            Message::Verack => COMMAND_VERACK,
        }
    }

    /// Write the payload (without header)
    pub fn encode_payload(&self, w: &mut dyn Write) -> Result<(), ProtocolError> {
        match self {
            Message::Version(version) => version.encode_payload(w),
            Message::Verack => Ok(()),
        }
    }

    /// Overwrite this message's fields from a payload
    pub fn decode_payload(&mut self, r: &mut dyn Read) -> Result<(), ProtocolError> {
        match self {
            Message::Version(version) => version.decode_payload(r),
            Message::Verack => Ok(()),
        }
    }

    /// Header and payload as one buffer, ready for the wire
    pub fn to_frame(&self, network: NetworkType) -> Result<Vec<u8>, ProtocolError> {
        let mut payload = Vec::new();
        self.encode_payload(&mut payload)?;

        let header = MessageHeader::for_payload(network, self.command(), &payload)?;

        let mut frame = Vec::with_capacity(HEADER_SIZE + payload.len());
        header.encode(&mut frame)?;
        frame.extend_from_slice(&payload);
        Ok(frame)
    }
}

// =============================================================================
// Send / Receive
// =============================================================================

/// Frame `message` for `network` and write it to `w`
pub fn send(w: &mut dyn Write, network: NetworkType, message: &Message) -> Result<(), ProtocolError> {
    let frame = message.to_frame(network)?;
    w.write_all(&frame)?;
    log::debug!(
        "Sent {} message ({} payload bytes)",
        message.command(),
        frame.len() - HEADER_SIZE
    );
    Ok(())
}

/// Read one message using the global registry
pub fn receive(r: &mut dyn Read) -> Result<Message, ProtocolError> {
    receive_with(r, MessageRegistry::global())
}

/// Read one message, rejecting headers that belong to another network.
///
/// A foreign frame is skipped as a whole, so the stream stays positioned
/// at the next header.
pub fn receive_on(r: &mut dyn Read, network: NetworkType) -> Result<Message, ProtocolError> {
    let header = read_header(r)?;
    if header.magic != network.magic() {
        let mut rest = (&mut *r).take(u64::from(header.length));
        let skipped = io::copy(&mut rest, &mut io::sink())?;
        if skipped < u64::from(header.length) {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        log::warn!(
            "Skipped frame with magic {:#010x} ({} payload bytes)",
            header.magic,
            skipped
        );
        return Err(ProtocolError::MagicMismatch {
            expected: network.magic(),
            actual: header.magic,
        });
    }
    read_body(r, &header, MessageRegistry::global())
}

/// Read one message, resolving its command through `registry`
pub fn receive_with(r: &mut dyn Read, registry: &MessageRegistry) -> Result<Message, ProtocolError> {
    let header = read_header(r)?;
    read_body(r, &header, registry)
}

fn read_header(r: &mut dyn Read) -> Result<MessageHeader, ProtocolError> {
    let header = MessageHeader::decode(r)?;
    header.check_length()?;
    Ok(header)
}

fn read_body(
    r: &mut dyn Read,
    header: &MessageHeader,
    registry: &MessageRegistry,
) -> Result<Message, ProtocolError> {
    let mut payload = vec![0u8; header.length as usize];
    r.read_exact(&mut payload)?;
    decode_message(header, &payload, registry)
}

/// Verify a complete payload against its header and build the message.
///
/// Nothing is constructed unless the checksum matches.
pub fn decode_message(
    header: &MessageHeader,
    payload: &[u8],
    registry: &MessageRegistry,
) -> Result<Message, ProtocolError> {
    if !header.verify_checksum(payload) {
        let command = String::from_utf8_lossy(&header.command)
            .trim_end_matches('\0')
            .to_string();
        log::warn!("Dropping {} message with bad checksum", command);
        return Err(ProtocolError::ChecksumMismatch { command });
    }

    let command = header.command_name()?;
    let mut message = registry
        .construct(&command)
        .ok_or_else(|| ProtocolError::UnknownMessageType(command.clone()))?;

    // The payload is already in memory; running out of it is a format error
    let mut reader = payload;
    message
        .decode_payload(&mut reader)
        .map_err(|e| match e {
            ProtocolError::Io(io_err) if io_err.kind() == io::ErrorKind::UnexpectedEof => {
                ProtocolError::MalformedPayload {
                    command: command.clone(),
                    reason: format!("{} bytes end before the last field", payload.len()),
                }
            }
            other => other,
        })?;
    if !reader.is_empty() {
        log::debug!(
            "Ignoring {} trailing bytes in {} payload",
            reader.len(),
            command
        );
    }

    log::debug!("Received {} message ({} payload bytes)", command, payload.len());
    Ok(message)
}
