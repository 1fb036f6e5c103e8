//! Wire protocol errors

use thiserror::Error;

/// Errors raised while encoding, framing or exchanging P2P messages
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("String too long: {length} bytes (max: {max})")]
    StringTooLong { length: u64, max: u64 },
    #[error("String is not valid UTF-8")]
    InvalidUtf8,
    #[error("Timestamp out of range: {0}")]
    InvalidTimestamp(i64),
    #[error("Command name too long: {0}")]
    CommandTooLong(String),
    #[error("Invalid command bytes: {0}")]
    InvalidCommand(String),
    #[error("Payload too large for {command}: {length} bytes (max: {max})")]
    PayloadTooLarge {
        command: String,
        length: u64,
        max: u32,
    },
    #[error("Checksum mismatch in {command} payload")]
    ChecksumMismatch { command: String },
    #[error("Unexpected magic {actual:#010x} (expected {expected:#010x})")]
    MagicMismatch { expected: u32, actual: u32 },
    #[error("Malformed {command} payload: {reason}")]
    MalformedPayload { command: String, reason: String },
    #[error("Command already registered: {0}")]
    DuplicateCommand(String),
    #[error("Unknown message type: {0}")]
    UnknownMessageType(String),
    #[error("Handshake violation: {0}")]
    HandshakeViolation(String),
    #[error("Connection closed")]
    ConnectionClosed,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
