//! P2P wire protocol
//!
//! Provides the Bitcoin message layer used to talk to remote nodes.
//!
//! # Features
//! - Typed little-endian value codec
//! - Variable length integers and strings
//! - Header framing with checksum and size checks
//! - Command registry for incoming messages
//! - Blocking and tokio-based transports
//! - Version handshake

pub mod codec;
pub mod connection;
pub mod error;
pub mod framed;
pub mod handshake;
pub mod message;
pub mod registry;
pub mod types;
pub mod varint;

pub use codec::{decode_fields, encode_fields, Decodable, DecodeInPlace, Encodable};
pub use connection::Connection;
pub use error::ProtocolError;
pub use framed::MessageCodec;
pub use handshake::handshake;
pub use message::{
    decode_message, receive, receive_on, receive_with, send, Message, MessageHeader, MsgVersion,
    CHECKSUM_SIZE, COMMAND_SIZE, COMMAND_VERACK, COMMAND_VERSION, DEFAULT_USER_AGENT,
    HEADER_SIZE, MAX_MESSAGE_SIZE, PROTOCOL_VERSION,
};
pub use registry::{MessageConstructor, MessageRegistry};
pub use types::{Int64Time, NetAddress, NetPort, ServiceFlags, Uint32Time};
pub use varint::{read_var_string, write_var_string, VarUint, MAX_STRING_LENGTH};
