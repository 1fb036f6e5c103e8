//! Async message framing for tokio streams

use super::codec::Decodable;
use super::error::ProtocolError;
use super::message::{decode_message, Message, MessageHeader, HEADER_SIZE};
use super::registry::MessageRegistry;
use crate::core::NetworkType;
use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

/// Codec turning a byte stream into [`Message`]s for one network
#[derive(Debug, Clone)]
pub struct MessageCodec {
    network: NetworkType,
    registry: MessageRegistry,
}

impl MessageCodec {
    /// Codec using the default message types
    pub fn new(network: NetworkType) -> Self {
        Self::with_registry(network, MessageRegistry::global().clone())
    }

    pub fn with_registry(network: NetworkType, registry: MessageRegistry) -> Self {
        Self { network, registry }
    }

    pub fn network(&self) -> NetworkType {
        self.network
    }
}

impl Encoder<Message> for MessageCodec {
    type Error = ProtocolError;

    fn encode(&mut self, item: Message, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let frame = item.to_frame(self.network)?;
        dst.reserve(frame.len());
        dst.put_slice(&frame);
        Ok(())
    }
}

impl Decoder for MessageCodec {
    type Item = Message;
    type Error = ProtocolError;

    /// Frames carrying a command the registry does not know are consumed
    /// and skipped; every other failure is returned.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            // Need at least header
            if src.len() < HEADER_SIZE {
                return Ok(None);
            }

            let header = MessageHeader::from_wire_bytes(&src[..HEADER_SIZE])?;
            if header.magic != self.network.magic() {
                return Err(ProtocolError::MagicMismatch {
                    expected: self.network.magic(),
                    actual: header.magic,
                });
            }
            header.check_length()?;

            let frame_len = HEADER_SIZE + header.length as usize;
            if src.len() < frame_len {
                src.reserve(frame_len - src.len());
                return Ok(None);
            }

            // Consume the whole frame before verifying it
            src.advance(HEADER_SIZE);
            let payload = src.split_to(header.length as usize);

            match decode_message(&header, &payload, &self.registry) {
                Err(ProtocolError::UnknownMessageType(command)) => {
                    log::debug!("Skipping unknown {} message", command);
                }
                result => return result.map(Some),
            }
        }
    }
}
