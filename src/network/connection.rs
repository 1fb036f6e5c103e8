//! Blocking message exchange over an established stream

use super::error::ProtocolError;
use super::message::{receive_on, send, Message};
use crate::core::NetworkType;
use std::io::{Read, Write};

/// A duplex byte stream bound to one network.
///
/// Opening and closing the underlying socket is left to the caller.
pub struct Connection<S> {
    stream: S,
    network: NetworkType,
}

impl<S: Read + Write> Connection<S> {
    pub fn new(stream: S, network: NetworkType) -> Self {
        Self { stream, network }
    }

    pub fn network(&self) -> NetworkType {
        self.network
    }

    /// Frame and write one message, then flush
    pub fn send(&mut self, message: &Message) -> Result<(), ProtocolError> {
        send(&mut self.stream, self.network, message)?;
        self.stream.flush()?;
        Ok(())
    }

    /// Block until one message for this network has been read.
    ///
    /// Frames from another network are consumed before `MagicMismatch` is
    /// returned, so the next call reads the following frame.
    pub fn receive(&mut self) -> Result<Message, ProtocolError> {
        receive_on(&mut self.stream, self.network)
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_send_then_receive() {
        let mut conn = Connection::new(Cursor::new(Vec::new()), NetworkType::Test);
        conn.send(&Message::Verack).unwrap();
        conn.send(&Message::Verack).unwrap();
        assert_eq!(conn.get_ref().get_ref().len(), 48);

        let mut cursor = conn.into_inner();
        cursor.set_position(0);
        let mut conn = Connection::new(cursor, NetworkType::Test);
        assert_eq!(conn.receive().unwrap(), Message::Verack);
        assert_eq!(conn.receive().unwrap(), Message::Verack);
        assert!(matches!(conn.receive(), Err(ProtocolError::Io(_))));
    }

    #[test]
    fn test_wrong_network_is_rejected() {
        let wire = Message::Verack.to_frame(NetworkType::Main).unwrap();
        let mut conn = Connection::new(Cursor::new(wire), NetworkType::Test);
        assert!(matches!(
            conn.receive(),
            Err(ProtocolError::MagicMismatch { .. })
        ));
    }

    #[test]
    fn test_foreign_frame_does_not_desync() {
        let mut wire = Message::Verack.to_frame(NetworkType::Main).unwrap();
        wire.extend(Message::Verack.to_frame(NetworkType::Test).unwrap());

        let mut conn = Connection::new(Cursor::new(wire), NetworkType::Test);
        assert!(matches!(
            conn.receive(),
            Err(ProtocolError::MagicMismatch { .. })
        ));
        assert_eq!(conn.receive().unwrap(), Message::Verack);
    }
}
