//! Version handshake with a remote node
//!
//! Outbound side of the exchange:
//! 1. send our `version`
//! 2. wait for the peer's `version`
//! 3. reply with `verack`
//! 4. wait for the peer's `verack`

use super::error::ProtocolError;
use super::framed::MessageCodec;
use super::message::{Message, MsgVersion};
use super::types::NetAddress;
use crate::config::Config;
use futures::sink::SinkExt;
use futures::stream::StreamExt;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::Framed;

/// Perform the handshake over `stream`.
///
/// Returns the framed stream, ready for further messages, and the peer's
/// version message. Messages whose command is not registered are skipped
/// by the codec, so a peer sending e.g. `sendheaders` early does not break
/// the exchange.
pub async fn handshake<S>(
    stream: S,
    config: &Config,
    addr_recv: NetAddress,
    addr_from: NetAddress,
) -> Result<(Framed<S, MessageCodec>, MsgVersion), ProtocolError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut framed = Framed::new(stream, MessageCodec::new(config.network));

    let ours = MsgVersion::new(config, addr_recv, addr_from, rand::random());
    framed.send(Message::Version(ours)).await?;
    log::debug!("Sent version to {}", addr_recv);

    let peer = match next_message(&mut framed).await? {
        Message::Version(version) => version,
        other => {
            return Err(ProtocolError::HandshakeViolation(format!(
                "expected version, got {}",
                other.command()
            )))
        }
    };
    log::debug!(
        "Peer {} runs {} (protocol {}, height {})",
        addr_recv,
        peer.user_agent,
        peer.protocol_version,
        peer.start_height
    );

    framed.send(Message::Verack).await?;

    match next_message(&mut framed).await? {
        Message::Verack => {}
        other => {
            return Err(ProtocolError::HandshakeViolation(format!(
                "expected verack, got {}",
                other.command()
            )))
        }
    }

    log::info!("Handshake with {} complete", addr_recv);
    Ok((framed, peer))
}

async fn next_message<S>(framed: &mut Framed<S, MessageCodec>) -> Result<Message, ProtocolError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    match framed.next().await {
        Some(result) => result,
        None => Err(ProtocolError::ConnectionClosed),
    }
}
