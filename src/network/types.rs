//! Composite and semantic wire types
//!
//! - Service flags advertised by peers
//! - Network addresses (port is the one big-endian field on the wire)
//! - 32-bit and 64-bit Unix timestamps

use super::codec::{Decodable, Encodable};
use super::error::ProtocolError;
use bitflags::bitflags;
use chrono::{DateTime, Utc};
use std::fmt;
use std::io::{Read, Write};
use std::net::{IpAddr, Ipv6Addr, SocketAddr};

// =============================================================================
// Service Flags
// =============================================================================

bitflags! {
    /// Capabilities a peer advertises in `version` and address messages
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ServiceFlags: u64 {
        /// Full node serving the complete block chain
        const NETWORK = 1;
        /// Answers `getutxo` requests (BIP 64)
        const GETUTXO = 1 << 1;
        /// Supports bloom-filtered connections (BIP 111)
        const BLOOM = 1 << 2;
        /// Serves witness data (BIP 144)
        const WITNESS = 1 << 3;
        /// Serves only the last 288 blocks (BIP 159)
        const NETWORK_LIMITED = 1 << 10;
    }
}

impl Encodable for ServiceFlags {
    fn encode(&self, w: &mut dyn Write) -> Result<(), ProtocolError> {
        self.bits().encode(w)
    }
}

impl Decodable for ServiceFlags {
    fn decode(r: &mut dyn Read) -> Result<Self, ProtocolError> {
        // Unknown bits are kept so they survive a re-encode
        Ok(ServiceFlags::from_bits_retain(u64::decode(r)?))
    }
}

// =============================================================================
// Network Address
// =============================================================================

/// A TCP port, written big-endian unlike every other integer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NetPort(pub u16);

impl Encodable for NetPort {
    fn encode(&self, w: &mut dyn Write) -> Result<(), ProtocolError> {
        w.write_all(&self.0.to_be_bytes())?;
        Ok(())
    }
}

impl Decodable for NetPort {
    fn decode(r: &mut dyn Read) -> Result<Self, ProtocolError> {
        let mut buf = [0u8; 2];
        r.read_exact(&mut buf)?;
        Ok(NetPort(u16::from_be_bytes(buf)))
    }
}

/// Peer address as carried in `version` messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetAddress {
    pub services: ServiceFlags,
    /// IPv6, or IPv4 mapped into `::ffff:0:0/96`
    pub ip: Ipv6Addr,
    pub port: NetPort,
}

impl NetAddress {
    pub fn new(addr: SocketAddr, services: ServiceFlags) -> Self {
        let ip = match addr.ip() {
            IpAddr::V4(v4) => v4.to_ipv6_mapped(),
            IpAddr::V6(v6) => v6,
        };
        Self {
            services,
            ip,
            port: NetPort(addr.port()),
        }
    }

    /// Socket address, unmapping IPv4 addresses
    pub fn socket_addr(&self) -> SocketAddr {
        let ip = match self.ip.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => IpAddr::V6(self.ip),
        };
        SocketAddr::new(ip, self.port.0)
    }
}

impl Default for NetAddress {
    fn default() -> Self {
        Self {
            services: ServiceFlags::empty(),
            ip: Ipv6Addr::UNSPECIFIED,
            port: NetPort(0),
        }
    }
}

impl fmt::Display for NetAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#x})", self.socket_addr(), self.services.bits())
    }
}

impl Encodable for NetAddress {
    fn encode(&self, w: &mut dyn Write) -> Result<(), ProtocolError> {
        self.services.encode(w)?;
        self.ip.octets().encode(w)?;
        self.port.encode(w)
    }
}

impl Decodable for NetAddress {
    fn decode(r: &mut dyn Read) -> Result<Self, ProtocolError> {
        let services = ServiceFlags::decode(r)?;
        let ip = Ipv6Addr::from(<[u8; 16]>::decode(r)?);
        let port = NetPort::decode(r)?;
        Ok(Self { services, ip, port })
    }
}

// =============================================================================
// Timestamps
// =============================================================================

fn from_unix(seconds: i64) -> Result<DateTime<Utc>, ProtocolError> {
    DateTime::from_timestamp(seconds, 0).ok_or(ProtocolError::InvalidTimestamp(seconds))
}

fn now_in_seconds() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now)
}

/// Unix time in seconds, written as u32
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uint32Time(pub DateTime<Utc>);

impl Uint32Time {
    pub fn now() -> Self {
        Uint32Time(now_in_seconds())
    }

    pub fn from_unix(seconds: u32) -> Result<Self, ProtocolError> {
        from_unix(i64::from(seconds)).map(Uint32Time)
    }
}

impl Encodable for Uint32Time {
    fn encode(&self, w: &mut dyn Write) -> Result<(), ProtocolError> {
        let seconds = self.0.timestamp();
        let seconds =
            u32::try_from(seconds).map_err(|_| ProtocolError::InvalidTimestamp(seconds))?;
        seconds.encode(w)
    }
}

impl Decodable for Uint32Time {
    fn decode(r: &mut dyn Read) -> Result<Self, ProtocolError> {
        Uint32Time::from_unix(u32::decode(r)?)
    }
}

/// Unix time in seconds, written as i64
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Int64Time(pub DateTime<Utc>);

impl Int64Time {
    pub fn now() -> Self {
        Int64Time(now_in_seconds())
    }

    pub fn from_unix(seconds: i64) -> Result<Self, ProtocolError> {
        from_unix(seconds).map(Int64Time)
    }
}

impl Encodable for Int64Time {
    fn encode(&self, w: &mut dyn Write) -> Result<(), ProtocolError> {
        self.0.timestamp().encode(w)
    }
}

impl Decodable for Int64Time {
    fn decode(r: &mut dyn Read) -> Result<Self, ProtocolError> {
        Int64Time::from_unix(i64::decode(r)?)
    }
}
