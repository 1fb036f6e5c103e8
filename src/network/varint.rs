//! Variable length integers and strings
//!
//! | value                      | wire form            |
//! |----------------------------|----------------------|
//! | `0 ..= 0xfc`               | the byte itself      |
//! | `0xfd ..= 0xffff`          | `0xfd` + u16 LE      |
//! | `0x10000 ..= 0xffffffff`   | `0xfe` + u32 LE      |
//! | above                      | `0xff` + u64 LE      |
//!
//! A leading `0xfd`, `0xfe` or `0xff` is always a tag, never a literal.

use super::codec::{Decodable, Encodable};
use super::error::ProtocolError;
use std::io::{Read, Write};

/// Largest value stored in the single-byte form
pub const VAR_UINT8_MAX: u64 = 0xfc;

/// Tag announcing a u16 body
pub const VAR_UINT16_TAG: u8 = 0xfd;

/// Tag announcing a u32 body
pub const VAR_UINT32_TAG: u8 = 0xfe;

/// Tag announcing a u64 body
pub const VAR_UINT64_TAG: u8 = 0xff;

/// Longest string accepted on the wire
pub const MAX_STRING_LENGTH: u64 = 0xffff;

/// An unsigned integer with a length-dependent wire form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarUint(pub u64);

impl VarUint {
    pub fn value(self) -> u64 {
        self.0
    }

    /// Number of bytes the wire form takes
    pub fn encoded_len(self) -> usize {
        match self.0 {
            0..=VAR_UINT8_MAX => 1,
            0xfd..=0xffff => 3,
            0x1_0000..=0xffff_ffff => 5,
            _ => 9,
        }
    }
}

impl From<u64> for VarUint {
    fn from(v: u64) -> Self {
        VarUint(v)
    }
}

impl From<usize> for VarUint {
    fn from(v: usize) -> Self {
        VarUint(v as u64)
    }
}

impl Encodable for VarUint {
    fn encode(&self, w: &mut dyn Write) -> Result<(), ProtocolError> {
        match self.0 {
            0..=VAR_UINT8_MAX => (self.0 as u8).encode(w),
            0xfd..=0xffff => {
                VAR_UINT16_TAG.encode(w)?;
                (self.0 as u16).encode(w)
            }
            0x1_0000..=0xffff_ffff => {
                VAR_UINT32_TAG.encode(w)?;
                (self.0 as u32).encode(w)
            }
            _ => {
                VAR_UINT64_TAG.encode(w)?;
                self.0.encode(w)
            }
        }
    }
}

impl Decodable for VarUint {
    fn decode(r: &mut dyn Read) -> Result<Self, ProtocolError> {
        let value = match u8::decode(r)? {
            VAR_UINT16_TAG => u64::from(u16::decode(r)?),
            VAR_UINT32_TAG => u64::from(u32::decode(r)?),
            VAR_UINT64_TAG => u64::decode(r)?,
            literal => u64::from(literal),
        };
        Ok(VarUint(value))
    }
}

/// Write a length-prefixed string; nothing is written when it is too long
pub fn write_var_string(w: &mut dyn Write, value: &str) -> Result<(), ProtocolError> {
    let length = value.len() as u64;
    if length > MAX_STRING_LENGTH {
        return Err(ProtocolError::StringTooLong {
            length,
            max: MAX_STRING_LENGTH,
        });
    }

    VarUint(length).encode(w)?;
    w.write_all(value.as_bytes())?;
    Ok(())
}

/// Read a length-prefixed string.
///
/// The length is checked against [`MAX_STRING_LENGTH`] before any body byte
/// is read.
pub fn read_var_string(r: &mut dyn Read) -> Result<String, ProtocolError> {
    let length = VarUint::decode(r)?.value();
    if length > MAX_STRING_LENGTH {
        return Err(ProtocolError::StringTooLong {
            length,
            max: MAX_STRING_LENGTH,
        });
    }
    if length == 0 {
        return Ok(String::new());
    }

    let mut body = vec![0u8; length as usize];
    r.read_exact(&mut body)?;
    String::from_utf8(body).map_err(|_| ProtocolError::InvalidUtf8)
}
