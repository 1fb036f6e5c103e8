//! Typed value serialization for the P2P wire format
//!
//! Every wire type implements [`Encodable`] and [`Decodable`]. Integers and
//! booleans are little-endian; the only big-endian field is [`NetPort`].
//!
//! [`NetPort`]: super::types::NetPort

use super::error::ProtocolError;
use super::varint::{read_var_string, write_var_string};
use std::io::{Read, Write};

/// A value with a wire representation
pub trait Encodable {
    /// Write the wire form of `self` into `w`
    fn encode(&self, w: &mut dyn Write) -> Result<(), ProtocolError>;

    /// Wire form as a fresh buffer
    fn to_wire_bytes(&self) -> Result<Vec<u8>, ProtocolError> {
        let mut buf = Vec::new();
        self.encode(&mut buf)?;
        Ok(buf)
    }
}

/// A value that can be read back from its wire representation
pub trait Decodable: Sized {
    /// Read one value from `r`
    fn decode(r: &mut dyn Read) -> Result<Self, ProtocolError>;

    /// Decode from the start of `bytes`, ignoring anything after the value
    fn from_wire_bytes(bytes: &[u8]) -> Result<Self, ProtocolError> {
        let mut cursor = bytes;
        Self::decode(&mut cursor)
    }
}

/// Object-safe decoding into an existing slot, used by [`decode_fields`]
pub trait DecodeInPlace {
    fn decode_in_place(&mut self, r: &mut dyn Read) -> Result<(), ProtocolError>;
}

impl<T: Decodable> DecodeInPlace for T {
    fn decode_in_place(&mut self, r: &mut dyn Read) -> Result<(), ProtocolError> {
        *self = T::decode(r)?;
        Ok(())
    }
}

/// Encode `fields` in order, stopping at the first failure.
///
/// Bytes written before a failure stay in `w`; the caller discards them.
pub fn encode_fields(w: &mut dyn Write, fields: &[&dyn Encodable]) -> Result<(), ProtocolError> {
    for field in fields {
        field.encode(w)?;
    }
    Ok(())
}

/// Decode into `fields` in order, stopping at the first failure
pub fn decode_fields(
    r: &mut dyn Read,
    fields: &mut [&mut dyn DecodeInPlace],
) -> Result<(), ProtocolError> {
    for field in fields.iter_mut() {
        field.decode_in_place(r)?;
    }
    Ok(())
}

// =============================================================================
// Primitive Types
// =============================================================================

macro_rules! impl_le_codec {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Encodable for $ty {
                fn encode(&self, w: &mut dyn Write) -> Result<(), ProtocolError> {
                    w.write_all(&self.to_le_bytes())?;
                    Ok(())
                }
            }

            impl Decodable for $ty {
                fn decode(r: &mut dyn Read) -> Result<Self, ProtocolError> {
                    let mut buf = [0u8; std::mem::size_of::<$ty>()];
                    r.read_exact(&mut buf)?;
                    Ok(<$ty>::from_le_bytes(buf))
                }
            }
        )*
    };
}

impl_le_codec!(u8, u16, u32, u64, i8, i16, i32, i64);

impl Encodable for bool {
    fn encode(&self, w: &mut dyn Write) -> Result<(), ProtocolError> {
        u8::from(*self).encode(w)
    }
}

impl Decodable for bool {
    fn decode(r: &mut dyn Read) -> Result<Self, ProtocolError> {
        Ok(u8::decode(r)? != 0)
    }
}

impl<const N: usize> Encodable for [u8; N] {
    fn encode(&self, w: &mut dyn Write) -> Result<(), ProtocolError> {
        w.write_all(self)?;
        Ok(())
    }
}

impl<const N: usize> Decodable for [u8; N] {
    fn decode(r: &mut dyn Read) -> Result<Self, ProtocolError> {
        let mut buf = [0u8; N];
        r.read_exact(&mut buf)?;
        Ok(buf)
    }
}

impl Encodable for String {
    fn encode(&self, w: &mut dyn Write) -> Result<(), ProtocolError> {
        write_var_string(w, self)
    }
}

impl Decodable for String {
    fn decode(r: &mut dyn Read) -> Result<Self, ProtocolError> {
        read_var_string(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;

    #[test]
    fn test_integers_are_little_endian() {
        assert_eq!(0x1234u16.to_wire_bytes().unwrap(), vec![0x34, 0x12]);
        assert_eq!(70015i32.to_wire_bytes().unwrap(), vec![0x7f, 0x11, 0x01, 0x00]);
        assert_eq!((-1i64).to_wire_bytes().unwrap(), vec![0xff; 8]);
        assert_eq!(
            0x0102030405060708u64.to_wire_bytes().unwrap(),
            vec![0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]
        );
        assert_eq!(u32::from_wire_bytes(&[0x0b, 0x11, 0x09, 0x07]).unwrap(), 0x0709110b);
    }

    #[test]
    fn test_bool() {
        assert_eq!(true.to_wire_bytes().unwrap(), vec![1]);
        assert_eq!(false.to_wire_bytes().unwrap(), vec![0]);
        assert!(!bool::from_wire_bytes(&[0]).unwrap());
        assert!(bool::from_wire_bytes(&[2]).unwrap());
    }

    #[test]
    fn test_byte_arrays_are_raw() {
        let bytes = *b"version\0\0\0\0\0";
        assert_eq!(bytes.to_wire_bytes().unwrap(), bytes.to_vec());
        assert_eq!(<[u8; 12]>::from_wire_bytes(&bytes).unwrap(), bytes);
    }

    #[test]
    fn test_short_read_is_transport_error() {
        match u32::from_wire_bytes(&[0x01, 0x02]) {
            Err(ProtocolError::Io(e)) => assert_eq!(e.kind(), ErrorKind::UnexpectedEof),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_bulk_round_trip_in_order() {
        let mut buf = Vec::new();
        let text = "abc".to_string();
        encode_fields(&mut buf, &[&1u8, &0x0203u16, &text, &true]).unwrap();
        assert_eq!(buf, vec![0x01, 0x03, 0x02, 0x03, b'a', b'b', b'c', 0x01]);

        let (mut a, mut b, mut c, mut d) = (0u8, 0u16, String::new(), false);
        decode_fields(&mut buf.as_slice(), &mut [&mut a, &mut b, &mut c, &mut d]).unwrap();
        assert_eq!((a, b, c.as_str(), d), (1, 0x0203, "abc", true));
    }

    #[test]
    fn test_bulk_stops_at_first_failure() {
        let (mut a, mut b, mut c) = (0u8, 0u32, 0u8);
        let result = decode_fields(&mut [0x07u8, 0x01].as_slice(), &mut [&mut a, &mut b, &mut c]);
        assert!(matches!(result, Err(ProtocolError::Io(_))));
        assert_eq!(a, 7);
        assert_eq!(b, 0);
        assert_eq!(c, 0);
    }

    #[test]
    fn test_bulk_encode_leaves_partial_output() {
        let long = "x".repeat(0x10000);
        let mut buf = Vec::new();
        let result = encode_fields(&mut buf, &[&0xaau8, &long, &0xbbu8]);
        assert!(matches!(result, Err(ProtocolError::StringTooLong { .. })));
        assert_eq!(buf, vec![0xaa]);
    }
}
