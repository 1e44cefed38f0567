//! Field tags
//!
//! A tag packs a field number and a wire type into one varint key.

use bytes::BufMut;

use super::varint::{encode_varint, encoded_len_varint};
use crate::error::{ProtoError, Result};

/// Largest field number protobuf allows (2^29 - 1)
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// Wire types understood by the codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    Varint = 0,
    Fixed64 = 1,
    LengthDelimited = 2,
    Fixed32 = 5,
}

impl WireType {
    /// Parse a 3-bit wire type code
    ///
    /// Group start/end (3, 4) and the unassigned codes are rejected.
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::Fixed64),
            2 => Ok(WireType::LengthDelimited),
            5 => Ok(WireType::Fixed32),
            _ => Err(ProtoError::malformed(format!("invalid wire type {}", code))),
        }
    }
}

/// A decoded field tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    /// Field number
    pub number: u32,

    /// How the value following the tag is laid out
    pub wire_type: WireType,
}

impl Tag {
    pub fn new(number: u32, wire_type: WireType) -> Self {
        Self { number, wire_type }
    }

    /// Varint key written on the wire
    pub fn key(&self) -> u64 {
        (u64::from(self.number) << 3) | u64::from(self.wire_type as u8)
    }

    /// Split a varint key into field number and wire type
    pub fn from_key(key: u64) -> Result<Self> {
        let wire_type = WireType::from_code((key & 0x07) as u8)?;
        let number = key >> 3;

        if number == 0 || number > u64::from(MAX_FIELD_NUMBER) {
            return Err(ProtoError::malformed(format!(
                "invalid field number {}",
                number
            )));
        }

        Ok(Self {
            number: number as u32,
            wire_type,
        })
    }

    pub fn encode(&self, buf: &mut impl BufMut) {
        encode_varint(self.key(), buf);
    }

    pub fn encoded_len(&self) -> usize {
        encoded_len_varint(self.key())
    }
}
