//! Wire Module
//!
//! Low-level primitives of the protobuf binary encoding.
//!
//! ## Field Format
//! ```text
//! ┌──────────────────────────┬─────────────────────────────────┐
//! │ Tag (varint)             │ Value                           │
//! │ (number << 3) | wire_type│                                 │
//! └──────────────────────────┴─────────────────────────────────┘
//! ```
//!
//! ### Wire Types
//! - 0: VARINT            - bool, int32, int64, uint32, uint64
//! - 1: FIXED64           - 8 bytes little-endian (skipped only)
//! - 2: LENGTH_DELIMITED  - varint length + payload (string, message, packed)
//! - 5: FIXED32           - 4 bytes little-endian

mod tag;
pub mod varint;

pub use tag::{Tag, WireType, MAX_FIELD_NUMBER};
pub use varint::{decode_varint, encode_varint, encoded_len_varint, MAX_VARINT_LEN};

use bytes::Buf;

use crate::error::{ProtoError, Result};

/// Split a length-delimited payload off the front of `buf`
///
/// Reads the varint length prefix and returns the payload slice,
/// advancing `buf` past it.
pub fn read_length_delimited<'a>(buf: &mut &'a [u8]) -> Result<&'a [u8]> {
    let len = decode_varint(buf)?;
    let len = usize::try_from(len)
        .map_err(|_| ProtoError::malformed(format!("length {} does not fit in memory", len)))?;

    if len > buf.remaining() {
        return Err(ProtoError::malformed(format!(
            "length-delimited payload of {} bytes exceeds remaining {} bytes",
            len,
            buf.remaining()
        )));
    }

    let data: &'a [u8] = *buf;
    let (payload, rest) = data.split_at(len);
    *buf = rest;
    Ok(payload)
}

/// Read a little-endian fixed32 value
pub fn read_fixed32(buf: &mut &[u8]) -> Result<u32> {
    if buf.remaining() < 4 {
        return Err(ProtoError::malformed(format!(
            "fixed32 needs 4 bytes, got {}",
            buf.remaining()
        )));
    }
    Ok(buf.get_u32_le())
}

/// Consume and discard one value of the given wire type
///
/// Used for field numbers the descriptor does not know about.
pub fn skip_field(wire_type: WireType, buf: &mut &[u8]) -> Result<()> {
    match wire_type {
        WireType::Varint => {
            decode_varint(buf)?;
        }
        WireType::Fixed64 => {
            if buf.remaining() < 8 {
                return Err(ProtoError::malformed(format!(
                    "fixed64 needs 8 bytes, got {}",
                    buf.remaining()
                )));
            }
            buf.advance(8);
        }
        WireType::LengthDelimited => {
            read_length_delimited(buf)?;
        }
        WireType::Fixed32 => {
            read_fixed32(buf)?;
        }
    }
    Ok(())
}
