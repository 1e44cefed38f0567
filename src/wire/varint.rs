//! Base-128 varints
//!
//! Seven bits per byte, least-significant group first, high bit set on
//! every byte except the last.

use bytes::{Buf, BufMut};

use crate::error::{ProtoError, Result};

/// A u64 never needs more than 10 bytes
pub const MAX_VARINT_LEN: usize = 10;

/// Append `value` as a varint
pub fn encode_varint(mut value: u64, buf: &mut impl BufMut) {
    while value >= 0x80 {
        buf.put_u8((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    buf.put_u8(value as u8);
}

/// Read a varint from the front of `buf`
///
/// Fails if the input ends before a terminating byte, or if no
/// terminating byte appears within `MAX_VARINT_LEN` bytes.
pub fn decode_varint(buf: &mut impl Buf) -> Result<u64> {
    let mut value = 0u64;

    for i in 0..MAX_VARINT_LEN {
        if !buf.has_remaining() {
            return Err(ProtoError::malformed(format!(
                "varint truncated after {} bytes",
                i
            )));
        }

        let byte = buf.get_u8();
        value |= u64::from(byte & 0x7f) << (7 * i);

        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }

    Err(ProtoError::malformed(format!(
        "varint longer than {} bytes",
        MAX_VARINT_LEN
    )))
}

/// Number of bytes `encode_varint` writes for `value`
pub fn encoded_len_varint(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    (bits + 6) / 7
}
