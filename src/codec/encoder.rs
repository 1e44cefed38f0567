//! Message encoder
//!
//! Sizing runs first and records the body length of every embedded
//! message in the order the writer reaches them, so each length prefix is
//! written before its payload without re-sizing the subtree.

use std::slice;

use bytes::{BufMut, Bytes, BytesMut};

use super::{check_instance, Codec};
use crate::error::{ProtoError, Result};
use crate::schema::{FieldDescriptor, FieldKind, MessageDescriptor};
use crate::value::{MessageValue, Value};
use crate::wire::{encode_varint, encoded_len_varint, Tag};

/// Body length of a message plus the lengths of its embedded messages
pub(super) struct Sizes {
    pub(super) total: usize,
    nested: Vec<usize>,
}

pub(super) struct Encoder<'c, 'r> {
    codec: &'c Codec<'r>,
}

impl<'c, 'r> Encoder<'c, 'r> {
    pub(super) fn new(codec: &'c Codec<'r>) -> Self {
        Self { codec }
    }

    /// Encode into a buffer pre-sized from `sizes`
    pub(super) fn encode(&self, descriptor: &MessageDescriptor, value: &MessageValue, sizes: &Sizes) -> Result<Bytes> {
        let mut buf = BytesMut::with_capacity(sizes.total);
        let mut nested = sizes.nested.iter();
        self.write_message(descriptor, value, &mut buf, &mut nested, 0)?;
        Ok(buf.freeze())
    }

    // =========================================================================
    // Writing
    // =========================================================================

    fn write_message(
        &self,
        descriptor: &MessageDescriptor,
        value: &MessageValue,
        buf: &mut BytesMut,
        nested: &mut slice::Iter<'_, usize>,
        depth: u32,
    ) -> Result<()> {
        self.codec.check_depth(depth)?;
        check_instance(descriptor, value)?;

        for field in descriptor.fields_by_number() {
            for item in present_items(field, value.value_at(field.index()))? {
                self.write_field(field, item, buf, nested, depth)?;
            }
        }
        Ok(())
    }

    fn write_field(
        &self,
        field: &FieldDescriptor,
        value: &Value,
        buf: &mut BytesMut,
        nested: &mut slice::Iter<'_, usize>,
        depth: u32,
    ) -> Result<()> {
        let tag = Tag::new(field.number(), field.wire_type());

        if let Some(raw) = varint_payload(field.kind(), value) {
            tag.encode(buf);
            encode_varint(raw, buf);
            return Ok(());
        }

        match (field.kind(), value) {
            (FieldKind::Fixed32, Value::Fixed32(v)) => {
                tag.encode(buf);
                buf.put_u32_le(*v);
            }
            (FieldKind::String, Value::String(s)) => {
                tag.encode(buf);
                encode_varint(s.len() as u64, buf);
                buf.put_slice(s.as_bytes());
            }
            (FieldKind::Message(type_name), Value::Message(Some(message))) => {
                let nested_descriptor = self.codec.registry.resolve(type_name)?;
                let len = *nested.next().ok_or_else(|| {
                    ProtoError::InvalidDescriptor(format!("{} was not sized before writing", field.full_name()))
                })?;

                tag.encode(buf);
                encode_varint(len as u64, buf);
                self.write_message(&nested_descriptor, message, buf, nested, depth + 1)?;
            }
            (kind, value) => return Err(field_mismatch(field, kind, value)),
        }
        Ok(())
    }

    // =========================================================================
    // Sizing
    // =========================================================================

    /// Size a message body (no tag, no length prefix) and every message in it
    pub(super) fn size(&self, descriptor: &MessageDescriptor, value: &MessageValue) -> Result<Sizes> {
        let mut nested = Vec::new();
        let total = self.message_len(descriptor, value, &mut nested, 0)?;
        Ok(Sizes { total, nested })
    }

    /// Visits fields in the same order as `write_message`
    fn message_len(
        &self,
        descriptor: &MessageDescriptor,
        value: &MessageValue,
        nested: &mut Vec<usize>,
        depth: u32,
    ) -> Result<usize> {
        self.codec.check_depth(depth)?;
        check_instance(descriptor, value)?;

        let mut len = 0;
        for field in descriptor.fields_by_number() {
            for item in present_items(field, value.value_at(field.index()))? {
                len += self.field_len(field, item, nested, depth)?;
            }
        }
        Ok(len)
    }

    fn field_len(&self, field: &FieldDescriptor, value: &Value, nested: &mut Vec<usize>, depth: u32) -> Result<usize> {
        let tag_len = Tag::new(field.number(), field.wire_type()).encoded_len();

        if let Some(raw) = varint_payload(field.kind(), value) {
            return Ok(tag_len + encoded_len_varint(raw));
        }

        let payload_len = match (field.kind(), value) {
            (FieldKind::Fixed32, Value::Fixed32(_)) => 4,
            (FieldKind::String, Value::String(s)) => encoded_len_varint(s.len() as u64) + s.len(),
            (FieldKind::Message(type_name), Value::Message(Some(message))) => {
                let nested_descriptor = self.codec.registry.resolve(type_name)?;
                // Reserve the slot before descending so it precedes the children
                let slot = nested.len();
                nested.push(0);
                let len = self.message_len(&nested_descriptor, message, nested, depth + 1)?;
                nested[slot] = len;
                encoded_len_varint(len as u64) + len
            }
            (kind, value) => return Err(field_mismatch(field, kind, value)),
        };
        Ok(tag_len + payload_len)
    }
}

/// Values of a field that go on the wire
///
/// Every element of a repeated field; a singular field only when it is not
/// at its default (an absent message counts as default).
fn present_items<'v>(field: &FieldDescriptor, value: &'v Value) -> Result<&'v [Value]> {
    match value {
        Value::List(items) if field.is_repeated() => Ok(items.as_slice()),
        other if field.is_repeated() => Err(field_mismatch(field, field.kind(), other)),
        other if other.is_default() => Ok(&[][..]),
        other => Ok(std::slice::from_ref(other)),
    }
}

/// Raw varint of an integer or bool value
///
/// Signed values are reinterpreted as two's complement, so a negative
/// int32 is sign-extended to ten bytes.
fn varint_payload(kind: &FieldKind, value: &Value) -> Option<u64> {
    match (kind, value) {
        (FieldKind::Int32, Value::Int32(v)) => Some(i64::from(*v) as u64),
        (FieldKind::Int64, Value::Int64(v)) => Some(*v as u64),
        (FieldKind::Uint32, Value::Uint32(v)) => Some(u64::from(*v)),
        (FieldKind::Uint64, Value::Uint64(v)) => Some(*v),
        (FieldKind::Bool, Value::Bool(v)) => Some(u64::from(*v)),
        _ => None,
    }
}

fn field_mismatch(field: &FieldDescriptor, kind: &FieldKind, value: &Value) -> ProtoError {
    ProtoError::TypeMismatch {
        field: field.full_name().to_string(),
        expected: kind.to_string(),
        found: value.kind_name().to_string(),
    }
}
