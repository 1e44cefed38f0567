//! Message decoder

use std::sync::Arc;

use tracing::trace;

use super::{check_instance, Codec};
use crate::error::{ProtoError, Result};
use crate::schema::{FieldDescriptor, FieldKind, MessageDescriptor};
use crate::value::{MessageValue, Value};
use crate::wire::{decode_varint, read_fixed32, read_length_delimited, skip_field, Tag, WireType};

pub(super) struct Decoder<'c, 'r> {
    codec: &'c Codec<'r>,
}

impl<'c, 'r> Decoder<'c, 'r> {
    pub(super) fn new(codec: &'c Codec<'r>) -> Self {
        Self { codec }
    }

    /// Scan `buf` and apply every field to `target`
    pub(super) fn decode_into(
        &self,
        descriptor: &MessageDescriptor,
        target: &mut MessageValue,
        mut buf: &[u8],
        depth: u32,
    ) -> Result<()> {
        self.codec.check_depth(depth)?;

        while !buf.is_empty() {
            let tag = Tag::from_key(decode_varint(&mut buf)?)?;

            match descriptor.field_by_number(tag.number) {
                Some(field) => self.read_field(field, tag.wire_type, &mut buf, target, depth)?,
                None => {
                    trace!(
                        type_name = descriptor.full_name(),
                        number = tag.number,
                        "skipping unknown field"
                    );
                    skip_field(tag.wire_type, &mut buf)?;
                }
            }
        }
        Ok(())
    }

    fn read_field(
        &self,
        field: &FieldDescriptor,
        wire_type: WireType,
        buf: &mut &[u8],
        target: &mut MessageValue,
        depth: u32,
    ) -> Result<()> {
        // Packed run of scalars
        if field.is_repeated() && field.kind().is_packable() && wire_type == WireType::LengthDelimited {
            let mut packed = read_length_delimited(buf)?;
            while !packed.is_empty() {
                let element = read_scalar(field, &mut packed)?;
                append(target, field, element);
            }
            return Ok(());
        }

        if wire_type != field.wire_type() {
            return Err(ProtoError::malformed(format!(
                "{} expects wire type {:?}, got {:?}",
                field.full_name(),
                field.wire_type(),
                wire_type
            )));
        }

        let FieldKind::Message(type_name) = field.kind() else {
            let value = read_scalar(field, buf)?;
            if field.is_repeated() {
                append(target, field, value);
            } else {
                *target.value_at_mut(field.index()) = value;
            }
            return Ok(());
        };

        let payload = read_length_delimited(buf)?;
        let nested_descriptor = self.codec.registry.resolve(type_name)?;

        if !field.is_repeated() {
            // A repeated occurrence of a singular message merges into it
            if let Value::Message(Some(existing)) = target.value_at_mut(field.index()) {
                check_instance(&nested_descriptor, existing)?;
                return self.decode_into(&nested_descriptor, existing, payload, depth + 1);
            }
        }

        let mut nested = MessageValue::new(Arc::clone(&nested_descriptor));
        self.decode_into(&nested_descriptor, &mut nested, payload, depth + 1)?;
        let value = Value::Message(Some(Box::new(nested)));

        if field.is_repeated() {
            append(target, field, value);
        } else {
            *target.value_at_mut(field.index()) = value;
        }
        Ok(())
    }
}

/// Read one non-message value of `field`'s kind
fn read_scalar(field: &FieldDescriptor, buf: &mut &[u8]) -> Result<Value> {
    let value = match field.kind() {
        FieldKind::Int32 => Value::Int32(decode_varint(buf)? as i32),
        FieldKind::Int64 => Value::Int64(decode_varint(buf)? as i64),
        FieldKind::Uint32 => Value::Uint32(decode_varint(buf)? as u32),
        FieldKind::Uint64 => Value::Uint64(decode_varint(buf)?),
        FieldKind::Bool => Value::Bool(decode_varint(buf)? != 0),
        FieldKind::Fixed32 => Value::Fixed32(read_fixed32(buf)?),
        FieldKind::String => {
            let payload = read_length_delimited(buf)?;
            let text = std::str::from_utf8(payload).map_err(|e| {
                ProtoError::malformed(format!("{} is not valid UTF-8: {}", field.full_name(), e))
            })?;
            Value::String(text.to_string())
        }
        FieldKind::Message(_) => {
            return Err(ProtoError::malformed(format!(
                "{} is a message field and cannot be read as a scalar",
                field.full_name()
            )))
        }
    };
    Ok(value)
}

fn append(target: &mut MessageValue, field: &FieldDescriptor, value: Value) {
    if let Value::List(items) = target.value_at_mut(field.index()) {
        items.push(value);
    }
}
