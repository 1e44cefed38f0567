//! Codec Module
//!
//! Descriptor-driven encode/decode of message values.
//!
//! ## Encoding Rules
//! - Fields are written in ascending field-number order
//! - Singular scalars equal to their default are omitted
//! - Repeated scalars are written one tag/value pair per element (unpacked)
//! - A present message field is always written, even when empty
//! - Signed integers are written as their two's-complement bit pattern
//!
//! ## Decoding Rules
//! - Fields are accepted in any order
//! - Unknown field numbers are skipped
//! - Singular scalars: last value wins; singular messages merge
//! - Repeated fields append in wire order, packed or unpacked
//! - Any structural error rejects the whole message

mod decoder;
mod encoder;

use std::sync::Arc;

use bytes::Bytes;
use tracing::trace;

use crate::config::Config;
use crate::error::{ProtoError, Result};
use crate::schema::{MessageDescriptor, Registry};
use crate::value::MessageValue;

/// Encodes and decodes messages against an explicit registry
///
/// The registry resolves embedded message types at first use, so it must
/// hold every referenced type before the call that needs it.
#[derive(Debug, Clone)]
pub struct Codec<'r> {
    registry: &'r Registry,
    config: Config,
}

impl<'r> Codec<'r> {
    /// Create a codec with default limits
    pub fn new(registry: &'r Registry) -> Self {
        Self::with_config(registry, Config::default())
    }

    pub fn with_config(registry: &'r Registry, config: Config) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Serialize `value` as an instance of `descriptor`
    pub fn encode(&self, descriptor: &MessageDescriptor, value: &MessageValue) -> Result<Bytes> {
        let writer = encoder::Encoder::new(self);
        let sizes = writer.size(descriptor, value)?;
        if sizes.total > self.config.max_message_size {
            return Err(ProtoError::MessageTooLarge {
                size: sizes.total,
                max: self.config.max_message_size,
            });
        }

        let bytes = writer.encode(descriptor, value, &sizes)?;
        trace!(type_name = descriptor.full_name(), bytes = bytes.len(), "encoded message");
        Ok(bytes)
    }

    /// Exact number of bytes `encode` would produce
    pub fn encoded_len(&self, descriptor: &MessageDescriptor, value: &MessageValue) -> Result<usize> {
        Ok(encoder::Encoder::new(self).size(descriptor, value)?.total)
    }

    /// Parse `bytes` as a fresh instance of `descriptor`
    pub fn decode(&self, descriptor: &Arc<MessageDescriptor>, bytes: &[u8]) -> Result<MessageValue> {
        self.check_input_size(bytes)?;

        let mut value = MessageValue::new(Arc::clone(descriptor));
        decoder::Decoder::new(self).decode_into(descriptor, &mut value, bytes, 0)?;
        trace!(type_name = descriptor.full_name(), bytes = bytes.len(), "decoded message");
        Ok(value)
    }

    /// Parse `bytes` on top of an existing value
    ///
    /// Scalars overwrite, repeated fields append and embedded messages
    /// merge. On error `value` is left untouched.
    pub fn merge(&self, descriptor: &MessageDescriptor, value: &mut MessageValue, bytes: &[u8]) -> Result<()> {
        self.check_input_size(bytes)?;

        check_instance(descriptor, value)?;

        let mut scratch = value.clone();
        decoder::Decoder::new(self).decode_into(descriptor, &mut scratch, bytes, 0)?;
        *value = scratch;
        Ok(())
    }

    /// Resolve a type name and decode
    pub fn decode_type(&self, type_name: &str, bytes: &[u8]) -> Result<MessageValue> {
        let descriptor = self.registry.resolve(type_name)?;
        self.decode(&descriptor, bytes)
    }

    /// Encode using the descriptor the value is bound to
    pub fn encode_value(&self, value: &MessageValue) -> Result<Bytes> {
        self.encode(value.descriptor(), value)
    }

    fn check_input_size(&self, bytes: &[u8]) -> Result<()> {
        if bytes.len() > self.config.max_message_size {
            return Err(ProtoError::MessageTooLarge {
                size: bytes.len(),
                max: self.config.max_message_size,
            });
        }
        Ok(())
    }

    fn check_depth(&self, depth: u32) -> Result<()> {
        if depth > self.config.max_depth {
            return Err(ProtoError::RecursionLimit(self.config.max_depth));
        }
        Ok(())
    }
}

/// Reject a value whose field layout is not `descriptor`'s
fn check_instance(descriptor: &MessageDescriptor, value: &MessageValue) -> Result<()> {
    if value.is_instance_of(descriptor) {
        return Ok(());
    }

    let found = if value.type_name() == descriptor.full_name() {
        format!("{} from another registry", value.type_name())
    } else {
        value.type_name().to_string()
    };
    Err(ProtoError::TypeMismatch {
        field: descriptor.full_name().to_string(),
        expected: descriptor.full_name().to_string(),
        found,
    })
}
