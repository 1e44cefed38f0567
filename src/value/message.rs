//! Message values
//!
//! A message instance bound to its descriptor.

use std::fmt;
use std::sync::Arc;

use super::Value;
use crate::error::{ProtoError, Result};
use crate::schema::{FieldDescriptor, MessageDescriptor};

/// One instance of a message type
///
/// Holds one value per declared field, indexed by declaration position.
/// Equality compares the type name and every field value, so an explicitly
/// set default equals an untouched field.
#[derive(Clone)]
pub struct MessageValue {
    descriptor: Arc<MessageDescriptor>,
    values: Vec<Value>,
}

impl MessageValue {
    /// Create a message with every field at its default
    pub fn new(descriptor: Arc<MessageDescriptor>) -> Self {
        let values = descriptor.fields().iter().map(FieldDescriptor::default_value).collect();
        Self { descriptor, values }
    }

    pub fn descriptor(&self) -> &Arc<MessageDescriptor> {
        &self.descriptor
    }

    /// Fully qualified type name
    pub fn type_name(&self) -> &str {
        self.descriptor.full_name()
    }

    /// True if this value's field layout is `descriptor`'s
    ///
    /// Two registries may each hold a type under the same name with
    /// different fields, so the name alone is not enough.
    pub fn is_instance_of(&self, descriptor: &MessageDescriptor) -> bool {
        std::ptr::eq(Arc::as_ptr(&self.descriptor), descriptor) || *self.descriptor == *descriptor
    }

    fn field(&self, name: &str) -> Result<&FieldDescriptor> {
        self.descriptor
            .field_by_name(name)
            .ok_or_else(|| ProtoError::UnknownField {
                message: self.descriptor.full_name().to_string(),
                field: name.to_string(),
            })
    }

    /// Current value of a field
    pub fn get(&self, name: &str) -> Result<&Value> {
        let index = self.field(name)?.index();
        Ok(&self.values[index])
    }

    /// Assign a field
    ///
    /// Repeated fields take a `Value::List` and replace the whole sequence.
    /// Singular message fields accept `Value::Message(None)` to clear.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let field = self.field(name)?;
        let index = field.index();
        let value = check_value(field, value.into())?;
        self.values[index] = value;
        Ok(())
    }

    /// Append one element to a repeated field
    pub fn push(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let field = self.field(name)?;
        if !field.is_repeated() {
            return Err(ProtoError::TypeMismatch {
                field: field.full_name().to_string(),
                expected: field.kind().to_string(),
                found: "repeated element".to_string(),
            });
        }
        let index = field.index();
        let element = check_element(field, value.into())?;

        if let Value::List(items) = &mut self.values[index] {
            items.push(element);
        }
        Ok(())
    }

    /// Reset a field to its default
    pub fn clear(&mut self, name: &str) -> Result<()> {
        let field = self.field(name)?;
        let index = field.index();
        let default = field.default_value();
        self.values[index] = default;
        Ok(())
    }

    /// True if the field holds a non-default value or a present message
    pub fn has(&self, name: &str) -> Result<bool> {
        Ok(!self.get(name)?.is_default())
    }

    /// Names of fields that would appear on the wire, in field-number order
    pub fn set_fields(&self) -> Vec<&str> {
        self.descriptor
            .fields_by_number()
            .into_iter()
            .filter(|field| !self.values[field.index()].is_default())
            .map(FieldDescriptor::name)
            .collect()
    }

    /// Merge `other` into this message
    ///
    /// Non-default scalars overwrite, repeated fields append, and present
    /// sub-messages merge recursively (or are copied if absent here).
    pub fn merge_from(&mut self, other: &MessageValue) -> Result<()> {
        if !other.is_instance_of(&self.descriptor) {
            return Err(ProtoError::TypeMismatch {
                field: self.type_name().to_string(),
                expected: self.type_name().to_string(),
                found: other.type_name().to_string(),
            });
        }

        for (target, source) in self.values.iter_mut().zip(&other.values) {
            merge_value(target, source)?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Typed accessors
    // -------------------------------------------------------------------------

    pub fn get_str(&self, name: &str) -> Result<&str> {
        let value = self.get(name)?;
        value.as_str().ok_or_else(|| self.mismatch(name, "string", value))
    }

    pub fn get_bool(&self, name: &str) -> Result<bool> {
        let value = self.get(name)?;
        value.as_bool().ok_or_else(|| self.mismatch(name, "bool", value))
    }

    pub fn get_i64(&self, name: &str) -> Result<i64> {
        let value = self.get(name)?;
        value.as_i64().ok_or_else(|| self.mismatch(name, "signed integer", value))
    }

    pub fn get_u64(&self, name: &str) -> Result<u64> {
        let value = self.get(name)?;
        value.as_u64().ok_or_else(|| self.mismatch(name, "unsigned integer", value))
    }

    /// Embedded message, `None` if absent
    pub fn get_message(&self, name: &str) -> Result<Option<&MessageValue>> {
        match self.get(name)? {
            Value::Message(m) => Ok(m.as_deref()),
            other => Err(self.mismatch(name, "message", other)),
        }
    }

    pub fn get_list(&self, name: &str) -> Result<&[Value]> {
        let value = self.get(name)?;
        value.as_list().ok_or_else(|| self.mismatch(name, "list", value))
    }

    fn mismatch(&self, name: &str, expected: &str, found: &Value) -> ProtoError {
        ProtoError::TypeMismatch {
            field: format!("{}.{}", self.type_name(), name),
            expected: expected.to_string(),
            found: found.kind_name().to_string(),
        }
    }

    // -------------------------------------------------------------------------
    // Codec access
    // -------------------------------------------------------------------------

    pub(crate) fn value_at(&self, index: usize) -> &Value {
        &self.values[index]
    }

    pub(crate) fn value_at_mut(&mut self, index: usize) -> &mut Value {
        &mut self.values[index]
    }
}

impl PartialEq for MessageValue {
    fn eq(&self, other: &Self) -> bool {
        self.type_name() == other.type_name() && self.values == other.values
    }
}

impl fmt::Debug for MessageValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct(self.type_name());
        for field in self.descriptor.fields() {
            out.field(field.name(), &self.values[field.index()]);
        }
        out.finish()
    }
}

/// Validate a whole value for `field`, converting scalars where allowed
fn check_value(field: &FieldDescriptor, value: Value) -> Result<Value> {
    if field.is_repeated() {
        return match value {
            Value::List(items) => items
                .into_iter()
                .map(|item| check_element(field, item))
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
            other => Err(type_mismatch(field, "list", &other)),
        };
    }

    let found = value.kind_name();
    value.coerce(field.kind()).ok_or_else(|| ProtoError::TypeMismatch {
        field: field.full_name().to_string(),
        expected: field.kind().to_string(),
        found: found.to_string(),
    })
}

/// Validate one element of a repeated field
fn check_element(field: &FieldDescriptor, value: Value) -> Result<Value> {
    match value {
        Value::List(_) | Value::Message(None) => Err(type_mismatch(field, field.kind().type_name(), &value)),
        other => {
            let found = other.kind_name();
            other.coerce(field.kind()).ok_or_else(|| ProtoError::TypeMismatch {
                field: field.full_name().to_string(),
                expected: field.kind().to_string(),
                found: found.to_string(),
            })
        }
    }
}

fn type_mismatch(field: &FieldDescriptor, expected: &str, found: &Value) -> ProtoError {
    ProtoError::TypeMismatch {
        field: field.full_name().to_string(),
        expected: expected.to_string(),
        found: found.kind_name().to_string(),
    }
}

/// Merge one field value into another of the same field
fn merge_value(target: &mut Value, source: &Value) -> Result<()> {
    match source {
        Value::List(more) => {
            if let Value::List(items) = target {
                items.extend(more.iter().cloned());
            }
        }
        Value::Message(None) => {}
        Value::Message(Some(incoming)) => match target {
            Value::Message(Some(existing)) => existing.merge_from(incoming)?,
            _ => *target = Value::Message(Some(incoming.clone())),
        },
        scalar => {
            if !scalar.is_default() {
                *target = scalar.clone();
            }
        }
    }
    Ok(())
}
