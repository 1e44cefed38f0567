//! Value Module
//!
//! In-memory representation of message instances.
//!
//! ## Responsibilities
//! - One tagged variant per field kind (`Value`)
//! - Messages bound to their descriptor, defaults populated up front
//! - Type-checked assignment, repeated appends, merge
//!
//! ## Presence Rules
//! - Singular scalars always hold a value; the default and "absent" are
//!   the same thing
//! - Repeated fields always hold a list, possibly empty
//! - Singular message fields are `Message(None)` until set; a present but
//!   empty message is distinct from an absent one

mod message;

pub use message::MessageValue;

use crate::schema::FieldKind;

/// A field value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int32(i32),
    Int64(i64),
    Uint32(u32),
    Uint64(u64),
    Bool(bool),
    String(String),
    Fixed32(u32),

    /// Embedded message; `None` means absent
    Message(Option<Box<MessageValue>>),

    /// Elements of a repeated field
    List(Vec<Value>),
}

impl Value {
    /// Short name of the variant, for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Int32(_) => "int32",
            Value::Int64(_) => "int64",
            Value::Uint32(_) => "uint32",
            Value::Uint64(_) => "uint64",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::Fixed32(_) => "fixed32",
            Value::Message(_) => "message",
            Value::List(_) => "list",
        }
    }

    /// True for zero scalars, empty lists and absent messages
    pub fn is_default(&self) -> bool {
        match self {
            Value::Int32(v) => *v == 0,
            Value::Int64(v) => *v == 0,
            Value::Uint32(v) | Value::Fixed32(v) => *v == 0,
            Value::Uint64(v) => *v == 0,
            Value::Bool(v) => !*v,
            Value::String(v) => v.is_empty(),
            Value::Message(v) => v.is_none(),
            Value::List(v) => v.is_empty(),
        }
    }

    /// Convert a scalar into the variant `kind` stores
    ///
    /// Only `uint32` and `fixed32` share a Rust type and convert into each
    /// other; any other mismatch returns `None`.
    pub(crate) fn coerce(self, kind: &FieldKind) -> Option<Value> {
        match (kind, self) {
            (FieldKind::Int32, v @ Value::Int32(_)) => Some(v),
            (FieldKind::Int64, v @ Value::Int64(_)) => Some(v),
            (FieldKind::Uint32, Value::Uint32(v) | Value::Fixed32(v)) => Some(Value::Uint32(v)),
            (FieldKind::Fixed32, Value::Uint32(v) | Value::Fixed32(v)) => Some(Value::Fixed32(v)),
            (FieldKind::Uint64, v @ Value::Uint64(_)) => Some(v),
            (FieldKind::Bool, v @ Value::Bool(_)) => Some(v),
            (FieldKind::String, v @ Value::String(_)) => Some(v),
            (FieldKind::Message(_), Value::Message(None)) => Some(Value::Message(None)),
            (FieldKind::Message(target), Value::Message(Some(m))) if m.type_name() == target.as_str() => {
                Some(Value::Message(Some(m)))
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Signed integers, widened to i64
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int32(v) => Some(i64::from(*v)),
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Unsigned integers, widened to u64
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Uint32(v) | Value::Fixed32(v) => Some(u64::from(*v)),
            Value::Uint64(v) => Some(*v),
            _ => None,
        }
    }

    /// Present embedded message
    pub fn as_message(&self) -> Option<&MessageValue> {
        match self {
            Value::Message(Some(m)) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Uint32(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<MessageValue> for Value {
    fn from(v: MessageValue) -> Self {
        Value::Message(Some(Box::new(v)))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}
