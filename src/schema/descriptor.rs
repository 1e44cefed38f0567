//! Field and message descriptors
//!
//! Static metadata describing the shape of a message type.

use std::collections::HashMap;
use std::fmt;

use crate::error::{ProtoError, Result};
use crate::value::Value;
use crate::wire::{WireType, MAX_FIELD_NUMBER};

/// Declared kind of a field
///
/// Every variant maps to exactly one wire type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Int32,
    Int64,
    Uint32,
    Uint64,
    Bool,
    String,
    Fixed32,
    /// Embedded message, referenced by fully qualified type name
    Message(String),
}

impl FieldKind {
    /// Shorthand for an embedded message reference
    pub fn message(type_name: impl Into<String>) -> Self {
        FieldKind::Message(type_name.into())
    }

    pub fn wire_type(&self) -> WireType {
        match self {
            FieldKind::Int32
            | FieldKind::Int64
            | FieldKind::Uint32
            | FieldKind::Uint64
            | FieldKind::Bool => WireType::Varint,
            FieldKind::Fixed32 => WireType::Fixed32,
            FieldKind::String | FieldKind::Message(_) => WireType::LengthDelimited,
        }
    }

    /// Zero value of a singular field of this kind
    pub fn default_value(&self) -> Value {
        match self {
            FieldKind::Int32 => Value::Int32(0),
            FieldKind::Int64 => Value::Int64(0),
            FieldKind::Uint32 => Value::Uint32(0),
            FieldKind::Uint64 => Value::Uint64(0),
            FieldKind::Bool => Value::Bool(false),
            FieldKind::String => Value::String(String::new()),
            FieldKind::Fixed32 => Value::Fixed32(0),
            FieldKind::Message(_) => Value::Message(None),
        }
    }

    /// Whether repeated fields of this kind may arrive packed
    pub fn is_packable(&self) -> bool {
        matches!(self.wire_type(), WireType::Varint | WireType::Fixed32)
    }

    /// Target type name for message fields
    pub fn message_type(&self) -> Option<&str> {
        match self {
            FieldKind::Message(name) => Some(name),
            _ => None,
        }
    }

    /// Name as written in a .proto file
    pub fn type_name(&self) -> &str {
        match self {
            FieldKind::Int32 => "int32",
            FieldKind::Int64 => "int64",
            FieldKind::Uint32 => "uint32",
            FieldKind::Uint64 => "uint64",
            FieldKind::Bool => "bool",
            FieldKind::String => "string",
            FieldKind::Fixed32 => "fixed32",
            FieldKind::Message(name) => name,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Singular or repeated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    Singular,
    Repeated,
}

/// Describes one field of a message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    full_name: String,
    number: u32,
    index: usize,
    kind: FieldKind,
    cardinality: Cardinality,
}

impl FieldDescriptor {
    /// Declare a singular field
    pub fn singular(name: impl Into<String>, number: u32, kind: FieldKind) -> Self {
        Self::new(name, number, kind, Cardinality::Singular)
    }

    /// Declare a repeated field
    pub fn repeated(name: impl Into<String>, number: u32, kind: FieldKind) -> Self {
        Self::new(name, number, kind, Cardinality::Repeated)
    }

    fn new(name: impl Into<String>, number: u32, kind: FieldKind, cardinality: Cardinality) -> Self {
        let name = name.into();
        Self {
            full_name: name.clone(),
            name,
            number,
            index: 0,
            kind,
            cardinality,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `package.Message.field`, set once the owning message is built
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    /// Position in the owning message's declaration order
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn is_repeated(&self) -> bool {
        self.cardinality == Cardinality::Repeated
    }

    pub fn wire_type(&self) -> WireType {
        self.kind.wire_type()
    }

    /// Value a freshly built message holds for this field
    pub fn default_value(&self) -> Value {
        match self.cardinality {
            Cardinality::Repeated => Value::List(Vec::new()),
            Cardinality::Singular => self.kind.default_value(),
        }
    }
}

/// A named, ordered sequence of field descriptors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDescriptor {
    name: String,
    package: String,
    full_name: String,
    fields: Vec<FieldDescriptor>,
    by_number: HashMap<u32, usize>,
    by_name: HashMap<String, usize>,
}

impl MessageDescriptor {
    /// Build a message descriptor
    ///
    /// Fails if a field number is out of range or a name/number repeats.
    pub fn new(
        package: impl Into<String>,
        name: impl Into<String>,
        fields: Vec<FieldDescriptor>,
    ) -> Result<Self> {
        let package = package.into();
        let name = name.into();
        let full_name = if package.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", package, name)
        };

        let mut by_number = HashMap::with_capacity(fields.len());
        let mut by_name = HashMap::with_capacity(fields.len());
        let mut indexed = Vec::with_capacity(fields.len());

        for (index, mut field) in fields.into_iter().enumerate() {
            if field.number == 0 || field.number > MAX_FIELD_NUMBER {
                return Err(ProtoError::InvalidDescriptor(format!(
                    "{}.{}: field number {} out of range",
                    full_name, field.name, field.number
                )));
            }
            if by_number.insert(field.number, index).is_some() {
                return Err(ProtoError::InvalidDescriptor(format!(
                    "{}: field number {} used twice",
                    full_name, field.number
                )));
            }
            if by_name.insert(field.name.clone(), index).is_some() {
                return Err(ProtoError::InvalidDescriptor(format!(
                    "{}: field name '{}' used twice",
                    full_name, field.name
                )));
            }

            field.index = index;
            field.full_name = format!("{}.{}", full_name, field.name);
            indexed.push(field);
        }

        Ok(Self {
            name,
            package,
            full_name,
            fields: indexed,
            by_number,
            by_name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// `package.Name`
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field_by_number(&self, number: u32) -> Option<&FieldDescriptor> {
        self.by_number.get(&number).map(|&i| &self.fields[i])
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.by_name.get(name).map(|&i| &self.fields[i])
    }

    /// Fields in ascending field-number order (canonical wire order)
    pub fn fields_by_number(&self) -> Vec<&FieldDescriptor> {
        let mut fields: Vec<&FieldDescriptor> = self.fields.iter().collect();
        fields.sort_by_key(|f| f.number);
        fields
    }
}
