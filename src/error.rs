//! Error types for vtproto
//!
//! Provides a unified error type for registry, value and codec operations.

use thiserror::Error;

/// Result type alias using ProtoError
pub type Result<T> = std::result::Result<T, ProtoError>;

/// Unified error type for vtproto operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtoError {
    // -------------------------------------------------------------------------
    // Registry Errors
    // -------------------------------------------------------------------------
    #[error("Duplicate message type: {0}")]
    DuplicateType(String),

    #[error("Duplicate schema file: {0}")]
    DuplicateFile(String),

    #[error("Unknown message type: {0}")]
    UnknownType(String),

    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    // -------------------------------------------------------------------------
    // Value Errors
    // -------------------------------------------------------------------------
    #[error("Unknown field '{field}' in message {message}")]
    UnknownField { message: String, field: String },

    #[error("Type mismatch for {field}: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: String,
        found: String,
    },

    // -------------------------------------------------------------------------
    // Wire Errors
    // -------------------------------------------------------------------------
    #[error("Malformed wire data: {0}")]
    MalformedWireData(String),

    #[error("Nesting exceeds recursion limit of {0}")]
    RecursionLimit(u32),

    #[error("Message too large: {size} bytes (max {max})")]
    MessageTooLarge { size: usize, max: usize },
}

impl ProtoError {
    /// Shorthand for a `MalformedWireData` error
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ProtoError::MalformedWireData(reason.into())
    }
}
