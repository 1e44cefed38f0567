//! # vtproto
//!
//! A descriptor-driven codec for the protobuf (proto3) wire format, with:
//! - Runtime-introspectable message, field and file descriptors
//! - A name-keyed registry with late-bound cross-file references
//! - Deterministic encoding (ascending field numbers, default omission)
//! - Forward-compatible decoding (unknown fields skipped)
//! - The `replicationdata` and `vtctldata` schemas
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Codec                                 │
//! │            (encode / decode / merge / encoded_len)           │
//! └──────────────┬──────────────────────────────┬───────────────┘
//!                │                              │
//!                ▼                              ▼
//!   ┌────────────────────────┐     ┌────────────────────────┐
//!   │        Registry        │     │     Wire primitives    │
//!   │ (RwLock, Arc'd descs)  │     │   (varint, tag, skip)  │
//!   └───────────┬────────────┘     └────────────────────────┘
//!               │
//!               ▼
//!   ┌────────────────────────┐
//!   │  MessageValue / Value  │
//!   │ (defaults, repeated)   │
//!   └────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use vtproto::{Codec, Registry};
//! use vtproto::schemas::replicationdata;
//!
//! let registry = Registry::with_builtin_schemas().unwrap();
//! let descriptor = registry.resolve(replicationdata::STATUS).unwrap();
//!
//! let mut status = registry.new_message(replicationdata::STATUS).unwrap();
//! status.set("master_port", 3306).unwrap();
//!
//! let codec = Codec::new(&registry);
//! let bytes = codec.encode(&descriptor, &status).unwrap();
//! assert_eq!(&bytes[..], &[0x30, 0xea, 0x19]);
//!
//! let decoded = codec.decode(&descriptor, &bytes).unwrap();
//! assert_eq!(decoded, status);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod wire;
pub mod value;
pub mod schema;
pub mod codec;
pub mod schemas;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ProtoError, Result};
pub use config::Config;
pub use codec::Codec;
pub use schema::{Cardinality, FieldDescriptor, FieldKind, FileDescriptor, MessageDescriptor, Registry};
pub use value::{MessageValue, Value};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of vtproto
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
