//! Schema Module
//!
//! Descriptors and the registry that makes them resolvable by name.
//!
//! ## Responsibilities
//! - Describe fields: name, number, kind, cardinality, default
//! - Describe messages and the files that declare them
//! - Resolve cross-file message references at first use
//!
//! ## Naming
//! ```text
//! file:     vtctldata.proto
//! package:  vtctldata
//! message:  vtctldata.ExecuteVtctlCommandResponse
//! field:    vtctldata.ExecuteVtctlCommandResponse.event  -> logutil.Event
//! ```

mod descriptor;
mod file;
mod registry;

pub use descriptor::{Cardinality, FieldDescriptor, FieldKind, MessageDescriptor};
pub use file::{FileDescriptor, PROTO3};
pub use registry::Registry;
