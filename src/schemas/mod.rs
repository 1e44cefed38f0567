//! Schemas Module
//!
//! Descriptors of the concrete schema files.
//!
//! ### Files
//! - `replicationdata.proto` - `replicationdata.Status`
//! - `vtctldata.proto`       - `vtctldata.ExecuteVtctlCommandRequest`,
//!                             `vtctldata.ExecuteVtctlCommandResponse`
//!
//! `vtctldata` references `logutil.Event`, which this crate does not define.
//! Registration order does not matter; the reference is resolved on the
//! first encode/decode that reaches it.

pub mod replicationdata;
pub mod vtctldata;

use crate::error::Result;
use crate::schema::Registry;

/// Register every built-in schema file
pub fn register_builtin(registry: &Registry) -> Result<()> {
    registry.register_file(replicationdata::file_descriptor()?)?;
    registry.register_file(vtctldata::file_descriptor()?)?;
    Ok(())
}

impl Registry {
    /// Create a registry holding the built-in schema files
    pub fn with_builtin_schemas() -> Result<Self> {
        let registry = Registry::new();
        register_builtin(&registry)?;
        Ok(registry)
    }
}
