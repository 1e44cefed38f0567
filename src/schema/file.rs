//! File descriptors
//!
//! Groups the messages of one schema file with its metadata.

use std::sync::Arc;

use super::descriptor::{FieldDescriptor, MessageDescriptor};
use crate::error::{ProtoError, Result};

/// Syntax every schema file here declares
pub const PROTO3: &str = "proto3";

/// One schema file: package, dependencies, options and messages
///
/// Metadata is descriptive only and never affects wire bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    name: String,
    package: String,
    syntax: String,
    dependencies: Vec<String>,
    go_package: Option<String>,
    messages: Vec<Arc<MessageDescriptor>>,
}

impl FileDescriptor {
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            syntax: PROTO3.to_string(),
            dependencies: Vec::new(),
            go_package: None,
            messages: Vec::new(),
        }
    }

    /// Record an imported file
    pub fn dependency(mut self, file: impl Into<String>) -> Self {
        self.dependencies.push(file.into());
        self
    }

    /// Set the output-path option
    pub fn go_package(mut self, path: impl Into<String>) -> Self {
        self.go_package = Some(path.into());
        self
    }

    /// Declare a message in this file's package
    pub fn message(mut self, name: &str, fields: Vec<FieldDescriptor>) -> Result<Self> {
        let descriptor = MessageDescriptor::new(self.package.clone(), name, fields)?;
        if self.messages.iter().any(|m| m.full_name() == descriptor.full_name()) {
            return Err(ProtoError::InvalidDescriptor(format!(
                "{} declares {} twice",
                self.name,
                descriptor.full_name()
            )));
        }
        self.messages.push(Arc::new(descriptor));
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn syntax(&self) -> &str {
        &self.syntax
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn go_package_option(&self) -> Option<&str> {
        self.go_package.as_deref()
    }

    pub fn messages(&self) -> &[Arc<MessageDescriptor>] {
        &self.messages
    }
}
