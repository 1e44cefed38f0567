//! Schema registry
//!
//! Name-keyed table of message descriptors with late-bound references.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use super::descriptor::MessageDescriptor;
use super::file::FileDescriptor;
use crate::error::{ProtoError, Result};
use crate::value::MessageValue;

/// Registry of message descriptors
///
/// ## Concurrency Model: Single-Writer / Multiple-Reader
///
/// - **Writes** (register/register_file): exclusive lock, expected to
///   finish before encode/decode callers start
/// - **Reads** (resolve): shared lock, descriptors handed out as `Arc`
///   so they stay valid after the guard is dropped
///
/// Lock order is always `files` then `messages`.
#[derive(Debug, Default)]
pub struct Registry {
    /// Fully qualified type name -> descriptor
    messages: RwLock<HashMap<String, Arc<MessageDescriptor>>>,

    /// File name -> file metadata
    files: RwLock<HashMap<String, Arc<FileDescriptor>>>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a message descriptor
    pub fn register(&self, descriptor: MessageDescriptor) -> Result<Arc<MessageDescriptor>> {
        let descriptor = Arc::new(descriptor);
        let mut messages = self.messages.write();

        if messages.contains_key(descriptor.full_name()) {
            return Err(ProtoError::DuplicateType(descriptor.full_name().to_string()));
        }

        debug!(type_name = descriptor.full_name(), fields = descriptor.fields().len(), "registered message type");
        messages.insert(descriptor.full_name().to_string(), Arc::clone(&descriptor));
        Ok(descriptor)
    }

    /// Insert every message of a file, or none of them
    pub fn register_file(&self, file: FileDescriptor) -> Result<()> {
        let mut files = self.files.write();
        let mut messages = self.messages.write();

        if files.contains_key(file.name()) {
            return Err(ProtoError::DuplicateFile(file.name().to_string()));
        }
        for descriptor in file.messages() {
            if messages.contains_key(descriptor.full_name()) {
                return Err(ProtoError::DuplicateType(descriptor.full_name().to_string()));
            }
        }

        for descriptor in file.messages() {
            messages.insert(descriptor.full_name().to_string(), Arc::clone(descriptor));
        }

        debug!(
            file = file.name(),
            package = file.package(),
            messages = file.messages().len(),
            "registered schema file"
        );
        files.insert(file.name().to_string(), Arc::new(file));
        Ok(())
    }

    /// Look up a descriptor by fully qualified name
    pub fn resolve(&self, type_name: &str) -> Result<Arc<MessageDescriptor>> {
        self.messages
            .read()
            .get(type_name)
            .cloned()
            .ok_or_else(|| ProtoError::UnknownType(type_name.to_string()))
    }

    /// Build a message of the given type with every field at its default
    pub fn new_message(&self, type_name: &str) -> Result<MessageValue> {
        Ok(MessageValue::new(self.resolve(type_name)?))
    }

    /// Metadata of a registered file
    pub fn file(&self, name: &str) -> Option<Arc<FileDescriptor>> {
        self.files.read().get(name).cloned()
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.messages.read().contains_key(type_name)
    }

    /// Number of registered message types
    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }

    /// Registered type names, sorted
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.messages.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Verify every message-typed field points at a registered type
    ///
    /// Reports the first dangling reference in sorted order.
    pub fn check_references(&self) -> Result<()> {
        let messages = self.messages.read();

        let mut missing: Vec<&str> = messages
            .values()
            .flat_map(|descriptor| descriptor.fields())
            .filter_map(|field| field.kind().message_type())
            .filter(|target| !messages.contains_key(*target))
            .collect();
        missing.sort_unstable();

        match missing.first() {
            Some(target) => Err(ProtoError::UnknownType(target.to_string())),
            None => Ok(()),
        }
    }
}
