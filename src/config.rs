//! Configuration for the codec
//!
//! Centralized limits with sensible defaults.

/// Codec limits applied to every encode/decode call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Size Limits
    // -------------------------------------------------------------------------
    /// Largest message (in bytes) accepted by decode or produced by encode
    pub max_message_size: usize,

    // -------------------------------------------------------------------------
    // Nesting Limits
    // -------------------------------------------------------------------------
    /// Maximum depth of embedded messages; the top-level message is depth 0
    pub max_depth: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_message_size: 64 * 1024 * 1024, // 64 MB
            max_depth: 100,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the maximum message size (in bytes)
    pub fn max_message_size(mut self, size: usize) -> Self {
        self.config.max_message_size = size;
        self
    }

    /// Set the maximum nesting depth of embedded messages
    pub fn max_depth(mut self, depth: u32) -> Self {
        self.config.max_depth = depth;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
