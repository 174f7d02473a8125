//! Encoder configuration.

use serde::{Deserialize, Serialize};

use crate::chunk::DEFAULT_CHUNK_CAPACITY;

/// Settings for an [`IndexedEncoder`](crate::encode::IndexedEncoder).
///
/// Missing fields fall back to their defaults when deserializing, so an empty
/// object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Abort on the first colored, partially covered pixel instead of
    /// logging it once and continuing.
    pub strict_pixels: bool,
    /// Initial capacity of the chunk payload buffer in bytes.
    pub chunk_capacity: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            strict_pixels: false,
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
        }
    }
}

impl EncoderConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = EncoderConfig::new();
        assert!(config.is_default());
        assert!(!config.strict_pixels);
        assert_eq!(config.chunk_capacity, 65536);
    }

    #[test]
    fn test_config_not_default() {
        let mut config = EncoderConfig::new();
        config.strict_pixels = true;
        assert!(!config.is_default());
    }
}
