//! Alert batch configuration and validation
//!
//! Limits declared here bound every variable-length field of the canonical
//! encoding, on both the encode and the decode side, so a signer and a
//! verifier running the same configuration accept exactly the same batches.
//!
//! # Example
//!
//! ```ignore
//! use alert_batch::domain::BatchConfigBuilder;
//!
//! let config = BatchConfigBuilder::new()
//!     .max_string_len(1024)
//!     .parallel_threshold(128)
//!     .build()
//!     .expect("Valid config");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid configuration parameter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },
}

/// Alert batch configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Longest permitted string field, in bytes
    pub max_string_len: usize,
    /// Longest permitted opaque finding payload, in bytes
    pub max_payload_len: usize,
    /// Longest permitted signature, in bytes
    pub max_signature_len: usize,
    /// Longest permitted ordered sequence, in elements
    pub max_sequence_len: usize,
    /// Largest block span `block_end - block_start + 1`, unbounded when `None`
    pub max_blocks_per_batch: Option<u64>,
    /// Block count at or above which aggregation runs as a rayon map-reduce
    pub parallel_threshold: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_string_len: 4096,
            max_payload_len: 1024 * 1024, // 1 MiB
            max_signature_len: 1024,
            max_sequence_len: 100_000,
            max_blocks_per_batch: None,
            parallel_threshold: 64,
        }
    }
}

impl BatchConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_zero = [
            ("max_string_len", self.max_string_len),
            ("max_payload_len", self.max_payload_len),
            ("max_signature_len", self.max_signature_len),
            ("max_sequence_len", self.max_sequence_len),
            ("parallel_threshold", self.parallel_threshold),
        ];
        for (name, value) in non_zero {
            if value == 0 {
                return Err(ConfigError::InvalidParameter {
                    name,
                    reason: "must be greater than 0",
                });
            }
            // Length prefixes are u32 on the wire
            if name != "parallel_threshold" && value as u64 > u32::MAX as u64 {
                return Err(ConfigError::InvalidParameter {
                    name,
                    reason: "must fit a u32 length prefix",
                });
            }
        }

        if self.max_blocks_per_batch == Some(0) {
            return Err(ConfigError::InvalidParameter {
                name: "max_blocks_per_batch",
                reason: "must be greater than 0",
            });
        }

        Ok(())
    }

    /// Span of `[start, end]` and the configured maximum, when the span is
    /// over the limit. `start <= end` is assumed.
    pub fn span_over_limit(&self, start: u64, end: u64) -> Option<(u64, u64)> {
        let max = self.max_blocks_per_batch?;
        let span = (end - start).saturating_add(1);
        (span > max).then_some((span, max))
    }

    /// Builder-style method to set the string limit
    pub fn with_max_string_len(mut self, len: usize) -> Self {
        self.max_string_len = len;
        self
    }

    /// Builder-style method to set the parallel threshold
    pub fn with_parallel_threshold(mut self, blocks: usize) -> Self {
        self.parallel_threshold = blocks;
        self
    }
}

/// Builder for BatchConfig with validation
#[derive(Default)]
pub struct BatchConfigBuilder {
    max_string_len: Option<usize>,
    max_payload_len: Option<usize>,
    max_signature_len: Option<usize>,
    max_sequence_len: Option<usize>,
    max_blocks_per_batch: Option<u64>,
    parallel_threshold: Option<usize>,
}

impl BatchConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the longest permitted string field
    pub fn max_string_len(mut self, len: usize) -> Self {
        self.max_string_len = Some(len);
        self
    }

    /// Set the longest permitted finding payload
    pub fn max_payload_len(mut self, len: usize) -> Self {
        self.max_payload_len = Some(len);
        self
    }

    /// Set the longest permitted signature
    pub fn max_signature_len(mut self, len: usize) -> Self {
        self.max_signature_len = Some(len);
        self
    }

    /// Set the longest permitted sequence
    pub fn max_sequence_len(mut self, len: usize) -> Self {
        self.max_sequence_len = Some(len);
        self
    }

    /// Set the largest block span per batch
    pub fn max_blocks_per_batch(mut self, blocks: u64) -> Self {
        self.max_blocks_per_batch = Some(blocks);
        self
    }

    /// Set the block count that switches aggregation to rayon
    pub fn parallel_threshold(mut self, blocks: usize) -> Self {
        self.parallel_threshold = Some(blocks);
        self
    }

    /// Build the BatchConfig, validating all parameters
    pub fn build(self) -> Result<BatchConfig, ConfigError> {
        let config = self.build_unchecked();
        config.validate()?;
        Ok(config)
    }

    /// Build without validation (for internal use only)
    pub fn build_unchecked(self) -> BatchConfig {
        let defaults = BatchConfig::default();

        BatchConfig {
            max_string_len: self.max_string_len.unwrap_or(defaults.max_string_len),
            max_payload_len: self.max_payload_len.unwrap_or(defaults.max_payload_len),
            max_signature_len: self.max_signature_len.unwrap_or(defaults.max_signature_len),
            max_sequence_len: self.max_sequence_len.unwrap_or(defaults.max_sequence_len),
            max_blocks_per_batch: self.max_blocks_per_batch.or(defaults.max_blocks_per_batch),
            parallel_threshold: self.parallel_threshold.unwrap_or(defaults.parallel_threshold),
        }
    }
}
