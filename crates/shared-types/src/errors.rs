//! # Error Types
//!
//! Defines the format errors raised by the shared value objects.

use thiserror::Error;

/// A value object field violated its format.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    /// A required string field was empty.
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    /// A hex field was not `0x` followed by lowercase hex digits.
    #[error("{field} is not canonical hex: {value:?}")]
    NonCanonicalHex { field: &'static str, value: String },
}

/// A numeric severity outside the closed enumeration.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Invalid severity rank: {0}")]
pub struct InvalidSeverity(pub u8);

/// A numeric signature algorithm tag that names no known algorithm.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Unknown signature algorithm tag: {0}")]
pub struct UnknownAlgorithm(pub u8);
