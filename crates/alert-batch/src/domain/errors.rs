//! # Alert Batch Errors
//!
//! One error enum per pipeline stage, plus `BatchError` for callers that
//! drive the whole build/sign/accept flow.
//!
//! Building, encoding, decoding and validation are pure, so the same invalid
//! input always yields the same error.

use crate::ports::outbound::SigningError;
use shared_types::{FieldError, InvalidSeverity, Severity, SignatureAlgorithm, UnknownAlgorithm};
use thiserror::Error;

/// Errors raised while assembling an `AlertBatch`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    /// `block_start` is greater than `block_end`.
    #[error("Empty range: block_start {start} > block_end {end}")]
    EmptyRange { start: u64, end: u64 },

    /// The range spans more blocks than the configured maximum.
    #[error("Range too large: {span} blocks > {max}")]
    RangeTooLarge { span: u64, max: u64 },

    /// A supplied block lies outside `[start, end]`.
    #[error("Block {number} out of range [{start}, {end}]")]
    BlockOutOfRange { number: u64, start: u64, end: u64 },

    /// Two inputs share a block number.
    #[error("Duplicate block: {0}")]
    DuplicateBlock(u64),

    /// Inputs are not in ascending block order. The builder never reorders.
    #[error("Unordered blocks: {current} supplied after {previous}")]
    UnorderedBlocks { previous: u64, current: u64 },

    /// More findings than an `alert_count` can represent.
    #[error("Alert count overflow: {0} findings")]
    AlertCountOverflow(u64),

    /// A value object failed its format check.
    #[error("Invalid field: {0}")]
    InvalidField(#[from] FieldError),
}

/// Errors raised by the canonical encoder.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// A value object failed its format check.
    #[error("Invalid field: {0}")]
    InvalidField(#[from] FieldError),

    /// A string, byte field or sequence exceeds its declared maximum.
    #[error("Field {field} too long: {len} > {max}")]
    LimitExceeded {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

/// Errors raised by the canonical decoder.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The leading version byte is not one this decoder understands.
    #[error("Unsupported encoding version: {0}")]
    UnsupportedVersion(u8),

    /// Input ended inside a field.
    #[error("Truncated input: needed {needed} bytes at offset {offset}")]
    Truncated { offset: usize, needed: usize },

    /// Bytes remain after the batch was fully read.
    #[error("Trailing bytes: {0}")]
    TrailingBytes(usize),

    /// A severity rank outside the closed enumeration.
    #[error(transparent)]
    InvalidSeverity(#[from] InvalidSeverity),

    /// A signature algorithm tag outside the closed enumeration.
    #[error(transparent)]
    InvalidAlgorithm(#[from] UnknownAlgorithm),

    /// A string field is not valid UTF-8.
    #[error("Field {field} is not valid UTF-8")]
    InvalidUtf8 { field: &'static str },

    /// A length prefix exceeds its declared maximum.
    #[error("Field {field} too long: {len} > {max}")]
    LimitExceeded {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// A decoded value object failed its format check.
    #[error("Invalid field: {0}")]
    InvalidField(#[from] FieldError),
}

/// Errors raised when checking a signed batch against a public key.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerificationError {
    /// The signature does not cover the recomputed canonical bytes.
    #[error("Signature mismatch")]
    SignatureMismatch,

    /// The signature and key name different schemes.
    #[error("Algorithm mismatch: signature is {signature}, key is {key}")]
    AlgorithmMismatch {
        signature: SignatureAlgorithm,
        key: SignatureAlgorithm,
    },

    /// The batch could not be re-encoded.
    #[error("Malformed batch: {0}")]
    MalformedBatch(#[from] EncodeError),
}

/// Which invariant of the block range was broken.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RangeFault {
    /// `block_start` is greater than `block_end`.
    #[error("block_start {start} > block_end {end}")]
    Inverted { start: u64, end: u64 },

    /// A block lies outside `[start, end]`.
    #[error("block {number} outside [{start}, {end}]")]
    BlockOutside { number: u64, start: u64, end: u64 },

    /// The range spans more blocks than the configured maximum.
    #[error("span of {span} blocks exceeds {max}")]
    TooLarge { span: u64, max: u64 },
}

/// Which declared aggregate disagrees with the recomputed traversal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AggregateFault {
    /// Declared `alert_count` differs from the number of reachable findings.
    #[error("alert_count declared {declared}, computed {computed}")]
    AlertCount { declared: u32, computed: u64 },

    /// Declared `max_severity` differs from the lattice-max of the findings.
    #[error("max_severity declared {declared}, computed {computed}")]
    MaxSeverity {
        declared: Severity,
        computed: Severity,
    },
}

/// Invariant violations found by `validate`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Range invariant broken.
    #[error("Range violation: {0}")]
    RangeViolation(RangeFault),

    /// Blocks are not strictly ascending (equal numbers are duplicates).
    #[error("Ordering violation: block {current} follows block {previous}")]
    OrderingViolation { previous: u64, current: u64 },

    /// Declared aggregates do not match the findings.
    #[error("Aggregate mismatch: {0}")]
    AggregateMismatch(AggregateFault),

    /// A nested value object failed its format check.
    #[error("Malformed field: {0}")]
    MalformedField(#[from] FieldError),
}

/// Umbrella error for the end-to-end service flows.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BatchError {
    /// Building failed.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Encoding failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Decoding failed.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The batch failed validation before signing; it was not signed.
    #[error("Batch failed validation: {0}")]
    Invalid(#[from] ValidationError),

    /// The external signing capability failed. Never retried here.
    #[error("Signing unavailable: {0}")]
    SigningUnavailable(#[from] SigningError),

    /// Signature verification failed.
    #[error(transparent)]
    Verification(#[from] VerificationError),

    /// The signature verified but the batch is internally inconsistent.
    #[error("Batch rejected after verification: {0}")]
    Rejected(ValidationError),
}
