//! # Inbound Ports (Driving Ports / API)
//!
//! The public API of the alert batch subsystem.

use crate::domain::entities::{AlertBatch, BlockResults, SignedAlertBatch};
use crate::domain::errors::{
    BatchError, BuildError, DecodeError, EncodeError, ValidationError, VerificationError,
};
use shared_types::PublicKey;

/// Primary Alert Batch API.
///
/// Every operation is independent of every other call, so implementations
/// must be thread-safe (`Send + Sync`) and may serve different epochs in
/// parallel.
pub trait AlertBatchApi: Send + Sync {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Assemble the batch for `[block_start, block_end]` and derive its
    /// aggregates. Blocks must be supplied in ascending order.
    ///
    /// # Errors
    /// * `BuildError::EmptyRange` - `block_start > block_end`
    /// * `BuildError::BlockOutOfRange` - a block lies outside the range
    /// * `BuildError::DuplicateBlock` - two blocks share a number
    fn build(
        &self,
        chain_id: u64,
        block_start: u64,
        block_end: u64,
        blocks: Vec<BlockResults>,
    ) -> Result<AlertBatch, BuildError>;

    /// Check range, ordering and aggregate invariants.
    fn validate(&self, batch: &AlertBatch) -> Result<(), ValidationError>;

    // =========================================================================
    // Canonical Encoding
    // =========================================================================

    /// Canonical bytes of `batch`.
    fn encode(&self, batch: &AlertBatch) -> Result<Vec<u8>, EncodeError>;

    /// Parse canonical bytes back into a batch.
    fn decode(&self, bytes: &[u8]) -> Result<AlertBatch, DecodeError>;

    // =========================================================================
    // Signing & Verification
    // =========================================================================

    /// Validate, encode and sign `batch`.
    ///
    /// # Errors
    /// * `BatchError::Invalid` - the batch failed validation and was not signed
    /// * `BatchError::Encode` - the batch could not be encoded
    /// * `BatchError::SigningUnavailable` - the signing capability failed
    fn sign(&self, batch: AlertBatch) -> Result<SignedAlertBatch, BatchError>;

    /// Check `signed.signature` against freshly recomputed canonical bytes of
    /// `signed.data`.
    ///
    /// # Errors
    /// * `VerificationError::SignatureMismatch` - signature does not verify
    /// * `VerificationError::AlgorithmMismatch` - signature and key schemes differ
    /// * `VerificationError::MalformedBatch` - `signed.data` cannot be encoded
    fn verify(
        &self,
        signed: &SignedAlertBatch,
        public_key: &PublicKey,
    ) -> Result<(), VerificationError>;

    /// Verify many batches in parallel. Results are in input order.
    fn verify_many(
        &self,
        batches: &[SignedAlertBatch],
        public_key: &PublicKey,
    ) -> Vec<Result<(), VerificationError>>;

    /// Verify, then validate. Returns the batch only when both pass.
    ///
    /// # Errors
    /// * `BatchError::Verification` - the signature check failed
    /// * `BatchError::Rejected` - the signature is valid but the batch breaks
    ///   an invariant
    fn accept(
        &self,
        signed: SignedAlertBatch,
        public_key: &PublicKey,
    ) -> Result<AlertBatch, BatchError>;
}
