//! # Alert Batch Service
//!
//! Application service layer that implements the `AlertBatchApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`AlertBatchApi`)
//! - Uses the outbound ports (`BatchSigner`, `SignatureVerifier`) for crypto
//! - Delegates building, encoding and validation to the domain layer
//!
//! ## Flows
//!
//! ```text
//! sign:   validate -> encode -> BatchSigner::sign -> SignedAlertBatch
//! verify: encode(signed.data) -> SignatureVerifier::verify
//! accept: verify -> validate -> trusted AlertBatch
//! ```

use crate::domain::builder;
use crate::domain::config::{BatchConfig, ConfigError};
use crate::domain::encoding;
use crate::domain::entities::{AlertBatch, BlockResults, SignedAlertBatch};
use crate::domain::errors::{
    BatchError, BuildError, DecodeError, EncodeError, ValidationError, VerificationError,
};
use crate::domain::validation;
use crate::ports::inbound::AlertBatchApi;
use crate::ports::outbound::{BatchSigner, SignatureVerifier, SigningError};
use rayon::prelude::*;
use shared_crypto::keccak256;
use shared_types::PublicKey;
use tracing::{debug, error, info, warn};

/// Alert Batch Service.
///
/// Holds no mutable state; one instance can serve any number of epochs
/// concurrently.
pub struct AlertBatchService<S: BatchSigner, V: SignatureVerifier> {
    signer: S,
    verifier: V,
    config: BatchConfig,
}

impl<S: BatchSigner, V: SignatureVerifier> AlertBatchService<S, V> {
    /// Create a service with the default configuration.
    ///
    /// # Arguments
    /// * `signer` - The aggregator's signing capability
    /// * `verifier` - The capability used to check received batches
    pub fn new(signer: S, verifier: V) -> Self {
        Self {
            signer,
            verifier,
            config: BatchConfig::default(),
        }
    }

    /// Create a service with a validated configuration.
    pub fn with_config(signer: S, verifier: V, config: BatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            signer,
            verifier,
            config,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// The signing capability.
    pub fn signer(&self) -> &S {
        &self.signer
    }

    fn check_signature(
        &self,
        signed: &SignedAlertBatch,
        public_key: &PublicKey,
    ) -> Result<(), VerificationError> {
        let signature = signed.signature();
        if signature.algorithm() != public_key.algorithm() {
            return Err(VerificationError::AlgorithmMismatch {
                signature: signature.algorithm(),
                key: public_key.algorithm(),
            });
        }

        // Always the recomputed bytes, never anything that travelled with the batch
        let bytes = encoding::encode(signed.data(), &self.config)?;

        if !self.verifier.verify(&bytes, signature, public_key) {
            return Err(VerificationError::SignatureMismatch);
        }
        Ok(())
    }
}

impl<S: BatchSigner, V: SignatureVerifier> AlertBatchApi for AlertBatchService<S, V> {
    fn build(
        &self,
        chain_id: u64,
        block_start: u64,
        block_end: u64,
        blocks: Vec<BlockResults>,
    ) -> Result<AlertBatch, BuildError> {
        builder::build(chain_id, block_start, block_end, blocks, &self.config)
    }

    fn validate(&self, batch: &AlertBatch) -> Result<(), ValidationError> {
        validation::validate(batch, &self.config)
    }

    fn encode(&self, batch: &AlertBatch) -> Result<Vec<u8>, EncodeError> {
        encoding::encode(batch, &self.config)
    }

    fn decode(&self, bytes: &[u8]) -> Result<AlertBatch, DecodeError> {
        encoding::decode(bytes, &self.config)
    }

    fn sign(&self, batch: AlertBatch) -> Result<SignedAlertBatch, BatchError> {
        validation::validate(&batch, &self.config)?;

        let bytes = encoding::encode(&batch, &self.config)?;
        let content_hash = keccak256(&bytes);

        let signature = self.signer.sign(&bytes).inspect_err(|e| {
            error!(
                chain_id = batch.chain_id(),
                content_hash = %hex::encode(content_hash),
                error = %e,
                "[alert-batch] Signing capability failed"
            );
        })?;

        if signature.algorithm() != self.signer.algorithm() {
            error!(
                expected = %self.signer.algorithm(),
                actual = %signature.algorithm(),
                "[alert-batch] Signer returned unexpected algorithm"
            );
            return Err(SigningError::WrongAlgorithm {
                expected: self.signer.algorithm(),
                actual: signature.algorithm(),
            }
            .into());
        }

        info!(
            chain_id = batch.chain_id(),
            block_start = batch.block_start(),
            block_end = batch.block_end(),
            alert_count = batch.alert_count(),
            content_hash = %hex::encode(content_hash),
            signer = %signature.signer(),
            "[alert-batch] Batch signed"
        );

        Ok(SignedAlertBatch::new(batch, signature))
    }

    fn verify(
        &self,
        signed: &SignedAlertBatch,
        public_key: &PublicKey,
    ) -> Result<(), VerificationError> {
        let batch = signed.data();
        match self.check_signature(signed, public_key) {
            Ok(()) => {
                debug!(
                    chain_id = batch.chain_id(),
                    block_start = batch.block_start(),
                    block_end = batch.block_end(),
                    "[alert-batch] Batch signature verified"
                );
                Ok(())
            }
            Err(e) => {
                warn!(
                    chain_id = batch.chain_id(),
                    block_start = batch.block_start(),
                    block_end = batch.block_end(),
                    signer = %signed.signature().signer(),
                    error = %e,
                    "[alert-batch] Batch signature rejected"
                );
                Err(e)
            }
        }
    }

    fn verify_many(
        &self,
        batches: &[SignedAlertBatch],
        public_key: &PublicKey,
    ) -> Vec<Result<(), VerificationError>> {
        batches
            .par_iter()
            .map(|signed| self.verify(signed, public_key))
            .collect()
    }

    fn accept(
        &self,
        signed: SignedAlertBatch,
        public_key: &PublicKey,
    ) -> Result<AlertBatch, BatchError> {
        self.verify(&signed, public_key)?;
        validation::validate(signed.data(), &self.config).map_err(BatchError::Rejected)?;

        let (batch, _) = signed.into_parts();
        Ok(batch)
    }
}
