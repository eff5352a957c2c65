//! # Outbound Ports (Driven Ports / SPI)
//!
//! The crypto capabilities this subsystem consumes. Implementations may sit
//! on an in-process key, a hardware key store or a remote HSM; the batch
//! service calls each of them exactly once per operation and never retries.

use shared_types::{PublicKey, Signature, SignatureAlgorithm};
use thiserror::Error;

/// Error from the signing capability.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SigningError {
    /// The key or the device holding it could not be used.
    #[error("Signer unavailable: {0}")]
    Unavailable(String),

    /// The capability produced a signature for a different scheme.
    #[error("Signer returned {actual} signature, expected {expected}")]
    WrongAlgorithm {
        expected: SignatureAlgorithm,
        actual: SignatureAlgorithm,
    },
}

/// Produces signatures over canonical batch bytes.
pub trait BatchSigner: Send + Sync {
    /// Scheme of the signatures this signer produces.
    fn algorithm(&self) -> SignatureAlgorithm;

    /// Sign `message`.
    ///
    /// # Errors
    /// * `SigningError::Unavailable` - the key could not be used
    fn sign(&self, message: &[u8]) -> Result<Signature, SigningError>;
}

/// Checks signatures over canonical batch bytes.
pub trait SignatureVerifier: Send + Sync {
    /// `true` iff `signature` is valid for `message` under `public_key`.
    ///
    /// Malformed keys or signatures verify as `false`.
    fn verify(&self, message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool;
}
