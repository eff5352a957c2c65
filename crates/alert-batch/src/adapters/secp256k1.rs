//! # secp256k1 Batch Signer
//!
//! Ethereum-style aggregator key: ECDSA over keccak256(message), 65-byte
//! `r || s || v` signatures, identity is the `0x` address.

use crate::ports::outbound::{BatchSigner, SigningError};
use shared_crypto::ecdsa::address_to_hex;
use shared_crypto::Secp256k1KeyPair;
use shared_types::{PublicKey, Signature, SignatureAlgorithm};
use tracing::error;

/// Signs batches with an in-process secp256k1 key.
pub struct Secp256k1BatchSigner {
    keypair: Secp256k1KeyPair,
    identity: String,
}

impl Secp256k1BatchSigner {
    /// Wrap a keypair. The signer identity is its Ethereum address.
    pub fn new(keypair: Secp256k1KeyPair) -> Self {
        let identity = address_to_hex(&keypair.address());
        Self { keypair, identity }
    }

    /// Fresh random key, for tests and ephemeral aggregators.
    pub fn generate() -> Self {
        Self::new(Secp256k1KeyPair::generate())
    }

    /// Algorithm-tagged compressed public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::new(
            SignatureAlgorithm::Secp256k1Keccak,
            self.keypair.public_key().as_bytes().to_vec(),
        )
    }

    /// `0x`-prefixed address carried in every signature.
    pub fn identity(&self) -> &str {
        &self.identity
    }
}

impl BatchSigner for Secp256k1BatchSigner {
    fn algorithm(&self) -> SignatureAlgorithm {
        SignatureAlgorithm::Secp256k1Keccak
    }

    fn sign(&self, message: &[u8]) -> Result<Signature, SigningError> {
        let signature = self.keypair.sign(message).map_err(|e| {
            error!(signer = %self.identity, error = %e, "[alert-batch] secp256k1 signing failed");
            SigningError::Unavailable(e.to_string())
        })?;

        Ok(Signature::new(
            SignatureAlgorithm::Secp256k1Keccak,
            self.identity.clone(),
            signature.as_bytes().to_vec(),
        ))
    }
}
