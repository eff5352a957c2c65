//! # Ed25519 Batch Signer

use crate::ports::outbound::{BatchSigner, SigningError};
use shared_crypto::Ed25519KeyPair;
use shared_types::{PublicKey, Signature, SignatureAlgorithm};

/// Signs batches with an in-process Ed25519 key. The signer identity is the
/// hex public key.
pub struct Ed25519BatchSigner {
    keypair: Ed25519KeyPair,
    identity: String,
}

impl Ed25519BatchSigner {
    /// Wrap a keypair. The signer identity is its `0x` hex public key.
    pub fn new(keypair: Ed25519KeyPair) -> Self {
        let identity = keypair.public_key().to_hex();
        Self { keypair, identity }
    }

    /// Fresh random key, for tests and ephemeral aggregators.
    pub fn generate() -> Self {
        Self::new(Ed25519KeyPair::generate())
    }

    /// Algorithm-tagged public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::new(
            SignatureAlgorithm::Ed25519,
            self.keypair.public_key().as_bytes().to_vec(),
        )
    }

    /// Hex public key carried in every signature.
    pub fn identity(&self) -> &str {
        &self.identity
    }
}

impl BatchSigner for Ed25519BatchSigner {
    fn algorithm(&self) -> SignatureAlgorithm {
        SignatureAlgorithm::Ed25519
    }

    // Ed25519 signing with an in-memory key cannot fail.
    fn sign(&self, message: &[u8]) -> Result<Signature, SigningError> {
        let signature = self.keypair.sign(message);
        Ok(Signature::new(
            SignatureAlgorithm::Ed25519,
            self.identity.clone(),
            signature.as_bytes().to_vec(),
        ))
    }
}
