//! # Signature Verifier Adapter
//!
//! Dispatches on the key's algorithm to the matching `shared-crypto`
//! primitive. Any parse or verification failure is reported as `false`;
//! the reason is logged at debug level.

use crate::ports::outbound::SignatureVerifier;
use shared_crypto::{
    CryptoError, Ed25519PublicKey, Ed25519Signature, Secp256k1PublicKey, Secp256k1Signature,
};
use shared_types::{PublicKey, Signature, SignatureAlgorithm};
use tracing::debug;

/// Verifier backed by the in-process crypto primitives.
#[derive(Debug, Clone, Copy, Default)]
pub struct CryptoSignatureVerifier;

impl CryptoSignatureVerifier {
    pub fn new() -> Self {
        Self
    }
}

impl SignatureVerifier for CryptoSignatureVerifier {
    fn verify(&self, message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
        if signature.algorithm() != public_key.algorithm() {
            return false;
        }

        let result = match public_key.algorithm() {
            SignatureAlgorithm::Secp256k1Keccak => verify_secp256k1(message, signature, public_key),
            SignatureAlgorithm::Ed25519 => verify_ed25519(message, signature, public_key),
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                debug!(
                    algorithm = %public_key.algorithm(),
                    reason = %e,
                    "[alert-batch] Signature rejected by crypto provider"
                );
                false
            }
        }
    }
}

fn verify_secp256k1(
    message: &[u8],
    signature: &Signature,
    public_key: &PublicKey,
) -> Result<(), CryptoError> {
    let key = Secp256k1PublicKey::from_slice(public_key.bytes())?;
    let sig = Secp256k1Signature::from_slice(signature.bytes())?;
    key.verify(message, &sig)
}

fn verify_ed25519(
    message: &[u8],
    signature: &Signature,
    public_key: &PublicKey,
) -> Result<(), CryptoError> {
    let key = Ed25519PublicKey::from_slice(public_key.bytes())?;
    let sig = Ed25519Signature::from_slice(signature.bytes())?;
    key.verify(message, &sig)
}
