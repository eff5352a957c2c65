//! # Adapters Layer
//!
//! Crypto adapters implementing the outbound ports on top of
//! `shared-crypto` keys.

pub mod ed25519;
pub mod secp256k1;
pub mod verifier;

pub use ed25519::Ed25519BatchSigner;
pub use secp256k1::Secp256k1BatchSigner;
pub use verifier::CryptoSignatureVerifier;
