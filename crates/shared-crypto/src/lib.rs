//! # Shared Crypto - Signing Primitives
//!
//! Concrete signature schemes behind the batch signer's opaque
//! `sign(bytes)` / `verify(bytes, signature, key)` capability.
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | Keccak-256 | Prehash, batch content addressing |
//! | `ecdsa` | secp256k1 | Ethereum-compatible aggregator keys |
//! | `signatures` | Ed25519 | Node identity keys |
//!
//! ## Security Properties
//!
//! - **secp256k1**: RFC 6979 deterministic, low-S normalization (EIP-2),
//!   65-byte recoverable `r || s || v` signatures over keccak256(message)
//! - **Ed25519**: Deterministic nonces, no RNG dependency
//! - Secret keys are wiped on drop by the curve crates' own signing key types

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;
pub mod signatures;

// Re-exports
pub use ecdsa::{EthAddress, Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1Signature};
pub use errors::CryptoError;
pub use hashing::{keccak256, Hash};
pub use signatures::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
