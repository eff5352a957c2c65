//! # Keccak-256 Hashing
//!
//! Ethereum-compatible Keccak-256 (the pre-standard SHA-3 padding), used as
//! the ECDSA prehash and as the content address of a canonical batch.

use sha3::{Digest, Keccak256};

/// Keccak-256 output (256-bit).
pub type Hash = [u8; 32];

/// Hash data with Keccak-256 (one-shot).
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}
