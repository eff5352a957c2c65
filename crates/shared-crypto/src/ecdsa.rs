//! # ECDSA Signatures (secp256k1, Ethereum-style)
//!
//! Aggregator signatures compatible with Ethereum tooling.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Low-S normalization (EIP-2); high-S signatures are rejected on verify
//! - The signed digest is keccak256(message)
//!
//! ## Wire Format
//!
//! - Signature: 65 bytes `r || s || v`, `v` in `{27, 28}`
//! - Public key: 33-byte SEC1 compressed point
//! - Signer identity: 20-byte address, last 20 bytes of
//!   keccak256(uncompressed public key without the 0x04 prefix)

use crate::hashing::keccak256;
use crate::CryptoError;
use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};

/// 20-byte Ethereum-style address.
pub type EthAddress = [u8; 20];

/// Length of a compressed secp256k1 public key.
pub const PUBLIC_KEY_LEN: usize = 33;

/// Length of a recoverable signature.
pub const SIGNATURE_LEN: usize = 65;

fn address_of(key: &VerifyingKey) -> EthAddress {
    let uncompressed = key.to_encoded_point(false);
    // Skip the 0x04 prefix
    let hash = keccak256(&uncompressed.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// `0x`-prefixed lowercase hex of an address.
pub fn address_to_hex(address: &EthAddress) -> String {
    format!("0x{}", hex::encode(address))
}

/// Compressed secp256k1 public key (33 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secp256k1PublicKey([u8; PUBLIC_KEY_LEN]);

impl Secp256k1PublicKey {
    /// Create from compressed bytes (33 bytes, starting with 0x02 or 0x03).
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_LEN]) -> Result<Self, CryptoError> {
        VerifyingKey::from_sec1_bytes(&bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self(bytes))
    }

    /// Create from a SEC1 slice, compressed (33) or uncompressed (65).
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != PUBLIC_KEY_LEN && bytes.len() != 65 {
            return Err(CryptoError::InvalidKeyLength {
                expected: PUBLIC_KEY_LEN,
                actual: bytes.len(),
            });
        }
        let key = VerifyingKey::from_sec1_bytes(bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self::from_verifying_key(&key))
    }

    fn from_verifying_key(key: &VerifyingKey) -> Self {
        let compressed = key.to_encoded_point(true);
        let mut bytes = [0u8; PUBLIC_KEY_LEN];
        bytes.copy_from_slice(compressed.as_bytes());
        Self(bytes)
    }

    fn verifying_key(&self) -> Result<VerifyingKey, CryptoError> {
        VerifyingKey::from_sec1_bytes(&self.0).map_err(|_| CryptoError::InvalidPublicKey)
    }

    /// Get raw compressed bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    /// Ethereum address of this key.
    pub fn address(&self) -> Result<EthAddress, CryptoError> {
        Ok(address_of(&self.verifying_key()?))
    }

    /// Verify a signature over keccak256(message).
    pub fn verify(
        &self,
        message: &[u8],
        signature: &Secp256k1Signature,
    ) -> Result<(), CryptoError> {
        let verifying_key = self.verifying_key()?;
        let sig = signature.rs()?;

        // EIP-2: only the low-S form is accepted
        if sig.normalize_s().is_some() {
            return Err(CryptoError::InvalidSignatureFormat);
        }

        verifying_key
            .verify_prehash(&keccak256(message), &sig)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }
}

/// Recoverable ECDSA signature (65 bytes, `r || s || v`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secp256k1Signature([u8; SIGNATURE_LEN]);

impl Secp256k1Signature {
    /// Create from bytes (65 bytes).
    pub fn from_bytes(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    /// Create from a slice, checking the length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let array: [u8; SIGNATURE_LEN] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidSignatureLength {
                    expected: SIGNATURE_LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self(array))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    /// The `v` byte.
    pub fn v(&self) -> u8 {
        self.0[64]
    }

    fn rs(&self) -> Result<Signature, CryptoError> {
        Signature::from_slice(&self.0[..64]).map_err(|_| CryptoError::InvalidSignatureFormat)
    }

    fn recovery_id(&self) -> Result<RecoveryId, CryptoError> {
        let id = match self.v() {
            0 | 27 => 0,
            1 | 28 => 1,
            _ => return Err(CryptoError::InvalidSignatureFormat),
        };
        RecoveryId::try_from(id).map_err(|_| CryptoError::InvalidSignatureFormat)
    }

    /// Recover the signer's address for `message`.
    pub fn recover_address(&self, message: &[u8]) -> Result<EthAddress, CryptoError> {
        let key = VerifyingKey::recover_from_prehash(
            &keccak256(message),
            &self.rs()?,
            self.recovery_id()?,
        )
        .map_err(|_| CryptoError::SignatureVerificationFailed)?;
        Ok(address_of(&key))
    }
}

/// secp256k1 ECDSA keypair.
///
/// The k256 signing key zeroizes its scalar on drop.
pub struct Secp256k1KeyPair {
    signing_key: SigningKey,
}

impl Secp256k1KeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_bytes((&bytes).into()).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Get public key (compressed, 33 bytes).
    pub fn public_key(&self) -> Secp256k1PublicKey {
        Secp256k1PublicKey::from_verifying_key(self.signing_key.verifying_key())
    }

    /// Ethereum address of this keypair.
    pub fn address(&self) -> EthAddress {
        address_of(self.signing_key.verifying_key())
    }

    /// Sign keccak256(message) (deterministic RFC 6979, low-S).
    pub fn sign(&self, message: &[u8]) -> Result<Secp256k1Signature, CryptoError> {
        let (sig, recid) = self
            .signing_key
            .sign_prehash_recoverable(&keccak256(message))
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;

        let mut bytes = [0u8; SIGNATURE_LEN];
        bytes[..64].copy_from_slice(&sig.to_bytes());
        bytes[64] = recid.to_byte() + 27;
        Ok(Secp256k1Signature(bytes))
    }

    /// Get secret key bytes (for serialization).
    pub fn to_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes().into()
    }
}
