//! # Core Domain Entities
//!
//! Value objects consumed by the alert batch pipeline. They are produced by
//! the chain-data and agent-execution subsystems and referenced here by value.
//!
//! ## Clusters
//!
//! - **Chain**: `BlockRef`, `TxRef`
//! - **Agents & Findings**: `AgentRef`, `SignedFinding`
//! - **Signatures**: `Signature`, `SignatureAlgorithm`, `PublicKey`

use crate::errors::{FieldError, UnknownAlgorithm};
use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use std::fmt;

/// A 32-byte hash (keccak256).
pub type Hash = [u8; 32];

/// Check that `value` is `0x` followed by at least one lowercase hex digit.
///
/// Upper-case digits are rejected so a given hash has exactly one spelling.
pub fn check_canonical_hex(field: &'static str, value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Empty { field });
    }
    let digits = value
        .strip_prefix("0x")
        .filter(|d| !d.is_empty())
        .ok_or_else(|| FieldError::NonCanonicalHex {
            field,
            value: value.to_string(),
        })?;
    if !digits
        .bytes()
        .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    {
        return Err(FieldError::NonCanonicalHex {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

fn check_non_empty(field: &'static str, value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Empty { field });
    }
    Ok(())
}

// =============================================================================
// CLUSTER A: THE CHAIN
// =============================================================================

/// Reference to a block by hash and height.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockRef {
    hash: String,
    number: u64,
}

impl BlockRef {
    /// Create a block reference; the hash must be canonical hex.
    pub fn new(hash: impl Into<String>, number: u64) -> Result<Self, FieldError> {
        let block = Self {
            hash: hash.into(),
            number,
        };
        block.validate()?;
        Ok(block)
    }

    /// Re-check the format invariants (needed after deserialization).
    pub fn validate(&self) -> Result<(), FieldError> {
        check_canonical_hex("block.hash", &self.hash)
    }

    /// Block hash.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Block height.
    pub fn number(&self) -> u64 {
        self.number
    }
}

/// Reference to a transaction by hash.
///
/// The transaction's position inside its block is not part of the value; it
/// is carried by the order of `TransactionResults` within `BlockResults`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxRef {
    hash: String,
}

impl TxRef {
    /// Create a transaction reference; the hash must be canonical hex.
    pub fn new(hash: impl Into<String>) -> Result<Self, FieldError> {
        let tx = Self { hash: hash.into() };
        tx.validate()?;
        Ok(tx)
    }

    /// Re-check the format invariants.
    pub fn validate(&self) -> Result<(), FieldError> {
        check_canonical_hex("transaction.hash", &self.hash)
    }

    /// Transaction hash.
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

// =============================================================================
// CLUSTER B: AGENTS & FINDINGS
// =============================================================================

/// Identity of the detection agent that produced a group of findings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentRef {
    id: String,
    image: String,
    image_hash: String,
    manifest: String,
}

impl AgentRef {
    /// Agent reference with only an id; image and manifest left empty.
    pub fn new(id: impl Into<String>) -> Result<Self, FieldError> {
        Self::with_image(id, "", "", "")
    }

    /// Agent reference with its deployment image and manifest pointer.
    pub fn with_image(
        id: impl Into<String>,
        image: impl Into<String>,
        image_hash: impl Into<String>,
        manifest: impl Into<String>,
    ) -> Result<Self, FieldError> {
        let agent = Self {
            id: id.into(),
            image: image.into(),
            image_hash: image_hash.into(),
            manifest: manifest.into(),
        };
        agent.validate()?;
        Ok(agent)
    }

    /// Re-check the format invariants.
    pub fn validate(&self) -> Result<(), FieldError> {
        check_non_empty("agent.id", &self.id)
    }

    /// Agent identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Container image reference.
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Content hash of the container image.
    pub fn image_hash(&self) -> &str {
        &self.image_hash
    }

    /// Manifest reference.
    pub fn manifest(&self) -> &str {
        &self.manifest
    }
}

/// A single finding as emitted and signed by a scanner node.
///
/// Only the severity is interpreted by the batch layer; the payload is
/// carried through untouched.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedFinding {
    alert_id: String,
    severity: Severity,
    #[serde_as(as = "Bytes")]
    payload: Vec<u8>,
    signature: Signature,
    emitter: String,
}

impl SignedFinding {
    /// Create a finding.
    pub fn new(
        alert_id: impl Into<String>,
        severity: Severity,
        payload: Vec<u8>,
        signature: Signature,
        emitter: impl Into<String>,
    ) -> Result<Self, FieldError> {
        let finding = Self {
            alert_id: alert_id.into(),
            severity,
            payload,
            signature,
            emitter: emitter.into(),
        };
        finding.validate()?;
        Ok(finding)
    }

    /// Re-check the format invariants.
    pub fn validate(&self) -> Result<(), FieldError> {
        check_non_empty("finding.alert_id", &self.alert_id)?;
        self.signature.validate()
    }

    /// Unique alert identifier.
    pub fn alert_id(&self) -> &str {
        &self.alert_id
    }

    /// Severity of the finding.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Opaque finding payload.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// The emitter's signature over the finding.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Identity of the scanner that emitted the finding.
    pub fn emitter(&self) -> &str {
        &self.emitter
    }
}

// =============================================================================
// CLUSTER C: SIGNATURES
// =============================================================================

/// Signature scheme tag.
///
/// The numeric tag is part of the canonical encoding and must never be
/// reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum SignatureAlgorithm {
    /// secp256k1 ECDSA over keccak256(message), 65-byte `r || s || v`.
    #[serde(rename = "ethereum")]
    Secp256k1Keccak = 1,
    /// Ed25519 over the raw message, 64 bytes.
    Ed25519 = 2,
}

impl SignatureAlgorithm {
    /// Numeric tag used by the canonical encoding.
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Map a tag back to an algorithm.
    pub fn from_tag(tag: u8) -> Result<Self, UnknownAlgorithm> {
        match tag {
            1 => Ok(SignatureAlgorithm::Secp256k1Keccak),
            2 => Ok(SignatureAlgorithm::Ed25519),
            other => Err(UnknownAlgorithm(other)),
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureAlgorithm::Secp256k1Keccak => f.write_str("ethereum"),
            SignatureAlgorithm::Ed25519 => f.write_str("ed25519"),
        }
    }
}

/// Algorithm-tagged signature bytes plus the signer's textual identity.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    algorithm: SignatureAlgorithm,
    signer: String,
    #[serde_as(as = "Bytes")]
    bytes: Vec<u8>,
}

impl Signature {
    /// Wrap raw signature bytes.
    pub fn new(algorithm: SignatureAlgorithm, signer: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            algorithm,
            signer: signer.into(),
            bytes,
        }
    }

    /// Re-check the format invariants.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.bytes.is_empty() {
            return Err(FieldError::Empty {
                field: "signature.bytes",
            });
        }
        Ok(())
    }

    /// Signature scheme.
    pub fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }

    /// Signer identity (hex address or hex public key).
    pub fn signer(&self) -> &str {
        &self.signer
    }

    /// Raw signature bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Algorithm-tagged public key.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey {
    algorithm: SignatureAlgorithm,
    #[serde_as(as = "Bytes")]
    bytes: Vec<u8>,
}

impl PublicKey {
    /// Wrap raw public key bytes.
    pub fn new(algorithm: SignatureAlgorithm, bytes: Vec<u8>) -> Self {
        Self { algorithm, bytes }
    }

    /// Signature scheme this key belongs to.
    pub fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }

    /// Raw key bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}
