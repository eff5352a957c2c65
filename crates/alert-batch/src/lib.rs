//! # Alert Batch Subsystem
//!
//! Aggregates per-block detection results into an `AlertBatch`, encodes it
//! canonically and binds it to an aggregator signature.
//!
//! ## Architecture
//!
//! Hexagonal layout:
//! - `domain/` - entities, builder, canonical encoding, validation (pure)
//! - `ports/` - inbound `AlertBatchApi`, outbound `BatchSigner` and
//!   `SignatureVerifier`
//! - `adapters/` - secp256k1 / Ed25519 implementations of the outbound ports
//! - `service.rs` - `AlertBatchService`, the application service
//!
//! ## Integrity Contract
//!
//! - Signatures cover the canonical encoding of `data` and nothing else
//! - Verifiers always re-encode the structured batch; bytes from the wire
//!   are never trusted
//! - A verified batch is still rejected when its declared `alert_count` or
//!   `max_severity` disagree with its findings
//!
//! ## Example
//!
//! ```ignore
//! use alert_batch::{AlertBatchApi, AlertBatchService};
//! use alert_batch::adapters::{CryptoSignatureVerifier, Secp256k1BatchSigner};
//!
//! let service = AlertBatchService::new(Secp256k1BatchSigner::generate(), CryptoSignatureVerifier);
//! let batch = service.build(1, 10, 10, blocks)?;
//! let signed = service.sign(batch)?;
//! let trusted = service.accept(signed, &service.signer().public_key())?;
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use domain::{
    AgentAlerts, AlertBatch, BatchConfig, BatchConfigBuilder, BatchError, BlockResults,
    BuildError, DecodeError, EncodeError, SignedAlertBatch, TransactionResults, ValidationError,
    VerificationError,
};
pub use ports::inbound::AlertBatchApi;
pub use ports::outbound::{BatchSigner, SignatureVerifier, SigningError};
pub use service::AlertBatchService;
