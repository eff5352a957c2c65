//! # Domain Layer
//!
//! Pure batch logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.

pub mod aggregate;
pub mod builder;
pub mod config;
pub mod encoding;
pub mod entities;
pub mod errors;
pub mod validation;

pub use aggregate::Aggregate;
pub use config::{BatchConfig, BatchConfigBuilder, ConfigError};
pub use encoding::ENCODING_VERSION;
pub use entities::{AgentAlerts, AlertBatch, BlockResults, SignedAlertBatch, TransactionResults};
pub use errors::{
    AggregateFault, BatchError, BuildError, DecodeError, EncodeError, RangeFault,
    ValidationError, VerificationError,
};
