//! # Shared Types Crate
//!
//! This crate contains the value objects that flow between detection agents,
//! the batch aggregator and downstream consumers.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate alert types are defined here.
//! - **Immutable Values**: Fields are private; constructors validate, accessors
//!   borrow. A value that exists has passed its format checks unless it was
//!   deserialized, in which case consumers re-check with `validate()`.
//! - **Order Is Data**: Every sequence keeps the order it was given in.

pub mod entities;
pub mod errors;
pub mod severity;

pub use entities::*;
pub use errors::*;
pub use severity::Severity;
