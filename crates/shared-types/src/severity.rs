//! # Severity Lattice
//!
//! Findings carry one of six severities in a fixed total order:
//!
//! ```text
//! Unknown < Info < Low < Medium < High < Critical
//! ```
//!
//! `Unknown` is the bottom element, so folding any set of severities with
//! [`Severity::combine`] starting from `Unknown` yields the set's maximum, and
//! the maximum of the empty set is `Unknown`.

use crate::errors::InvalidSeverity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a single finding.
///
/// The discriminant is the rank used for ordering and for the canonical
/// encoding; it must never be reassigned.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum Severity {
    /// No severity information; identity for `combine`.
    #[default]
    Unknown = 0,
    /// Informational.
    Info = 1,
    /// Low impact.
    Low = 2,
    /// Medium impact.
    Medium = 3,
    /// High impact.
    High = 4,
    /// Critical impact.
    Critical = 5,
}

impl Severity {
    /// All severities in ascending rank order.
    pub const ALL: [Severity; 6] = [
        Severity::Unknown,
        Severity::Info,
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    /// Numeric rank of this severity.
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Map a rank back to a severity.
    ///
    /// Ranks outside `0..=5` are rejected, never coerced to `Unknown`.
    pub fn from_rank(rank: u8) -> Result<Self, InvalidSeverity> {
        Self::ALL
            .get(rank as usize)
            .copied()
            .ok_or(InvalidSeverity(rank))
    }

    /// Lattice join: the greater of the two severities.
    #[must_use]
    pub const fn combine(self, other: Severity) -> Severity {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }

    /// Join of every severity in `iter`; `Unknown` when empty.
    pub fn max_of<I>(iter: I) -> Severity
    where
        I: IntoIterator<Item = Severity>,
    {
        iter.into_iter().fold(Severity::Unknown, Severity::combine)
    }

    /// Upper-case label, matching the serde representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Unknown => "UNKNOWN",
            Severity::Info => "INFO",
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl TryFrom<u8> for Severity {
    type Error = InvalidSeverity;

    fn try_from(rank: u8) -> Result<Self, Self::Error> {
        Severity::from_rank(rank)
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.rank()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
