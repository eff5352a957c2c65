//! # Aggregate Traversal
//!
//! Count and lattice-max over every finding reachable from a set of blocks.
//!
//! Both components merge associatively and commutatively, so the traversal
//! can be split per block and reduced in any grouping. Large batches are
//! reduced with rayon; small ones stay on the calling thread.

use super::entities::BlockResults;
use rayon::prelude::*;
use shared_types::{Severity, SignedFinding};

/// Finding count and highest severity of a subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Aggregate {
    /// Number of findings.
    pub count: u64,
    /// Lattice-max of their severities.
    pub max_severity: Severity,
}

impl Aggregate {
    /// Aggregate of an empty subtree.
    pub const EMPTY: Aggregate = Aggregate {
        count: 0,
        max_severity: Severity::Unknown,
    };

    /// Aggregate of a single finding.
    pub fn of_finding(finding: &SignedFinding) -> Self {
        Self {
            count: 1,
            max_severity: finding.severity(),
        }
    }

    /// Merge two subtree aggregates.
    #[must_use]
    pub const fn merge(self, other: Aggregate) -> Aggregate {
        Aggregate {
            count: self.count.saturating_add(other.count),
            max_severity: self.max_severity.combine(other.max_severity),
        }
    }
}

/// Aggregate every finding under `blocks`, block-level and per-transaction.
///
/// Runs as a rayon map-reduce once `blocks.len() >= parallel_threshold`.
pub fn aggregate_blocks(blocks: &[BlockResults], parallel_threshold: usize) -> Aggregate {
    if blocks.len() >= parallel_threshold {
        blocks
            .par_iter()
            .map(BlockResults::aggregate)
            .reduce(|| Aggregate::EMPTY, Aggregate::merge)
    } else {
        blocks
            .iter()
            .map(BlockResults::aggregate)
            .fold(Aggregate::EMPTY, Aggregate::merge)
    }
}
