//! # Batch Validation
//!
//! Re-checks the batch invariants from scratch:
//!
//! - **Range**: `block_start <= block_end`, span within the configured
//!   limit, every block inside the range
//! - **Ordering**: block numbers strictly ascending
//! - **Fields**: every nested value object well-formed
//! - **Aggregates**: declared `alert_count` and `max_severity` equal the
//!   recomputed traversal
//!
//! Runs before signing and again after a signature verifies. A valid
//! signature proves who produced a batch, not that its aggregates are honest.

use super::aggregate::aggregate_blocks;
use super::config::BatchConfig;
use super::entities::AlertBatch;
use super::errors::{AggregateFault, RangeFault, ValidationError};
use tracing::warn;

/// Check every invariant of `batch`. Pure; logs the first violation found.
pub fn validate(batch: &AlertBatch, config: &BatchConfig) -> Result<(), ValidationError> {
    check(batch, config).inspect_err(|e| {
        warn!(
            chain_id = batch.chain_id(),
            block_start = batch.block_start(),
            block_end = batch.block_end(),
            invariant = invariant_name(e),
            error = %e,
            "[alert-batch] Batch invariant violated"
        );
    })
}

fn check(batch: &AlertBatch, config: &BatchConfig) -> Result<(), ValidationError> {
    let (start, end) = (batch.block_start(), batch.block_end());
    if start > end {
        return Err(ValidationError::RangeViolation(RangeFault::Inverted {
            start,
            end,
        }));
    }
    if let Some((span, max)) = config.span_over_limit(start, end) {
        return Err(ValidationError::RangeViolation(RangeFault::TooLarge { span, max }));
    }

    let mut previous: Option<u64> = None;
    for block in batch.results() {
        let number = block.number();
        if number < start || number > end {
            return Err(ValidationError::RangeViolation(
                RangeFault::BlockOutside { number, start, end },
            ));
        }
        if let Some(prev) = previous {
            if number <= prev {
                return Err(ValidationError::OrderingViolation {
                    previous: prev,
                    current: number,
                });
            }
        }
        previous = Some(number);
    }

    for block in batch.results() {
        block.validate_fields()?;
    }

    let computed = aggregate_blocks(batch.results(), config.parallel_threshold);
    if computed.count != u64::from(batch.alert_count()) {
        return Err(ValidationError::AggregateMismatch(
            AggregateFault::AlertCount {
                declared: batch.alert_count(),
                computed: computed.count,
            },
        ));
    }
    if computed.max_severity != batch.max_severity() {
        return Err(ValidationError::AggregateMismatch(
            AggregateFault::MaxSeverity {
                declared: batch.max_severity(),
                computed: computed.max_severity,
            },
        ));
    }

    Ok(())
}

fn invariant_name(error: &ValidationError) -> &'static str {
    match error {
        ValidationError::RangeViolation(_) => "range",
        ValidationError::OrderingViolation { .. } => "ordering",
        ValidationError::AggregateMismatch(_) => "aggregate",
        ValidationError::MalformedField(_) => "field",
    }
}
