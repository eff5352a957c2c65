//! # Alert Tree Builder
//!
//! Assembles per-block results into an `AlertBatch` and derives its
//! aggregate fields.
//!
//! The builder is a pure function. It never reorders its input: blocks must
//! arrive in ascending order and every nested sequence is kept as given.
//!
//! ## Checks (in order)
//!
//! 1. `block_start <= block_end` (`EmptyRange`)
//! 2. Span within `max_blocks_per_batch`, when configured (`RangeTooLarge`)
//! 3. Per block: inside the range, not repeated, ascending
//! 4. Every nested value object well-formed (`InvalidField`)
//! 5. Total finding count fits `u32` (`AlertCountOverflow`)

use super::aggregate::{aggregate_blocks, Aggregate};
use super::config::BatchConfig;
use super::entities::{AlertBatch, BlockResults};
use super::errors::BuildError;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Build the batch for `[block_start, block_end]` on `chain_id`.
pub fn build(
    chain_id: u64,
    block_start: u64,
    block_end: u64,
    blocks: Vec<BlockResults>,
    config: &BatchConfig,
) -> Result<AlertBatch, BuildError> {
    debug!(
        chain_id,
        block_start,
        block_end,
        blocks = blocks.len(),
        "[alert-batch] Building batch"
    );

    let aggregate = check_inputs(block_start, block_end, &blocks, config).inspect_err(|e| {
        warn!(
            chain_id,
            block_start,
            block_end,
            error = %e,
            "[alert-batch] Batch build rejected"
        );
    })?;

    let alert_count = u32::try_from(aggregate.count).map_err(|_| {
        warn!(chain_id, count = aggregate.count, "[alert-batch] Alert count overflow");
        BuildError::AlertCountOverflow(aggregate.count)
    })?;

    info!(
        chain_id,
        block_start,
        block_end,
        alert_count,
        max_severity = %aggregate.max_severity,
        "[alert-batch] Batch built"
    );

    Ok(AlertBatch::from_parts(
        chain_id,
        block_start,
        block_end,
        alert_count,
        aggregate.max_severity,
        blocks,
    ))
}

fn check_inputs(
    block_start: u64,
    block_end: u64,
    blocks: &[BlockResults],
    config: &BatchConfig,
) -> Result<Aggregate, BuildError> {
    if block_start > block_end {
        return Err(BuildError::EmptyRange {
            start: block_start,
            end: block_end,
        });
    }

    if let Some((span, max)) = config.span_over_limit(block_start, block_end) {
        return Err(BuildError::RangeTooLarge { span, max });
    }

    let mut seen = HashSet::with_capacity(blocks.len());
    let mut previous: Option<u64> = None;
    for block in blocks {
        let number = block.number();
        if number < block_start || number > block_end {
            return Err(BuildError::BlockOutOfRange {
                number,
                start: block_start,
                end: block_end,
            });
        }
        if !seen.insert(number) {
            return Err(BuildError::DuplicateBlock(number));
        }
        if let Some(prev) = previous {
            if number < prev {
                return Err(BuildError::UnorderedBlocks {
                    previous: prev,
                    current: number,
                });
            }
        }
        previous = Some(number);
    }

    for block in blocks {
        block.validate_fields()?;
    }

    Ok(aggregate_blocks(blocks, config.parallel_threshold))
}
