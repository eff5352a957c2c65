//! # Alert Batch Entities
//!
//! The alert tree, built bottom-up:
//!
//! ```text
//! AlertBatch
//! └── BlockResults (ascending block number)
//!     ├── AgentAlerts (block-level findings)
//!     └── TransactionResults (on-chain transaction order)
//!         └── AgentAlerts (findings raised by that transaction)
//! ```
//!
//! Every sequence keeps the order it was constructed with. Nothing here
//! sorts, and the canonical encoding writes sequences exactly as stored.

use super::aggregate::Aggregate;
use super::config::BatchConfig;
use super::encoding;
use super::errors::EncodeError;
use serde::{Deserialize, Serialize};
use shared_crypto::keccak256;
use shared_types::{AgentRef, BlockRef, FieldError, Hash, Severity, Signature, SignedFinding, TxRef};

/// Findings emitted by one agent, in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentAlerts {
    agent: AgentRef,
    alerts: Vec<SignedFinding>,
}

impl AgentAlerts {
    /// Group findings under the agent that emitted them.
    pub fn new(agent: AgentRef, alerts: Vec<SignedFinding>) -> Self {
        Self { agent, alerts }
    }

    /// The emitting agent.
    pub fn agent(&self) -> &AgentRef {
        &self.agent
    }

    /// Findings in emission order.
    pub fn alerts(&self) -> &[SignedFinding] {
        &self.alerts
    }

    /// Number of findings in this group.
    pub fn alert_count(&self) -> u64 {
        self.alerts.len() as u64
    }

    /// Count and highest severity of this group.
    pub fn aggregate(&self) -> Aggregate {
        self.alerts
            .iter()
            .map(Aggregate::of_finding)
            .fold(Aggregate::EMPTY, Aggregate::merge)
    }

    fn validate_fields(&self) -> Result<(), FieldError> {
        self.agent.validate()?;
        self.alerts.iter().try_for_each(SignedFinding::validate)
    }
}

/// Findings raised while evaluating one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResults {
    transaction: TxRef,
    results: Vec<AgentAlerts>,
}

impl TransactionResults {
    /// Attach agent results to the transaction that produced them.
    pub fn new(transaction: TxRef, results: Vec<AgentAlerts>) -> Self {
        Self {
            transaction,
            results,
        }
    }

    /// The evaluated transaction.
    pub fn transaction(&self) -> &TxRef {
        &self.transaction
    }

    /// Per-agent results.
    pub fn results(&self) -> &[AgentAlerts] {
        &self.results
    }

    /// Count and highest severity of this transaction's findings.
    pub fn aggregate(&self) -> Aggregate {
        self.results
            .iter()
            .map(AgentAlerts::aggregate)
            .fold(Aggregate::EMPTY, Aggregate::merge)
    }

    fn validate_fields(&self) -> Result<(), FieldError> {
        self.transaction.validate()?;
        self.results.iter().try_for_each(AgentAlerts::validate_fields)
    }
}

/// Results for one block.
///
/// Block-level findings (`results`) and per-transaction findings
/// (`transactions`) stay in separate fields; aggregates count both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockResults {
    block: BlockRef,
    results: Vec<AgentAlerts>,
    transactions: Vec<TransactionResults>,
}

impl BlockResults {
    /// Assemble a block's results. `transactions` must already be in the
    /// order the transactions appear on-chain.
    pub fn new(
        block: BlockRef,
        results: Vec<AgentAlerts>,
        transactions: Vec<TransactionResults>,
    ) -> Self {
        Self {
            block,
            results,
            transactions,
        }
    }

    /// The block these results belong to.
    pub fn block(&self) -> &BlockRef {
        &self.block
    }

    /// Shorthand for `block().number()`.
    pub fn number(&self) -> u64 {
        self.block.number()
    }

    /// Block-level findings grouped by agent.
    pub fn results(&self) -> &[AgentAlerts] {
        &self.results
    }

    /// Per-transaction findings in on-chain order.
    pub fn transactions(&self) -> &[TransactionResults] {
        &self.transactions
    }

    /// Count and highest severity over both block-level and per-transaction
    /// findings.
    pub fn aggregate(&self) -> Aggregate {
        let block_level = self
            .results
            .iter()
            .map(AgentAlerts::aggregate)
            .fold(Aggregate::EMPTY, Aggregate::merge);
        self.transactions
            .iter()
            .map(TransactionResults::aggregate)
            .fold(block_level, Aggregate::merge)
    }

    /// Number of findings reachable from this block.
    pub fn alert_count(&self) -> u64 {
        self.aggregate().count
    }

    /// Highest severity reachable from this block.
    pub fn max_severity(&self) -> Severity {
        self.aggregate().max_severity
    }

    /// Re-check the format of every nested value object.
    pub fn validate_fields(&self) -> Result<(), FieldError> {
        self.block.validate()?;
        self.results
            .iter()
            .try_for_each(AgentAlerts::validate_fields)?;
        self.transactions
            .iter()
            .try_for_each(TransactionResults::validate_fields)
    }
}

/// Every finding for one `(chain_id, block_start, block_end)` epoch.
///
/// Produced by `builder::build`, which guarantees the range, ordering and
/// aggregate invariants. `from_parts` skips those guarantees and exists for
/// decoders and tests; run `validation::validate` on anything built that way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertBatch {
    chain_id: u64,
    block_start: u64,
    block_end: u64,
    alert_count: u32,
    max_severity: Severity,
    results: Vec<BlockResults>,
}

impl AlertBatch {
    /// Assemble a batch from raw parts without checking any invariant.
    pub fn from_parts(
        chain_id: u64,
        block_start: u64,
        block_end: u64,
        alert_count: u32,
        max_severity: Severity,
        results: Vec<BlockResults>,
    ) -> Self {
        Self {
            chain_id,
            block_start,
            block_end,
            alert_count,
            max_severity,
            results,
        }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn block_start(&self) -> u64 {
        self.block_start
    }

    pub fn block_end(&self) -> u64 {
        self.block_end
    }

    /// Declared number of findings.
    pub fn alert_count(&self) -> u32 {
        self.alert_count
    }

    /// Declared highest severity.
    pub fn max_severity(&self) -> Severity {
        self.max_severity
    }

    /// Per-block results in ascending block order.
    pub fn results(&self) -> &[BlockResults] {
        &self.results
    }

    /// keccak256 of the canonical encoding. Identifies the batch content.
    pub fn content_hash(&self, config: &BatchConfig) -> Result<Hash, EncodeError> {
        let bytes = encoding::encode(self, config)?;
        Ok(keccak256(&bytes))
    }
}

/// An `AlertBatch` together with the aggregator's signature over its
/// canonical encoding.
///
/// Only `data` is covered by the signature. The envelope itself can travel
/// in any serde format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedAlertBatch {
    data: AlertBatch,
    signature: Signature,
}

impl SignedAlertBatch {
    pub fn new(data: AlertBatch, signature: Signature) -> Self {
        Self { data, signature }
    }

    /// The signed batch.
    pub fn data(&self) -> &AlertBatch {
        &self.data
    }

    /// The aggregator's signature.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn into_parts(self) -> (AlertBatch, Signature) {
        (self.data, self.signature)
    }
}
