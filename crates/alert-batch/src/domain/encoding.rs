//! # Canonical Encoding
//!
//! The one byte representation of an `AlertBatch` that signatures cover.
//!
//! ## Layout
//!
//! ```text
//! version      u8         (= ENCODING_VERSION)
//! chain_id     u64 BE
//! block_start  u64 BE
//! block_end    u64 BE
//! alert_count  u32 BE
//! max_severity u8         (severity rank)
//! results      seq<BlockResults>
//!
//! BlockResults       = block.hash str, block.number u64 BE,
//!                      results seq<AgentAlerts>, transactions seq<TransactionResults>
//! TransactionResults = transaction.hash str, results seq<AgentAlerts>
//! AgentAlerts        = agent.id str, agent.image str, agent.image_hash str,
//!                      agent.manifest str, alerts seq<SignedFinding>
//! SignedFinding      = alert_id str, severity u8, payload bytes,
//!                      signature Signature, emitter str
//! Signature          = algorithm u8 (tag), signer str, bytes bytes
//!
//! str, bytes = u32 BE length, then the raw bytes (strings as UTF-8)
//! seq<T>     = u32 BE element count, then each element in stored order
//! ```
//!
//! Every integer is fixed width, every variable-length field is length
//! prefixed and sequences are written exactly in stored order. Two batches
//! encode to the same bytes if and only if they are equal.
//!
//! `decode` is the exact inverse: for every input it accepts,
//! `encode(decode(b)) == b`.

use super::config::BatchConfig;
use super::entities::{AgentAlerts, AlertBatch, BlockResults, TransactionResults};
use super::errors::{DecodeError, EncodeError};
use shared_types::{
    AgentRef, BlockRef, Severity, Signature, SignatureAlgorithm, SignedFinding, TxRef,
};

/// Leading byte of every canonical encoding.
pub const ENCODING_VERSION: u8 = 1;

/// Encode `batch` canonically.
///
/// Fails if a nested value object is malformed or a field exceeds the
/// limits in `config`.
pub fn encode(batch: &AlertBatch, config: &BatchConfig) -> Result<Vec<u8>, EncodeError> {
    let mut w = CanonicalWriter::new(config);

    w.put_u8(ENCODING_VERSION);
    w.put_u64(batch.chain_id());
    w.put_u64(batch.block_start());
    w.put_u64(batch.block_end());
    w.put_u32(batch.alert_count());
    w.put_u8(batch.max_severity().rank());

    w.put_seq_len("batch.results", batch.results().len())?;
    for block in batch.results() {
        w.put_block(block)?;
    }

    Ok(w.finish())
}

/// Decode a canonical encoding.
///
/// Enforces the same limits as `encode` and rejects trailing bytes.
pub fn decode(bytes: &[u8], config: &BatchConfig) -> Result<AlertBatch, DecodeError> {
    let mut r = CanonicalReader::new(bytes, config);

    let version = r.u8()?;
    if version != ENCODING_VERSION {
        return Err(DecodeError::UnsupportedVersion(version));
    }

    let chain_id = r.u64()?;
    let block_start = r.u64()?;
    let block_end = r.u64()?;
    let alert_count = r.u32()?;
    let max_severity = Severity::from_rank(r.u8()?)?;

    let count = r.seq_len("batch.results")?;
    let mut results = Vec::with_capacity(r.capacity_hint(count));
    for _ in 0..count {
        results.push(r.block()?);
    }

    r.finish()?;

    Ok(AlertBatch::from_parts(
        chain_id,
        block_start,
        block_end,
        alert_count,
        max_severity,
        results,
    ))
}

// =============================================================================
// WRITER
// =============================================================================

struct CanonicalWriter<'a> {
    buf: Vec<u8>,
    config: &'a BatchConfig,
}

impl<'a> CanonicalWriter<'a> {
    fn new(config: &'a BatchConfig) -> Self {
        Self {
            buf: Vec::with_capacity(256),
            config,
        }
    }

    fn finish(self) -> Vec<u8> {
        self.buf
    }

    fn put_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    fn put_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    fn put_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    fn put_len(&mut self, field: &'static str, len: usize, max: usize) -> Result<(), EncodeError> {
        let prefix = u32::try_from(len)
            .ok()
            .filter(|_| len <= max)
            .ok_or(EncodeError::LimitExceeded {
                field,
                len,
                max: max.min(u32::MAX as usize),
            })?;
        self.put_u32(prefix);
        Ok(())
    }

    fn put_seq_len(&mut self, field: &'static str, len: usize) -> Result<(), EncodeError> {
        self.put_len(field, len, self.config.max_sequence_len)
    }

    fn put_str(&mut self, field: &'static str, value: &str) -> Result<(), EncodeError> {
        self.put_len(field, value.len(), self.config.max_string_len)?;
        self.buf.extend_from_slice(value.as_bytes());
        Ok(())
    }

    fn put_bytes(
        &mut self,
        field: &'static str,
        value: &[u8],
        max: usize,
    ) -> Result<(), EncodeError> {
        self.put_len(field, value.len(), max)?;
        self.buf.extend_from_slice(value);
        Ok(())
    }

    fn put_block(&mut self, block: &BlockResults) -> Result<(), EncodeError> {
        let block_ref = block.block();
        block_ref.validate()?;
        self.put_str("block.hash", block_ref.hash())?;
        self.put_u64(block_ref.number());

        self.put_seq_len("block.results", block.results().len())?;
        for group in block.results() {
            self.put_agent_alerts(group)?;
        }

        self.put_seq_len("block.transactions", block.transactions().len())?;
        for tx in block.transactions() {
            self.put_transaction(tx)?;
        }
        Ok(())
    }

    fn put_transaction(&mut self, tx: &TransactionResults) -> Result<(), EncodeError> {
        tx.transaction().validate()?;
        self.put_str("transaction.hash", tx.transaction().hash())?;

        self.put_seq_len("transaction.results", tx.results().len())?;
        for group in tx.results() {
            self.put_agent_alerts(group)?;
        }
        Ok(())
    }

    fn put_agent_alerts(&mut self, group: &AgentAlerts) -> Result<(), EncodeError> {
        let agent = group.agent();
        agent.validate()?;
        self.put_str("agent.id", agent.id())?;
        self.put_str("agent.image", agent.image())?;
        self.put_str("agent.image_hash", agent.image_hash())?;
        self.put_str("agent.manifest", agent.manifest())?;

        self.put_seq_len("agent.alerts", group.alerts().len())?;
        for finding in group.alerts() {
            self.put_finding(finding)?;
        }
        Ok(())
    }

    fn put_finding(&mut self, finding: &SignedFinding) -> Result<(), EncodeError> {
        finding.validate()?;
        self.put_str("finding.alert_id", finding.alert_id())?;
        self.put_u8(finding.severity().rank());
        self.put_bytes(
            "finding.payload",
            finding.payload(),
            self.config.max_payload_len,
        )?;
        self.put_signature(finding.signature())?;
        self.put_str("finding.emitter", finding.emitter())
    }

    fn put_signature(&mut self, signature: &Signature) -> Result<(), EncodeError> {
        self.put_u8(signature.algorithm().tag());
        self.put_str("signature.signer", signature.signer())?;
        self.put_bytes(
            "signature.bytes",
            signature.bytes(),
            self.config.max_signature_len,
        )
    }
}

// =============================================================================
// READER
// =============================================================================

struct CanonicalReader<'a> {
    input: &'a [u8],
    offset: usize,
    config: &'a BatchConfig,
}

impl<'a> CanonicalReader<'a> {
    fn new(input: &'a [u8], config: &'a BatchConfig) -> Self {
        Self {
            input,
            offset: 0,
            config,
        }
    }

    fn remaining(&self) -> usize {
        self.input.len() - self.offset
    }

    /// Preallocation bound: a declared count never reserves more slots than
    /// there are unread bytes.
    fn capacity_hint(&self, count: usize) -> usize {
        count.min(self.remaining())
    }

    fn finish(&self) -> Result<(), DecodeError> {
        match self.remaining() {
            0 => Ok(()),
            extra => Err(DecodeError::TrailingBytes(extra)),
        }
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8], DecodeError> {
        if needed > self.remaining() {
            return Err(DecodeError::Truncated {
                offset: self.offset,
                needed,
            });
        }
        let input = self.input;
        let slice = &input[self.offset..self.offset + needed];
        self.offset += needed;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.array::<1>()?[0])
    }

    fn u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_be_bytes(self.array()?))
    }

    fn u64(&mut self) -> Result<u64, DecodeError> {
        Ok(u64::from_be_bytes(self.array()?))
    }

    fn len(&mut self, field: &'static str, max: usize) -> Result<usize, DecodeError> {
        let len = self.u32()? as usize;
        if len > max {
            return Err(DecodeError::LimitExceeded { field, len, max });
        }
        Ok(len)
    }

    fn seq_len(&mut self, field: &'static str) -> Result<usize, DecodeError> {
        self.len(field, self.config.max_sequence_len)
    }

    fn string(&mut self, field: &'static str) -> Result<String, DecodeError> {
        let len = self.len(field, self.config.max_string_len)?;
        let raw = self.take(len)?;
        std::str::from_utf8(raw)
            .map(str::to_owned)
            .map_err(|_| DecodeError::InvalidUtf8 { field })
    }

    fn bytes(&mut self, field: &'static str, max: usize) -> Result<Vec<u8>, DecodeError> {
        let len = self.len(field, max)?;
        Ok(self.take(len)?.to_vec())
    }

    fn block(&mut self) -> Result<BlockResults, DecodeError> {
        let hash = self.string("block.hash")?;
        let number = self.u64()?;
        let block = BlockRef::new(hash, number)?;

        let count = self.seq_len("block.results")?;
        let mut results = Vec::with_capacity(self.capacity_hint(count));
        for _ in 0..count {
            results.push(self.agent_alerts()?);
        }

        let count = self.seq_len("block.transactions")?;
        let mut transactions = Vec::with_capacity(self.capacity_hint(count));
        for _ in 0..count {
            transactions.push(self.transaction()?);
        }

        Ok(BlockResults::new(block, results, transactions))
    }

    fn transaction(&mut self) -> Result<TransactionResults, DecodeError> {
        let tx = TxRef::new(self.string("transaction.hash")?)?;

        let count = self.seq_len("transaction.results")?;
        let mut results = Vec::with_capacity(self.capacity_hint(count));
        for _ in 0..count {
            results.push(self.agent_alerts()?);
        }

        Ok(TransactionResults::new(tx, results))
    }

    fn agent_alerts(&mut self) -> Result<AgentAlerts, DecodeError> {
        let id = self.string("agent.id")?;
        let image = self.string("agent.image")?;
        let image_hash = self.string("agent.image_hash")?;
        let manifest = self.string("agent.manifest")?;
        let agent = AgentRef::with_image(id, image, image_hash, manifest)?;

        let count = self.seq_len("agent.alerts")?;
        let mut alerts = Vec::with_capacity(self.capacity_hint(count));
        for _ in 0..count {
            alerts.push(self.finding()?);
        }

        Ok(AgentAlerts::new(agent, alerts))
    }

    fn finding(&mut self) -> Result<SignedFinding, DecodeError> {
        let alert_id = self.string("finding.alert_id")?;
        let severity = Severity::from_rank(self.u8()?)?;
        let payload = self.bytes("finding.payload", self.config.max_payload_len)?;
        let signature = self.signature()?;
        let emitter = self.string("finding.emitter")?;

        Ok(SignedFinding::new(
            alert_id, severity, payload, signature, emitter,
        )?)
    }

    fn signature(&mut self) -> Result<Signature, DecodeError> {
        let algorithm = SignatureAlgorithm::from_tag(self.u8()?)?;
        let signer = self.string("signature.signer")?;
        let bytes = self.bytes("signature.bytes", self.config.max_signature_len)?;
        Ok(Signature::new(algorithm, signer, bytes))
    }
}
