//! # Tampering Scenarios
//!
//! Attacks on signed batches, each of which must be refused by `accept`:
//!
//! | Attack | Caught by |
//! |--------|-----------|
//! | Dishonest aggregator inflates / deflates aggregates | validation after verify |
//! | Relay edits the JSON envelope | signature over recomputed bytes |
//! | Replay of a signature on another chain or range | signature over recomputed bytes |
//! | Reordering or dropping findings | signature over recomputed bytes |
//! | Impersonation via the `signer` identity string | key-based verification |

#[cfg(test)]
mod tests {
    use crate::fixtures::{init_tracing, scenario_blocks, Scanner};
    use alert_batch::adapters::{CryptoSignatureVerifier, Secp256k1BatchSigner};
    use alert_batch::domain::{encoding, AggregateFault, DecodeError};
    use alert_batch::{
        AgentAlerts, AlertBatch, AlertBatchApi, AlertBatchService, BatchConfig, BatchError,
        BatchSigner, BlockResults, SignedAlertBatch, ValidationError, VerificationError,
    };
    use shared_types::{BlockRef, PublicKey, Severity, Signature};

    type Service = AlertBatchService<Secp256k1BatchSigner, CryptoSignatureVerifier>;

    /// An aggregator that skips the service and signs whatever it is handed
    /// with its key.
    struct DishonestAggregator {
        key: Secp256k1BatchSigner,
    }

    impl DishonestAggregator {
        fn new() -> Self {
            init_tracing();
            Self {
                key: Secp256k1BatchSigner::generate(),
            }
        }

        fn sign(&self, batch: AlertBatch) -> SignedAlertBatch {
            let bytes = encoding::encode(&batch, &BatchConfig::default()).unwrap();
            let signature = self.key.sign(&bytes).unwrap();
            SignedAlertBatch::new(batch, signature)
        }

        fn public_key(&self) -> PublicKey {
            self.key.public_key()
        }
    }

    fn honest_aggregator() -> Service {
        init_tracing();
        AlertBatchService::new(Secp256k1BatchSigner::generate(), CryptoSignatureVerifier)
    }

    fn recipient() -> Service {
        AlertBatchService::new(Secp256k1BatchSigner::generate(), CryptoSignatureVerifier)
    }

    fn signed_scenario(aggregator: &Service) -> (SignedAlertBatch, PublicKey) {
        let batch = aggregator.build(1, 10, 10, scenario_blocks()).unwrap();
        (aggregator.sign(batch).unwrap(), aggregator.signer().public_key())
    }

    // =========================================================================
    // DISHONEST AGGREGATOR
    // =========================================================================

    /// Validly signed, internally inconsistent: rejected after verification.
    #[test]
    fn test_inflated_alert_count_rejected() {
        let aggregator = DishonestAggregator::new();
        let forged = AlertBatch::from_parts(1, 10, 10, 9, Severity::Critical, scenario_blocks());
        let signed = aggregator.sign(forged);
        let public_key = aggregator.public_key();

        assert_eq!(recipient().verify(&signed, &public_key), Ok(()));
        assert_eq!(
            recipient().accept(signed, &public_key),
            Err(BatchError::Rejected(ValidationError::AggregateMismatch(
                AggregateFault::AlertCount {
                    declared: 9,
                    computed: 2
                }
            )))
        );
    }

    /// Hiding a Critical finding behind a Low headline.
    #[test]
    fn test_downgraded_severity_rejected() {
        let aggregator = DishonestAggregator::new();
        let forged = AlertBatch::from_parts(1, 10, 10, 2, Severity::Low, scenario_blocks());
        let signed = aggregator.sign(forged);

        assert_eq!(
            recipient().accept(signed, &aggregator.public_key()),
            Err(BatchError::Rejected(ValidationError::AggregateMismatch(
                AggregateFault::MaxSeverity {
                    declared: Severity::Low,
                    computed: Severity::Critical
                }
            )))
        );
    }

    /// A block outside the declared range, signed anyway.
    #[test]
    fn test_out_of_range_block_rejected() {
        let aggregator = DishonestAggregator::new();
        let forged = AlertBatch::from_parts(1, 11, 12, 2, Severity::Critical, scenario_blocks());
        let signed = aggregator.sign(forged);

        assert!(matches!(
            recipient().accept(signed, &aggregator.public_key()),
            Err(BatchError::Rejected(ValidationError::RangeViolation(_)))
        ));
    }

    // =========================================================================
    // RELAY TAMPERING
    // =========================================================================

    /// Editing the JSON envelope in transit breaks the signature.
    #[test]
    fn test_envelope_edit_rejected() {
        let aggregator = honest_aggregator();
        let (signed, public_key) = signed_scenario(&aggregator);

        let json = serde_json::to_string(&signed).unwrap();
        assert!(json.contains("\"alert_count\":2"));
        let edited = json.replace("\"alert_count\":2", "\"alert_count\":1");
        let received: SignedAlertBatch = serde_json::from_str(&edited).unwrap();

        assert_eq!(
            recipient().accept(received, &public_key),
            Err(BatchError::Verification(VerificationError::SignatureMismatch))
        );
    }

    /// A signature for chain 1 does not transfer to chain 2.
    #[test]
    fn test_cross_chain_replay_rejected() {
        let aggregator = honest_aggregator();
        let (signed, public_key) = signed_scenario(&aggregator);

        let other_chain = aggregator.build(2, 10, 10, scenario_blocks()).unwrap();
        let replayed = SignedAlertBatch::new(other_chain, signed.signature().clone());

        assert_eq!(
            recipient().verify(&replayed, &public_key),
            Err(VerificationError::SignatureMismatch)
        );
    }

    /// Widening the declared range is detected even with identical findings.
    #[test]
    fn test_range_widening_rejected() {
        let aggregator = honest_aggregator();
        let (signed, public_key) = signed_scenario(&aggregator);

        let widened = aggregator.build(1, 10, 11, scenario_blocks()).unwrap();
        let replayed = SignedAlertBatch::new(widened, signed.signature().clone());

        assert_eq!(
            recipient().verify(&replayed, &public_key),
            Err(VerificationError::SignatureMismatch)
        );
    }

    /// Reordering findings yields the same aggregates but different bytes.
    #[test]
    fn test_reordered_findings_rejected() {
        let aggregator = honest_aggregator();
        let (signed, public_key) = signed_scenario(&aggregator);

        let block = &signed.data().results()[0];
        let group = &block.results()[0];
        let mut alerts = group.alerts().to_vec();
        alerts.reverse();
        let reordered = AlertBatch::from_parts(
            1,
            10,
            10,
            2,
            Severity::Critical,
            vec![BlockResults::new(
                block.block().clone(),
                vec![AgentAlerts::new(group.agent().clone(), alerts)],
                vec![],
            )],
        );

        // Internally consistent, so only the signature catches it
        assert_eq!(recipient().validate(&reordered), Ok(()));
        assert_eq!(
            recipient().accept(SignedAlertBatch::new(reordered, signed.signature().clone()), &public_key),
            Err(BatchError::Verification(VerificationError::SignatureMismatch))
        );
    }

    /// Dropping a finding and fixing up the aggregates is still caught.
    #[test]
    fn test_dropped_finding_rejected() {
        let aggregator = honest_aggregator();
        let (signed, public_key) = signed_scenario(&aggregator);

        let block = &signed.data().results()[0];
        let group = &block.results()[0];
        let kept = vec![group.alerts()[0].clone()];
        let pruned = AlertBatch::from_parts(
            1,
            10,
            10,
            1,
            Severity::Low,
            vec![BlockResults::new(
                BlockRef::new("0xabc", 10).unwrap(),
                vec![AgentAlerts::new(group.agent().clone(), kept)],
                vec![],
            )],
        );

        assert_eq!(recipient().validate(&pruned), Ok(()));
        assert_eq!(
            recipient().verify(&SignedAlertBatch::new(pruned, signed.signature().clone()), &public_key),
            Err(VerificationError::SignatureMismatch)
        );
    }

    /// Injecting an extra finding from a real scanner is caught too.
    #[test]
    fn test_injected_finding_rejected() {
        let aggregator = honest_aggregator();
        let (signed, public_key) = signed_scenario(&aggregator);

        let block = &signed.data().results()[0];
        let group = &block.results()[0];
        let mut alerts = group.alerts().to_vec();
        alerts.push(Scanner::new(9).emit("alert-injected", Severity::Info, b"{}"));
        let injected = AlertBatch::from_parts(
            1,
            10,
            10,
            3,
            Severity::Critical,
            vec![BlockResults::new(
                block.block().clone(),
                vec![AgentAlerts::new(group.agent().clone(), alerts)],
                vec![],
            )],
        );

        assert_eq!(
            recipient().verify(&SignedAlertBatch::new(injected, signed.signature().clone()), &public_key),
            Err(VerificationError::SignatureMismatch)
        );
    }

    // =========================================================================
    // IMPERSONATION
    // =========================================================================

    /// Claiming the victim's identity string does not help an attacker: the
    /// key decides.
    #[test]
    fn test_identity_spoofing_rejected() {
        let victim = honest_aggregator();
        let attacker = honest_aggregator();

        let (attacker_signed, _) = signed_scenario(&attacker);
        let (data, signature) = attacker_signed.into_parts();
        let spoofed = Signature::new(
            signature.algorithm(),
            victim.signer().identity(),
            signature.bytes().to_vec(),
        );

        assert_eq!(
            recipient().verify(
                &SignedAlertBatch::new(data, spoofed),
                &victim.signer().public_key()
            ),
            Err(VerificationError::SignatureMismatch)
        );
    }

    // =========================================================================
    // WIRE DAMAGE
    // =========================================================================

    #[test]
    fn test_truncated_wire_bytes() {
        let aggregator = honest_aggregator();
        let (signed, _) = signed_scenario(&aggregator);
        let wire = aggregator.encode(signed.data()).unwrap();

        assert!(matches!(
            recipient().decode(&wire[..wire.len() - 3]),
            Err(DecodeError::Truncated { .. })
        ));
    }
}
