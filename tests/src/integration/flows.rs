//! # Integration Test Flows
//!
//! Aggregator and recipient exercised together through the public API:
//!
//! 1. **Aggregator**: build -> validate -> encode -> sign
//! 2. **Transport**: serde_json envelope, or raw canonical bytes plus signature
//! 3. **Recipient**: decode / deserialize -> re-encode -> verify -> validate

#[cfg(test)]
mod tests {
    use crate::fixtures::{init_tracing, random_blocks, scenario_blocks};
    use alert_batch::adapters::{CryptoSignatureVerifier, Ed25519BatchSigner, Secp256k1BatchSigner};
    use alert_batch::{
        AlertBatchApi, AlertBatchService, BatchConfig, BatchError, BuildError, SignedAlertBatch,
        VerificationError,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use shared_crypto::keccak256;
    use shared_types::Severity;

    type Aggregator = AlertBatchService<Secp256k1BatchSigner, CryptoSignatureVerifier>;

    fn aggregator() -> Aggregator {
        init_tracing();
        AlertBatchService::new(Secp256k1BatchSigner::generate(), CryptoSignatureVerifier)
    }

    fn recipient() -> AlertBatchService<Ed25519BatchSigner, CryptoSignatureVerifier> {
        AlertBatchService::new(Ed25519BatchSigner::generate(), CryptoSignatureVerifier)
    }

    // =========================================================================
    // REFERENCE SCENARIO
    // =========================================================================

    /// Build, sign, ship as JSON, accept on the other side.
    #[test]
    fn test_scenario_end_to_end() {
        let aggregator = aggregator();
        let public_key = aggregator.signer().public_key();

        let batch = aggregator.build(1, 10, 10, scenario_blocks()).unwrap();
        assert_eq!(batch.alert_count(), 2);
        assert_eq!(batch.max_severity(), Severity::Critical);

        let signed = aggregator.sign(batch.clone()).unwrap();
        let envelope = serde_json::to_string(&signed).unwrap();

        let received: SignedAlertBatch = serde_json::from_str(&envelope).unwrap();
        let trusted = recipient().accept(received, &public_key).unwrap();
        assert_eq!(trusted, batch);
    }

    #[test]
    fn test_scenario_wrong_key() {
        let aggregator = aggregator();
        let signed = aggregator
            .sign(aggregator.build(1, 10, 10, scenario_blocks()).unwrap())
            .unwrap();
        let stranger = Secp256k1BatchSigner::generate().public_key();

        assert_eq!(
            recipient().verify(&signed, &stranger),
            Err(VerificationError::SignatureMismatch)
        );
        assert_eq!(
            recipient().accept(signed, &stranger),
            Err(BatchError::Verification(VerificationError::SignatureMismatch))
        );
    }

    /// Flipping any byte of the transmitted payload either breaks decoding
    /// or breaks the signature. Nothing tampered is ever accepted.
    #[test]
    fn test_any_byte_flip_is_caught() {
        let aggregator = aggregator();
        let public_key = aggregator.signer().public_key();
        let signed = aggregator
            .sign(aggregator.build(1, 10, 10, scenario_blocks()).unwrap())
            .unwrap();
        let wire = aggregator.encode(signed.data()).unwrap();
        let recipient = recipient();

        let mut mismatches = 0;
        for i in 0..wire.len() {
            let mut tampered = wire.clone();
            tampered[i] ^= 0x01;

            if let Ok(data) = recipient.decode(&tampered) {
                let candidate = SignedAlertBatch::new(data, signed.signature().clone());
                assert_eq!(
                    recipient.verify(&candidate, &public_key),
                    Err(VerificationError::SignatureMismatch),
                    "flip at byte {i} verified"
                );
                mismatches += 1;
            }
        }
        // At least every header integer decodes after a flip
        assert!(mismatches >= 28);
    }

    // =========================================================================
    // RANGE INVARIANT
    // =========================================================================

    #[test]
    fn test_range_invariant() {
        let aggregator = aggregator();
        let block = |n| {
            let mut blocks = scenario_blocks();
            let original = blocks.remove(0);
            alert_batch::BlockResults::new(
                shared_types::BlockRef::new("0xabc", n).unwrap(),
                original.results().to_vec(),
                vec![],
            )
        };

        assert_eq!(
            aggregator.build(1, 100, 105, vec![block(106)]),
            Err(BuildError::BlockOutOfRange {
                number: 106,
                start: 100,
                end: 105
            })
        );
        assert_eq!(
            aggregator.build(1, 100, 105, vec![block(102), block(102)]),
            Err(BuildError::DuplicateBlock(102))
        );
    }

    // =========================================================================
    // RANDOMIZED TREES
    // =========================================================================

    /// Aggregates of random trees match a direct count, through the rayon
    /// path, and survive the raw-bytes transport.
    #[test]
    fn test_random_trees_roundtrip() {
        init_tracing();
        let mut rng = StdRng::seed_from_u64(0xa1e7);
        let config = BatchConfig {
            parallel_threshold: 4,
            ..BatchConfig::default()
        };
        let aggregator = AlertBatchService::with_config(
            Ed25519BatchSigner::generate(),
            CryptoSignatureVerifier,
            config,
        )
        .unwrap();
        let public_key = aggregator.signer().public_key();

        for round in 0..8u64 {
            let start = 1_000 + round * 100;
            let (blocks, count, max) = random_blocks(&mut rng, start, 12, 4);

            let batch = aggregator.build(137, start, start + 99, blocks).unwrap();
            assert_eq!(u64::from(batch.alert_count()), count);
            assert_eq!(batch.max_severity(), max);

            let signed = aggregator.sign(batch).unwrap();

            // Raw transport: canonical bytes and the signature travel separately
            let wire = aggregator.encode(signed.data()).unwrap();
            let (_, signature) = signed.clone().into_parts();
            let received = SignedAlertBatch::new(aggregator.decode(&wire).unwrap(), signature);

            assert_eq!(received, signed);
            assert!(aggregator.accept(received, &public_key).is_ok());
        }
    }

    #[test]
    fn test_content_hash_matches_wire_bytes() {
        let aggregator = aggregator();
        let batch = aggregator.build(1, 10, 10, scenario_blocks()).unwrap();

        let wire = aggregator.encode(&batch).unwrap();
        assert_eq!(
            batch.content_hash(aggregator.config()).unwrap(),
            keccak256(&wire)
        );
    }

    /// Distinct epochs can be built and signed from many threads against a
    /// single shared service.
    #[test]
    fn test_concurrent_epochs() {
        let aggregator = aggregator();
        let public_key = aggregator.signer().public_key();

        let signed: Vec<SignedAlertBatch> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4u64)
                .map(|epoch| {
                    let aggregator = &aggregator;
                    scope.spawn(move || {
                        let blocks = scenario_blocks();
                        let batch = aggregator.build(epoch + 1, 10, 10, blocks).unwrap();
                        aggregator.sign(batch).unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let results = aggregator.verify_many(&signed, &public_key);
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(Result::is_ok));

        let chains: Vec<u64> = signed.iter().map(|s| s.data().chain_id()).collect();
        assert_eq!(chains, vec![1, 2, 3, 4]);
    }
}
