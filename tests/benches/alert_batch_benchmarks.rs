//! # Alert Batch Benchmarks
//!
//! | Operation | Scales with |
//! |-----------|-------------|
//! | build (sequential vs rayon aggregation) | blocks per batch |
//! | encode / decode | total findings |
//! | sign / verify (secp256k1) | encoded size |
//! | verify_many | batches |

use alert_batch::adapters::{CryptoSignatureVerifier, Secp256k1BatchSigner};
use alert_batch::{AlertBatchApi, AlertBatchService, BatchConfig};
use alert_tests::fixtures::random_blocks;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

type Service = AlertBatchService<Secp256k1BatchSigner, CryptoSignatureVerifier>;

fn service(parallel_threshold: usize) -> Service {
    let config = BatchConfig {
        parallel_threshold,
        ..BatchConfig::default()
    };
    AlertBatchService::with_config(Secp256k1BatchSigner::generate(), CryptoSignatureVerifier, config)
        .expect("valid config")
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("alert-batch-build");
    group.measurement_time(Duration::from_secs(5));
    let mut rng = StdRng::seed_from_u64(1);

    for blocks in [16u64, 256, 2048] {
        let (input, _, _) = random_blocks(&mut rng, 0, blocks, 4);
        group.throughput(Throughput::Elements(blocks));

        for (label, threshold) in [("sequential", usize::MAX), ("rayon", 1)] {
            let service = service(threshold);
            group.bench_with_input(BenchmarkId::new(label, blocks), &input, |b, input| {
                b.iter(|| black_box(service.build(1, 0, blocks - 1, input.clone()).is_ok()))
            });
        }
    }
    group.finish();
}

fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("alert-batch-encoding");
    let mut rng = StdRng::seed_from_u64(2);
    let service = service(64);

    for blocks in [16u64, 256] {
        let (input, _, _) = random_blocks(&mut rng, 0, blocks, 4);
        let batch = service.build(1, 0, blocks - 1, input).expect("valid batch");
        let wire = service.encode(&batch).expect("encodable");
        group.throughput(Throughput::Bytes(wire.len() as u64));

        group.bench_with_input(BenchmarkId::new("encode", blocks), &batch, |b, batch| {
            b.iter(|| black_box(service.encode(batch).is_ok()))
        });
        group.bench_with_input(BenchmarkId::new("decode", blocks), &wire, |b, wire| {
            b.iter(|| black_box(service.decode(wire).is_ok()))
        });
    }
    group.finish();
}

fn bench_sign_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("alert-batch-signing");
    group.measurement_time(Duration::from_secs(10));
    let mut rng = StdRng::seed_from_u64(3);
    let service = service(64);
    let public_key = service.signer().public_key();

    let (input, _, _) = random_blocks(&mut rng, 0, 64, 4);
    let batch = service.build(1, 0, 63, input).expect("valid batch");
    let signed = service.sign(batch.clone()).expect("signable");

    group.bench_function("sign", |b| {
        b.iter(|| black_box(service.sign(batch.clone()).is_ok()))
    });
    group.bench_function("verify", |b| {
        b.iter(|| black_box(service.verify(&signed, &public_key).is_ok()))
    });

    for count in [8usize, 64] {
        let batches = vec![signed.clone(); count];
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("verify_many", count), &batches, |b, batches| {
            b.iter(|| black_box(service.verify_many(batches, &public_key).len()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_encoding, bench_sign_verify);
criterion_main!(benches);
