//! # Admission Benchmarks
//!
//! Announce hot-path cost per branch of the decision order:
//!
//! | Path | Work |
//! |------|------|
//! | allowed, no signature | two read-locked lookups |
//! | unlisted, no signature | two read-locked lookups |
//! | allowed, with signature | signature skipped |
//! | unlisted, bad signature | hex decode + one verify per trusted key |
//! | promotion | verify + write lock + enqueue |

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use gate_approval::{AdmissionApi, AdmissionService};
use gate_crypto::Ed25519KeyPair;
use gate_storage::InMemoryBackend;
use gate_telemetry::ApprovalMetrics;
use gate_tests::fixtures::{config, random_infohash, random_infohashes, Authority};
use std::sync::Arc;
use std::time::Duration;

fn build_service(
    runtime: &tokio::runtime::Runtime,
    allow: usize,
    authorities: &[&Authority],
) -> (AdmissionService, Vec<gate_types::InfoHash>) {
    let allowed = random_infohashes(allow);
    let cfg = config(&allowed, &[], authorities, gate_storage::BackendConfig::Memory);
    let _guard = runtime.enter();
    let service = AdmissionService::new(
        &cfg,
        Arc::new(InMemoryBackend::new()),
        Arc::new(ApprovalMetrics::new()),
    )
    .expect("service");
    (service, allowed)
}

fn bench_decide_without_signature(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("runtime");
    let mut group = c.benchmark_group("decide-unsigned");
    group.measurement_time(Duration::from_secs(5));

    for size in [100, 10_000, 100_000] {
        let (service, allowed) = build_service(&runtime, size, &[]);
        let hit = allowed[size / 2];
        let miss = random_infohash();

        group.bench_with_input(BenchmarkId::new("allowed", size), &hit, |b, id| {
            b.iter(|| black_box(service.decide(id, None)))
        });
        group.bench_with_input(BenchmarkId::new("unlisted", size), &miss, |b, id| {
            b.iter(|| black_box(service.decide(id, None)))
        });
    }

    group.finish();
}

fn bench_decide_with_signature(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("runtime");
    let mut group = c.benchmark_group("decide-signed");
    group.measurement_time(Duration::from_secs(5));

    // Failed verification costs one verify per trusted key
    for keys in [1usize, 4, 16] {
        let authorities: Vec<Authority> = (0..keys).map(|_| Authority::new()).collect();
        let refs: Vec<&Authority> = authorities.iter().collect();
        let (service, _) = build_service(&runtime, 0, &refs);
        let id = random_infohash();
        let forged = Ed25519KeyPair::generate().sign(id.as_bytes()).to_hex();

        group.bench_with_input(BenchmarkId::new("untrusted", keys), &forged, |b, sig| {
            b.iter(|| black_box(service.decide(&id, Some(sig))))
        });
    }

    let authority = Authority::new();
    let (service, allowed) = build_service(&runtime, 1, &[&authority]);
    let sig = authority.sign(&allowed[0]);
    group.bench_function("already_allowed", |b| {
        b.iter(|| black_box(service.decide(&allowed[0], Some(&sig))))
    });

    group.finish();
}

fn bench_promotion(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("runtime");
    let mut group = c.benchmark_group("promotion");
    let authority = Authority::new();

    for batch in [10usize, 100] {
        let requests: Vec<_> = random_infohashes(batch)
            .into_iter()
            .map(|id| (id, authority.sign(&id)))
            .collect();

        group.throughput(Throughput::Elements(batch as u64));
        group.bench_with_input(BenchmarkId::new("fresh_ids", batch), &requests, |b, reqs| {
            b.iter_batched(
                || build_service(&runtime, 0, &[&authority]).0,
                |service| {
                    for (id, sig) in reqs {
                        black_box(service.decide(id, Some(sig)));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_decide_without_signature,
    bench_decide_with_signature,
    bench_promotion
);
criterion_main!(benches);
