//! # DCC Revocation Benchmarks
//!
//! | Path | Measured |
//! |------|----------|
//! | Bloom filter probe | decoded filter, k SHA-256 positions |
//! | Slice decode | Bloom filter and partial hash list parsing |
//! | End-to-end check | in-memory repository, both strategies |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use std::time::Duration;

use dcc_revocation::{
    BloomFilter, CandidateHashes, CheckStrategy, HashType, InMemoryRevocationRepository,
    KidMetadata, MembershipFilter, PartialVariableHashFilter, RevocationApi, RevocationConfig,
    RevocationMode, RevocationService,
};
use dcc_revocation_tests::fixtures::{bloom_slice, hash_list_slice, partition_of, random_hash};

const KID: &str = "bench";

fn decoded(hash: &str) -> Vec<u8> {
    hex::decode(hash).unwrap()
}

// ============================================================================
// Bloom filter probes
// ============================================================================

fn bench_bloom_probe(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom-probe");

    for size in [100usize, 10_000, 100_000] {
        let revoked: Vec<Vec<u8>> = (0..size).map(|_| decoded(&random_hash())).collect();
        let mut filter = BloomFilter::new_with_fpr(size, 0.001);
        for hash in &revoked {
            filter.insert(hash);
        }
        let absent = decoded(&random_hash());

        group.bench_with_input(BenchmarkId::new("hit", size), &filter, |b, f| {
            b.iter(|| black_box(f.might_contain(&revoked[0])))
        });
        group.bench_with_input(BenchmarkId::new("miss", size), &filter, |b, f| {
            b.iter(|| black_box(f.might_contain(&absent)))
        });
    }

    group.finish();
}

// ============================================================================
// Slice decoding
// ============================================================================

fn bench_slice_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("slice-decode");

    for size in [100usize, 10_000] {
        let revoked: Vec<String> = (0..size).map(|_| random_hash()).collect();
        let refs: Vec<&str> = revoked.iter().map(String::as_str).collect();
        let bloom = bloom_slice(&refs, 0.001).content;
        let list = hash_list_slice(&refs, 16).content;

        group.throughput(Throughput::Bytes(bloom.len() as u64));
        group.bench_with_input(BenchmarkId::new("bloom_filter", size), &bloom, |b, bytes| {
            b.iter(|| black_box(BloomFilter::from_bytes(bytes).unwrap()))
        });
        group.throughput(Throughput::Bytes(list.len() as u64));
        group.bench_with_input(BenchmarkId::new("hash_list", size), &list, |b, bytes| {
            b.iter(|| black_box(PartialVariableHashFilter::from_bytes(bytes).unwrap()))
        });
    }

    group.finish();
}

// ============================================================================
// End-to-end checks
// ============================================================================

fn bench_check(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mode = RevocationMode::Vector;

    let repo = Arc::new(InMemoryRevocationRepository::new());
    let signature = random_hash();
    runtime.block_on(async {
        repo.put_metadata(KID, KidMetadata::new(HashType::ALL, mode))
            .await;
        repo.add_slice(
            KID,
            partition_of(mode, &signature),
            bloom_slice(&[&signature], 0.001),
        )
        .await;
    });
    let hashes = CandidateHashes::new()
        .with_uci(random_hash())
        .with_country_uci(random_hash())
        .with_signature(signature);

    let mut group = c.benchmark_group("check");
    group.measurement_time(Duration::from_secs(5));

    for strategy in [CheckStrategy::Sequential, CheckStrategy::Concurrent] {
        let service = RevocationService::new(repo.clone())
            .with_config(RevocationConfig::default().with_strategy(strategy))
            .unwrap();
        group.bench_function(format!("{:?}", strategy).to_lowercase(), |b| {
            b.to_async(&runtime)
                .iter(|| async { black_box(service.is_revoked(KID, &hashes).await.unwrap()) })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_bloom_probe, bench_slice_decode, bench_check);
criterion_main!(benches);
