//! Benchmarks for encoding and decoding containers with each strategy

#![allow(clippy::unwrap_used, clippy::expect_used)]

use cccompress_formats::{CompressionMode, FileCodec, ObfuscationKey, StrategyRegistry};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

/// Mixed text-like payload of the given size
fn payload(size: usize) -> Vec<u8> {
    b"cccompress benchmark payload: lorem ipsum dolor sit amet 0123456789\n"
        .iter()
        .copied()
        .cycle()
        .take(size)
        .collect()
}

fn bench_encode(c: &mut Criterion) {
    let registry = StrategyRegistry::new();
    let codec = FileCodec::new(&registry);
    let key = ObfuscationKey::parse("bench.key").unwrap();
    let data = payload(256 * 1024);

    let mut group = c.benchmark_group("encode");
    group.throughput(Throughput::Bytes(data.len() as u64));

    for mode in CompressionMode::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(mode), &data, |b, data| {
            b.iter(|| codec.encode(&key, mode, black_box(data)).unwrap());
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let registry = StrategyRegistry::new();
    let codec = FileCodec::new(&registry);
    let key = ObfuscationKey::parse("bench.key").unwrap();
    let data = payload(256 * 1024);

    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Bytes(data.len() as u64));

    for mode in CompressionMode::ALL {
        let framed = codec.encode(&key, mode, &data).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(mode), &framed, |b, framed| {
            b.iter(|| codec.decode(&key, black_box(framed)).unwrap());
        });
    }

    group.finish();
}

fn bench_obfuscation(c: &mut Criterion) {
    let key = ObfuscationKey::parse("bench.key").unwrap();
    let mut data = payload(4096);

    c.bench_function("obfuscate_prefix", |b| {
        b.iter(|| key.apply(black_box(&mut data)));
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_obfuscation);
criterion_main!(benches);
