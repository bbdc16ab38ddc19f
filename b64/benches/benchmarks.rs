//! Benchmarks comparing our base64 implementation with the external base64 crate.

use b64::{encoded_len, STANDARD, STANDARD_STRICT};
use base64_external::{engine::general_purpose::STANDARD as EXTERNAL, Engine};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

/// Sample data sizes for benchmarking
const SIZES: &[usize] = &[16, 64, 256, 1024, 4096, 16384, 1 << 20];

fn generate_data(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for &size in SIZES {
        let data = generate_data(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("our_impl", size), &data, |b, data| {
            b.iter(|| STANDARD.encode(black_box(data)))
        });

        group.bench_with_input(BenchmarkId::new("our_impl_slice", size), &data, |b, data| {
            let mut output = vec![0u8; encoded_len(data.len())];
            b.iter(|| STANDARD.encode_to_slice(black_box(data), &mut output))
        });

        group.bench_with_input(BenchmarkId::new("base64_crate", size), &data, |b, data| {
            b.iter(|| EXTERNAL.encode(black_box(data)))
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for &size in SIZES {
        let encoded = STANDARD.encode(&generate_data(size));
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("our_impl", size), &encoded, |b, encoded| {
            b.iter(|| STANDARD.decode(black_box(encoded)))
        });

        group.bench_with_input(
            BenchmarkId::new("our_impl_strict", size),
            &encoded,
            |b, encoded| b.iter(|| STANDARD_STRICT.decode(black_box(encoded))),
        );

        group.bench_with_input(
            BenchmarkId::new("base64_crate", size),
            &encoded,
            |b, encoded| b.iter(|| EXTERNAL.decode(black_box(encoded))),
        );
    }

    group.finish();
}

fn bench_byte_length(c: &mut Criterion) {
    let encoded = STANDARD.encode(&generate_data(1 << 20));
    c.bench_function("byte_length_1MiB", |b| {
        b.iter(|| STANDARD.byte_length(black_box(&encoded)))
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_byte_length);
criterion_main!(benches);
