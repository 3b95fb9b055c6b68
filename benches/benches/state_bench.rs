//! # State Benchmarks
//!
//! Measures the persisted-state codec and the file-backed store.
//!
//! Run: `cargo bench --bench state_bench`

use binsense_air::format::{decode, encode_to_vec};
use binsense_air::{DEFAULT_STATE_CAPACITY, FileStateStore, MemoryStateStore, StateStore};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tempfile::TempDir;

fn blob(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}

/// Benchmark encoding header + blob
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("state_encode");

    for len in [0usize, 8, DEFAULT_STATE_CAPACITY, 4096] {
        let bytes = blob(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &bytes, |b, bytes| {
            b.iter(|| black_box(encode_to_vec(bytes)))
        });
    }

    group.finish();
}

/// Benchmark decoding with capacity capping
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("state_decode");

    for len in [8usize, DEFAULT_STATE_CAPACITY, 4096] {
        let encoded = encode_to_vec(&blob(len));
        group.bench_with_input(BenchmarkId::from_parameter(len), &encoded, |b, encoded| {
            b.iter(|| black_box(decode(&encoded[..], DEFAULT_STATE_CAPACITY)))
        });
    }

    group.bench_function("corrupt_header", |b| {
        b.iter(|| black_box(decode(&b"12x\nabc"[..], DEFAULT_STATE_CAPACITY)))
    });

    group.finish();
}

/// Benchmark full save/load cycles
fn bench_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("state_store");
    let bytes = blob(DEFAULT_STATE_CAPACITY);

    group.bench_function("memory_save_load", |b| {
        let mut store = MemoryStateStore::new();
        b.iter(|| {
            let _ = store.save(&bytes);
            black_box(store.load(DEFAULT_STATE_CAPACITY))
        })
    });

    let dir = match TempDir::new() {
        Ok(dir) => dir,
        Err(_) => {
            group.finish();
            return;
        }
    };
    let mut store = FileStateStore::new(dir.path().join("savedState.dat"));

    group.bench_function("file_save", |b| {
        b.iter(|| black_box(store.save(&bytes)))
    });

    group.bench_function("file_load", |b| {
        b.iter(|| black_box(store.load(DEFAULT_STATE_CAPACITY)))
    });

    group.bench_function("file_load_adapter", |b| {
        let mut buffer = [0u8; DEFAULT_STATE_CAPACITY];
        b.iter(|| black_box(store.state_load(&mut buffer)))
    });

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_store);
criterion_main!(benches);
