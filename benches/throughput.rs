//! Throughput Benchmark for fadebin
//!
//! This benchmark measures the performance of the paste store
//! under various workloads.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use fadebin::paste::id;
use fadebin::storage::PasteStore;
use tempfile::TempDir;

/// Benchmark save operations
fn bench_save(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let store = PasteStore::new(dir.path());

    let mut group = c.benchmark_group("save");
    group.throughput(Throughput::Elements(1));

    group.bench_function("save_small", |b| {
        b.iter(|| {
            black_box(store.save("bench", b"small_value", "1h").unwrap());
        });
    });

    group.bench_function("save_medium", |b| {
        let body = "x".repeat(1024).into_bytes(); // 1KB body
        b.iter(|| {
            black_box(store.save("bench", &body, "1h").unwrap());
        });
    });

    group.bench_function("save_large", |b| {
        let body = "x".repeat(64 * 1024).into_bytes(); // 64KB body
        b.iter(|| {
            black_box(store.save("bench", &body, "1h").unwrap());
        });
    });

    group.finish();
}

/// Benchmark load operations
fn bench_load(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let store = PasteStore::new(dir.path());

    // Pre-populate with data
    let ids: Vec<String> = (0..1_000)
        .map(|i| {
            store
                .save("bench", format!("value:{}", i).as_bytes(), "24h")
                .unwrap()
        })
        .collect();

    let mut group = c.benchmark_group("load");
    group.throughput(Throughput::Elements(1));

    group.bench_function("load_existing", |b| {
        let mut i = 0usize;
        b.iter(|| {
            black_box(store.load(&ids[i % ids.len()]).unwrap());
            i += 1;
        });
    });

    group.bench_function("load_missing", |b| {
        b.iter(|| {
            black_box(store.load("0123456789abcdef").ok());
        });
    });

    group.finish();
}

/// Benchmark identifier generation and validation
fn bench_id(c: &mut Criterion) {
    let mut group = c.benchmark_group("id");
    group.throughput(Throughput::Elements(1));

    group.bench_function("generate", |b| {
        b.iter(|| {
            black_box(id::generate());
        });
    });

    group.bench_function("is_valid", |b| {
        b.iter(|| {
            black_box(id::is_valid("a1b2c3d4e5f60718"));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_save, bench_load, bench_id);

criterion_main!(benches);
