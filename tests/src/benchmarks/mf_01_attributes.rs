//! # MF-01 Attribute Store Benchmarks
//!
//! - Set/overwrite cost as the store grows (linear key scan)
//! - Lookup hit and miss
//! - Whole-store copy and compare

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use mf_01_attributes::{AttributeStore, MatchType};
use rand::Rng;
use shared_types::Guid;

fn populated(size: usize) -> AttributeStore {
    let store = AttributeStore::with_capacity(size).unwrap_or_default();
    for i in 0..size {
        store.set_u64(Guid::from_u128(i as u128 + 1), i as u64).unwrap_or(());
    }
    store
}

pub fn bench_set_item(c: &mut Criterion) {
    let mut group = c.benchmark_group("mf-01-set-item");
    for size in [8usize, 64, 512] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("fresh_keys", size), &size, |b, &size| {
            b.iter(|| black_box(populated(size)))
        });

        let store = populated(size);
        group.bench_with_input(BenchmarkId::new("overwrite", size), &size, |b, &size| {
            let mut rng = rand::thread_rng();
            b.iter(|| {
                let key = Guid::from_u128(rng.gen_range(1..=size as u128));
                store.set_u32(key, black_box(7)).unwrap_or(());
            })
        });
    }
    group.finish();
}

pub fn bench_get_item(c: &mut Criterion) {
    let mut group = c.benchmark_group("mf-01-get-item");
    for size in [8usize, 64, 512] {
        let store = populated(size);
        let last = Guid::from_u128(size as u128);
        let missing = Guid::from_u128(u128::MAX);

        group.bench_with_input(BenchmarkId::new("hit_last", size), &size, |b, _| {
            b.iter(|| black_box(store.get_item(&last).is_ok()))
        });
        group.bench_with_input(BenchmarkId::new("miss", size), &size, |b, _| {
            b.iter(|| black_box(store.get_item(&missing).is_err()))
        });
    }
    group.finish();
}

pub fn bench_copy_and_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("mf-01-copy-compare");
    for size in [8usize, 64, 256] {
        let source = populated(size);
        group.bench_with_input(BenchmarkId::new("copy_all_items", size), &size, |b, _| {
            b.iter(|| {
                let dest = AttributeStore::new();
                source.copy_all_items(&dest).unwrap_or(());
                black_box(dest.count())
            })
        });

        let other = populated(size);
        group.bench_with_input(BenchmarkId::new("compare_all", size), &size, |b, _| {
            b.iter(|| black_box(source.compare(&other, MatchType::AllItems)))
        });
    }
    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_set_item(c);
    bench_get_item(c);
    bench_copy_and_compare(c);
}
