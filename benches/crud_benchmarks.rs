use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use crimson_tree::RedBlackTree;
use std::collections::BTreeSet;
use std::hint::black_box;
use std::ops::Bound::{Excluded, Unbounded};

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

fn key_patterns() -> [(&'static str, Vec<i64>); 3] {
    [
        ("ordered", ordered_keys(N)),
        ("reverse", reverse_ordered_keys(N)),
        ("random", random_keys(N)),
    ]
}

// ─── Insert / Contains / Remove ─────────────────────────────────────────────

fn bench_insert(c: &mut Criterion) {
    for (pattern, keys) in key_patterns() {
        let mut group = c.benchmark_group(format!("set_insert_{pattern}"));

        group.bench_function(BenchmarkId::new("RedBlackTree", N), |b| {
            b.iter(|| {
                let mut set = RedBlackTree::new();
                for &k in &keys {
                    set.insert(k);
                }
                set
            });
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter(|| {
                let mut set = BTreeSet::new();
                for &k in &keys {
                    set.insert(k);
                }
                set
            });
        });

        group.finish();
    }
}

fn bench_contains(c: &mut Criterion) {
    for (pattern, keys) in key_patterns() {
        let tree: RedBlackTree<i64> = keys.iter().copied().collect();
        let btree: BTreeSet<i64> = keys.iter().copied().collect();

        let mut group = c.benchmark_group(format!("set_contains_{pattern}"));

        group.bench_function(BenchmarkId::new("RedBlackTree", N), |b| {
            b.iter(|| keys.iter().filter(|k| tree.contains(k)).count());
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter(|| keys.iter().filter(|k| btree.contains(k)).count());
        });

        group.finish();
    }
}

fn bench_remove(c: &mut Criterion) {
    let inserted = ordered_keys(N);
    for (pattern, keys) in key_patterns() {
        let mut group = c.benchmark_group(format!("set_remove_{pattern}"));

        group.bench_function(BenchmarkId::new("RedBlackTree", N), |b| {
            b.iter_batched(
                || inserted.iter().copied().collect::<RedBlackTree<i64>>(),
                |mut set| {
                    for &k in &keys {
                        set.remove(&k);
                    }
                    set
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter_batched(
                || inserted.iter().copied().collect::<BTreeSet<i64>>(),
                |mut set| {
                    for &k in &keys {
                        set.remove(&k);
                    }
                    set
                },
                BatchSize::SmallInput,
            );
        });

        group.finish();
    }
}

// ─── Neighbor / Range / Copy ────────────────────────────────────────────────

fn bench_closest_less(c: &mut Criterion) {
    // Even keys only, so every odd probe falls between two elements.
    let tree: RedBlackTree<i64> = (0..N as i64).map(|k| k * 2).collect();
    let btree: BTreeSet<i64> = (0..N as i64).map(|k| k * 2).collect();
    let probes: Vec<i64> = random_keys(N).into_iter().map(|k| k % (2 * N as i64) | 1).collect();

    let mut group = c.benchmark_group("set_closest_less_random");

    group.bench_function(BenchmarkId::new("RedBlackTree", N), |b| {
        b.iter(|| probes.iter().filter_map(|p| tree.closest_less(p)).sum::<i64>());
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            probes
                .iter()
                .filter_map(|p| btree.range((Unbounded, Excluded(p))).next_back())
                .sum::<i64>()
        });
    });

    group.finish();
}

fn bench_search_range(c: &mut Criterion) {
    let keys = random_keys(N);
    let tree: RedBlackTree<i64> = keys.iter().copied().collect();
    let btree: BTreeSet<i64> = keys.iter().copied().collect();
    let (low, high) = (1_i64 << 29, 1_i64 << 30);

    let mut group = c.benchmark_group("set_search_range_random");

    group.bench_function(BenchmarkId::new("RedBlackTree", N), |b| {
        b.iter(|| tree.search_range(black_box(&low), black_box(&high)));
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| btree.range(black_box(low)..=black_box(high)).copied().collect::<Vec<_>>());
    });

    group.finish();
}

fn bench_clone(c: &mut Criterion) {
    let keys = random_keys(N);
    let tree: RedBlackTree<i64> = keys.iter().copied().collect();
    let btree: BTreeSet<i64> = keys.iter().copied().collect();

    let mut group = c.benchmark_group("set_clone_random");

    group.bench_function(BenchmarkId::new("RedBlackTree", N), |b| {
        b.iter(|| tree.clone());
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| btree.clone());
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(crud_benches, bench_insert, bench_contains, bench_remove,);

criterion_group!(query_benches, bench_closest_less, bench_search_range, bench_clone,);

criterion_main!(crud_benches, query_benches);
