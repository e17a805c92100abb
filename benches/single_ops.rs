use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ordered_rbtree::RbTree;
use std::collections::BTreeSet;

fn filled(size: u64) -> RbTree<u64> {
    let mut tree = RbTree::new();
    for i in 0..size {
        tree.insert_unique(i).unwrap();
    }
    tree
}

/// Benchmark single insert operation with varying dataset sizes
fn bench_single_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_insert");

    // Test how insert performance changes as dataset grows
    for size in [100, 1_000, 10_000, 100_000].iter() {
        // RbTree: insert into existing dataset
        group.bench_with_input(BenchmarkId::new("RbTree", size), size, |b, &size| {
            let mut tree = filled(size);
            let next_key = size;

            b.iter(|| {
                black_box(tree.insert_unique(next_key).unwrap());
                tree.erase_unique(&next_key); // Clean up for next iteration
            });
        });

        // BTreeSet: insert into existing dataset
        group.bench_with_input(BenchmarkId::new("BTreeSet", size), size, |b, &size| {
            let mut btree = BTreeSet::new();
            for i in 0..size {
                btree.insert(i);
            }
            let next_key = size;

            b.iter(|| {
                black_box(btree.insert(next_key));
                btree.remove(&next_key); // Clean up for next iteration
            });
        });
    }

    group.finish();
}

/// Benchmark single lookup with varying dataset sizes
fn bench_single_contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_contains");

    for size in [100, 1_000, 10_000, 100_000].iter() {
        group.bench_with_input(BenchmarkId::new("RbTree_hit", size), size, |b, &size| {
            let tree = filled(size);
            let lookup_key = size / 2;

            b.iter(|| black_box(tree.contains(&lookup_key)));
        });

        group.bench_with_input(BenchmarkId::new("BTreeSet_hit", size), size, |b, &size| {
            let btree: BTreeSet<u64> = (0..size).collect();
            let lookup_key = size / 2;

            b.iter(|| black_box(btree.contains(&lookup_key)));
        });

        group.bench_with_input(BenchmarkId::new("RbTree_miss", size), size, |b, &size| {
            let tree = filled(size);
            let lookup_key = size + 1000;

            b.iter(|| black_box(tree.contains(&lookup_key)));
        });
    }

    group.finish();
}

/// Benchmark single erase with varying dataset sizes
fn bench_single_erase(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_erase");

    for size in [100, 1_000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::new("RbTree", size), size, |b, &size| {
            b.iter_batched(
                || (filled(size), size / 2),
                |(mut tree, key)| black_box(tree.erase_unique(&key)),
                criterion::BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("BTreeSet", size), size, |b, &size| {
            b.iter_batched(
                || ((0..size).collect::<BTreeSet<u64>>(), size / 2),
                |(mut btree, key)| black_box(btree.remove(&key)),
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

/// Hinted insertion at the end versus full descent
fn bench_hinted_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("hinted_append");

    group.bench_function("RbTree_hint_end_1000", |b| {
        b.iter(|| {
            let mut tree = RbTree::<u64>::new();
            for i in 0..1000 {
                let end = tree.end();
                black_box(tree.insert_unique_hint(end, i).unwrap());
            }
        });
    });

    group.bench_function("RbTree_descent_1000", |b| {
        b.iter(|| {
            let mut tree = RbTree::<u64>::new();
            for i in 0..1000 {
                black_box(tree.insert_unique(i).unwrap());
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_single_insert,
    bench_single_contains,
    bench_single_erase,
    bench_hinted_append,
);
criterion_main!(benches);
