//! Micro benchmarks for the in-memory B+ tree.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use bplustree::BPlusTree;

const INSERT_COUNT: i32 = 32_768;
const RANGE_WIDTH: i32 = 512;

fn filled_tree(order: usize, keys: &[i32]) -> BPlusTree {
    let mut tree = BPlusTree::new(order).unwrap();
    for &key in keys {
        tree.insert(key, key as f64);
    }
    tree
}

fn btree_benches(c: &mut Criterion) {
    let sequential: Vec<i32> = (0..INSERT_COUNT).collect();
    let mut shuffled = sequential.clone();
    shuffled.shuffle(&mut StdRng::seed_from_u64(0xBEEF_F00D));

    let mut group = c.benchmark_group("btree/insert");
    group.throughput(Throughput::Elements(INSERT_COUNT as u64));
    for order in [4usize, 16, 64] {
        group.bench_with_input(BenchmarkId::new("sequential", order), &order, |b, &order| {
            b.iter(|| black_box(filled_tree(order, &sequential)));
        });
        group.bench_with_input(BenchmarkId::new("random", order), &order, |b, &order| {
            b.iter(|| black_box(filled_tree(order, &shuffled)));
        });
    }
    group.finish();

    let mut group = c.benchmark_group("btree/read");
    for order in [4usize, 16, 64] {
        let tree = filled_tree(order, &shuffled);
        group.bench_with_input(BenchmarkId::new("point_lookup", order), &tree, |b, tree| {
            let mut i = 0;
            b.iter(|| {
                i = (i + 7919) % INSERT_COUNT;
                black_box(tree.search(i))
            });
        });
        group.bench_with_input(BenchmarkId::new("range_scan", order), &tree, |b, tree| {
            let mut start = 0;
            b.iter(|| {
                start = (start + 4099) % (INSERT_COUNT - RANGE_WIDTH);
                black_box(tree.search_range(start, start + RANGE_WIDTH))
            });
        });
    }
    group.finish();

    let mut group = c.benchmark_group("btree/delete");
    group.throughput(Throughput::Elements(INSERT_COUNT as u64));
    for order in [4usize, 16] {
        group.bench_with_input(BenchmarkId::new("random_drain", order), &order, |b, &order| {
            b.iter_batched(
                || filled_tree(order, &sequential),
                |mut tree| {
                    for &key in &shuffled {
                        tree.delete(key);
                    }
                    black_box(tree.len())
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, btree_benches);
criterion_main!(benches);
