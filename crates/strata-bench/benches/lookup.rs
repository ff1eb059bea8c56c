//! Point-lookup micro-benchmark: B-Tree descent vs RMI prediction.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use strata_bench::dataset::generate_sorted_keys;
use strata_btree::BTreeIndex;
use strata_rmi::LearnedIndex;

const KEY_COUNT: usize = 100_000;

fn lookup_benchmarks(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let data = generate_sorted_keys(&mut rng, KEY_COUNT, 0, (KEY_COUNT as i64) * 10);

    let mut btree = BTreeIndex::new(16).expect("valid order");
    for &key in &data {
        btree.insert(key);
    }
    let rmi = LearnedIndex::build(data.clone(), 100, 50).expect("sorted input");

    let probes: Vec<i64> = (0..1_000)
        .map(|_| data[rng.random_range(0..data.len())])
        .collect();

    let mut group = c.benchmark_group("lookup");
    group.bench_function("btree", |b| {
        b.iter(|| {
            for &key in &probes {
                black_box(btree.search(black_box(key)));
            }
        })
    });
    group.bench_function("rmi", |b| {
        b.iter(|| {
            for &key in &probes {
                black_box(rmi.search(black_box(key)));
            }
        })
    });
    group.finish();
}

criterion_group!(benches, lookup_benchmarks);
criterion_main!(benches);
