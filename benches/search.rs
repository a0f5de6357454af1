use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use simdb::distance::metric::EuclideanDistance;
use simdb::query::linear::LinearScan;
use simdb::query::pivot::PivotPruneIndex;
use simdb::query::{Capabilities, SimilarityIndex};
use simdb::relation::Relation;
use simdb::utils::types::{Oid, Vector};

fn build_relation(n: usize, dim: usize) -> Relation {
    let mut rng = StdRng::seed_from_u64(1234);
    let pairs: Vec<(Oid, Vector)> = (0..n)
        .map(|i| {
            let vector = (0..dim).map(|_| rng.random_range(0.0..1.0)).collect();
            (i as Oid, vector)
        })
        .collect();
    Relation::from_pairs(dim, pairs).unwrap()
}

fn bench_knn(c: &mut Criterion) {
    let relation = build_relation(10_000, 8);
    let query: Vec<f64> = vec![0.5; 8];
    let linear = LinearScan::attach(&relation, EuclideanDistance, Capabilities::KNN).unwrap();
    let pivot = PivotPruneIndex::attach(&relation, EuclideanDistance, Capabilities::KNN).unwrap();

    let mut group = c.benchmark_group("knn10");
    group.bench_function("linear_scan", |b| {
        b.iter(|| linear.knn(black_box(&query), 10).unwrap())
    });
    group.bench_function("pivot_prune", |b| {
        b.iter(|| pivot.knn(black_box(&query), 10).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_knn);
criterion_main!(benches);
