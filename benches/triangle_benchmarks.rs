use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tricount::generate::{erdos_renyi, friendship, triangle_strip};
use tricount::{count_triangles, Algorithm, CountConfig, IntersectionStrategy, Orientation};
use tricount_algorithms::intersect::{BinarySearch, HashMarker, Intersect, MergePath, Partitioned};

/// Every non-reference algorithm on a sparse random graph
fn bench_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("algorithms");
    let config = CountConfig::default();

    for n in [1_000, 10_000].iter() {
        let graph = erdos_renyi(*n, 16.0 / *n as f64, 7).unwrap();
        for algorithm in Algorithm::ALL.iter().filter(|a| !a.is_reference_only()) {
            group.bench_with_input(BenchmarkId::new(algorithm.name(), n), &graph, |b, g| {
                b.iter(|| count_triangles(g, *algorithm, &config).unwrap());
            });
        }
    }
    group.finish();
}

/// Forward with each intersection primitive
fn bench_intersections(c: &mut Criterion) {
    let mut group = c.benchmark_group("forward_intersection");
    let graph = erdos_renyi(5_000, 0.004, 3).unwrap();

    for strategy in IntersectionStrategy::ALL {
        let config = CountConfig { intersection: strategy, ..Default::default() };
        group.bench_function(strategy.name(), |b| {
            b.iter(|| count_triangles(&graph, Algorithm::Forward, &config).unwrap());
        });
    }
    group.finish();
}

/// Raw primitives on a skewed pair of lists
fn bench_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitives");
    let short: Vec<usize> = (0..64).map(|i| i * 151).collect();
    let long: Vec<usize> = (0..10_000).map(|i| i * 3).collect();

    group.bench_function("merge", |b| b.iter(|| MergePath.count(&short, &long)));
    group.bench_function("binary", |b| b.iter(|| BinarySearch.count(&short, &long)));
    group.bench_function("partitioned", |b| b.iter(|| Partitioned.count(&short, &long)));
    let mut hash = HashMarker::new(30_000).unwrap();
    group.bench_function("hash", |b| b.iter(|| hash.count(&short, &long)));
    group.finish();
}

/// Orientation pre-passes on triangle-rich shapes
fn bench_orientations(c: &mut Criterion) {
    let mut group = c.benchmark_group("orientation");
    let shapes = [
        ("friendship", friendship(5_000).unwrap()),
        ("strip", triangle_strip(20_000).unwrap()),
    ];

    for (name, graph) in shapes.iter() {
        for orientation in Orientation::ALL {
            let config = CountConfig { orientation, ..Default::default() };
            group.bench_with_input(BenchmarkId::new(orientation.name(), name), graph, |b, g| {
                b.iter(|| count_triangles(g, Algorithm::Forward, &config).unwrap());
            });
        }
    }
    group.finish();
}

/// Recursive reduction against its forward fallback
fn bench_recursive(c: &mut Criterion) {
    let mut group = c.benchmark_group("bader_recursive");
    let graph = erdos_renyi(20_000, 0.0008, 11).unwrap();

    for fanout in [0.0, 0.3, 0.7, 1.0] {
        let config = CountConfig { recursive_fanout_threshold: fanout, ..Default::default() };
        group.bench_with_input(BenchmarkId::from_parameter(fanout), &graph, |b, g| {
            b.iter(|| count_triangles(g, Algorithm::BaderRecursive, &config).unwrap());
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_algorithms,
    bench_intersections,
    bench_primitives,
    bench_orientations,
    bench_recursive,
);
criterion_main!(benches);
