use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use scn_census::PathCensus;
use scn_core::rng::RngHandle;
use scn_graph::erdos_renyi;

fn bench_census(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_census");
    for &n in &[100u32, 400, 1600] {
        let mut rng = RngHandle::from_seed(303);
        let graph = erdos_renyi(n, 8.0, &mut rng).expect("generator parameters are valid");
        group.bench_with_input(BenchmarkId::new("er_kbar8", n), &graph, |b, graph| {
            b.iter(|| PathCensus::from_graph(graph));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_census);
criterion_main!(benches);
