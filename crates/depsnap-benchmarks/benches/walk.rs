//! Graph walker benchmarks
//!
//! Covers heavily shared layered graphs and long cycles.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use depsnap_benchmarks::{criterion_config, cyclic_chain, layered_graph};
use depsnap_extractor::GraphWalker;

fn bench_shared_subtrees(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk_shared");
    let walker = GraphWalker::new();

    for width in [10usize, 100, 500] {
        let graph = layered_graph(6, width, 4);
        group.throughput(Throughput::Elements(graph.component_count() as u64));
        group.bench_with_input(BenchmarkId::new("width", width), &graph, |b, graph| {
            b.iter(|| black_box(walker.walk(graph)))
        });
    }

    group.finish();
}

fn bench_cycles(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk_cycle");
    let walker = GraphWalker::new();

    for len in [1_000usize, 10_000] {
        let graph = cyclic_chain(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("nodes", len), &graph, |b, graph| {
            b.iter(|| black_box(walker.walk(graph)))
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = bench_shared_subtrees, bench_cycles
}
criterion_main!(benches);
