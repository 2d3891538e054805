//! Common utilities for benchmarks

use criterion::Criterion;
use depsnap_core::types::{ComponentIndex, ModuleCoordinates, ResolvedConfiguration, ResolvedGraph};

/// Criterion settings shared by every benchmark
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(std::time::Duration::from_secs(3))
        .measurement_time(std::time::Duration::from_secs(10))
        .sample_size(100)
}

/// Build a layered graph where every component depends on `fan_out`
/// components of the next layer, so subtrees are heavily shared.
///
/// The first layer holds the roots.
pub fn layered_graph(layers: usize, width: usize, fan_out: usize) -> ResolvedGraph {
    let mut graph = ResolvedGraph::new();
    let mut previous: Vec<ComponentIndex> = Vec::new();

    for layer in 0..layers {
        let current: Vec<ComponentIndex> = (0..width)
            .map(|slot| {
                graph.add_component(ModuleCoordinates::new(
                    format!("org.bench.layer{}", layer),
                    format!("lib-{}", slot),
                    "1.0.0",
                ))
            })
            .collect();

        for (slot, parent) in previous.iter().enumerate() {
            for offset in 0..fan_out {
                let child = current[(slot + offset) % width];
                // Indices come from this graph, so the edge is always valid
                let _ = graph.add_dependency(*parent, child);
            }
        }
        previous = current;

        if layer == 0 {
            for root in &previous {
                let _ = graph.add_root(*root);
            }
        }
    }

    graph
}

/// A chain `0 -> 1 -> ... -> len-1 -> 0` closed into a cycle
pub fn cyclic_chain(len: usize) -> ResolvedGraph {
    let mut graph = ResolvedGraph::new();
    let nodes: Vec<ComponentIndex> = (0..len)
        .map(|i| graph.add_component(ModuleCoordinates::new("org.bench.chain", format!("node-{}", i), "1.0")))
        .collect();

    for window in nodes.windows(2) {
        let _ = graph.add_dependency(window[0], window[1]);
    }
    if let (Some(first), Some(last)) = (nodes.first(), nodes.last()) {
        let _ = graph.add_dependency(*last, *first);
        let _ = graph.add_root(*first);
    }

    graph
}

/// `count` configurations over the same layered graph, as a multi-project
/// build resolving the same dependencies repeatedly would report them
pub fn configurations(count: usize, layers: usize, width: usize) -> Vec<ResolvedConfiguration> {
    let graph = layered_graph(layers, width, 3);
    (0..count)
        .map(|i| ResolvedConfiguration::new(format!(":module{}", i), "runtimeClasspath", graph.clone()))
        .collect()
}
